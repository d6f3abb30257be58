//! The two reconciliation operations and everything keyed by direction.

use std::fmt;

use graph_client::FollowAction;
use notify::OutcomeCategory;

/// Which reciprocity fix to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Follow accounts that follow us but we don't follow
    FollowBack,
    /// Unfollow accounts we follow that don't follow us
    UnfollowNonReciprocal,
}

impl Operation {
    /// Run order of a full reconciliation pass.
    pub const ALL: [Operation; 2] = [Operation::FollowBack, Operation::UnfollowNonReciprocal];

    pub fn action(&self) -> FollowAction {
        match self {
            Operation::FollowBack => FollowAction::Follow,
            Operation::UnfollowNonReciprocal => FollowAction::Unfollow,
        }
    }

    pub fn success_category(&self) -> OutcomeCategory {
        match self {
            Operation::FollowBack => OutcomeCategory::Followed,
            Operation::UnfollowNonReciprocal => OutcomeCategory::Unfollowed,
        }
    }

    pub fn failure_category(&self) -> OutcomeCategory {
        match self {
            Operation::FollowBack => OutcomeCategory::FailedFollow,
            Operation::UnfollowNonReciprocal => OutcomeCategory::FailedUnfollow,
        }
    }

    /// Notification sent when the target set is empty.
    pub fn nothing_to_do_message(&self) -> &'static str {
        match self {
            Operation::FollowBack => "No one left to follow back",
            Operation::UnfollowNonReciprocal => "No one left to unfollow",
        }
    }

    /// Short progress line, e.g. `"Followed alice."`.
    pub fn progress_message(&self, username: &str, succeeded: bool) -> String {
        let category = if succeeded {
            self.success_category()
        } else {
            self.failure_category()
        };
        format!("{} {}.", category.label(), username)
    }

    /// Thank-you or farewell addressed to `username`, signed by `account`.
    pub fn user_message(&self, username: &str, account: &str) -> (String, String) {
        match self {
            Operation::FollowBack => (
                format!("Dear {}, Thank you for following!", username),
                format!("It's great to have you on board. {} (GitHub)", account),
            ),
            Operation::UnfollowNonReciprocal => (
                format!("Dear {}, It's sad to see you go", username),
                format!("We hope to see you again! {} (GitHub)", account),
            ),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::FollowBack => f.write_str("follow-back"),
            Operation::UnfollowNonReciprocal => f.write_str("unfollow-nonreciprocal"),
        }
    }
}
