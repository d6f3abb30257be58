//! Domain types shared by the fetcher, the mutation client and the driver.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Account login as returned by the API. Never validated locally.
pub type Username = String;

/// Snapshot of one account list (followers or following).
///
/// A `BTreeSet` so that differences iterate in lexicographic order and
/// reports come out the same way on every run.
pub type FollowSet = BTreeSet<Username>;

// =============================================================================
// Enums
// =============================================================================

/// Which of the acting account's lists to page through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Followers,
    Following,
}

impl ListKind {
    /// Path segment used by `/users/{account}/{segment}`
    pub fn as_path(&self) -> &'static str {
        match self {
            ListKind::Followers => "followers",
            ListKind::Following => "following",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// State-changing call against `/user/following/{username}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FollowAction {
    Follow,
    Unfollow,
}

impl fmt::Display for FollowAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FollowAction::Follow => f.write_str("follow"),
            FollowAction::Unfollow => f.write_str("unfollow"),
        }
    }
}

/// Classification of a single mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// 204 No Content
    Success,
    /// 403 or 429; the caller must back off before retrying
    RateLimited,
    /// Any other status
    Failed(u16),
}

impl MutationStatus {
    pub const SUCCESS_CODE: u16 = 204;

    /// Classify a raw HTTP status code.
    pub fn from_code(code: u16) -> Self {
        match code {
            Self::SUCCESS_CODE => MutationStatus::Success,
            403 | 429 => MutationStatus::RateLimited,
            other => MutationStatus::Failed(other),
        }
    }
}

/// One entry of a followers/following page. Only the login is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedUser {
    pub login: Username,
}
