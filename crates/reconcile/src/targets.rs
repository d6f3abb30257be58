//! Set-difference decision logic.

use graph_client::{FollowSet, Username};

use crate::operation::Operation;

/// Compute the ordered target list for `operation`.
///
/// - follow-back: `followers - following`
/// - unfollow-nonreciprocal: `following - followers`
///
/// Pure function of the two snapshots; the result is in lexicographic order.
pub fn target_list(
    operation: Operation,
    followers: &FollowSet,
    following: &FollowSet,
) -> Vec<Username> {
    let (from, minus) = match operation {
        Operation::FollowBack => (followers, following),
        Operation::UnfollowNonReciprocal => (following, followers),
    };
    from.difference(minus).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(users: &[&str]) -> FollowSet {
        users.iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_overlapping_sets() {
        let followers = set(&["a", "b", "c"]);
        let following = set(&["b", "c", "d"]);

        assert_eq!(target_list(Operation::FollowBack, &followers, &following), ["a"]);
        assert_eq!(
            target_list(Operation::UnfollowNonReciprocal, &followers, &following),
            ["d"]
        );
    }

    #[test]
    fn test_disjoint_sets() {
        let followers = set(&["z", "x"]);
        let following = set(&["y"]);

        assert_eq!(target_list(Operation::FollowBack, &followers, &following), ["x", "z"]);
        assert_eq!(
            target_list(Operation::UnfollowNonReciprocal, &followers, &following),
            ["y"]
        );
    }

    #[test]
    fn test_fully_reciprocal_sets() {
        let both = set(&["a", "b"]);
        assert!(target_list(Operation::FollowBack, &both, &both).is_empty());
        assert!(target_list(Operation::UnfollowNonReciprocal, &both, &both).is_empty());
    }

    #[test]
    fn test_idempotent_on_same_snapshot() {
        let followers = set(&["m", "a", "q"]);
        let following = set(&["q"]);

        let first = target_list(Operation::FollowBack, &followers, &following);
        let second = target_list(Operation::FollowBack, &followers, &following);
        assert_eq!(first, second);
        assert_eq!(first, ["a", "m"]);
    }
}
