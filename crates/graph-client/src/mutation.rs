//! Bounded-retry follow/unfollow caller.
//!
//! Two fixed backoff tiers: a long one after a rate-limit answer and a
//! short one after anything else. No jitter, no growth.

use std::time::Duration;

use tracing::{info, warn};

use crate::api::GraphApi;
use crate::types::{FollowAction, MutationStatus};

/// Retry budget and backoff durations for mutation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per user, including the first one
    pub max_retries: u32,
    /// Sleep after a rate-limited attempt
    pub rate_limit_backoff: Duration,
    /// Sleep after any other failed attempt
    pub failure_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            rate_limit_backoff: Duration::from_secs(60),
            failure_backoff: Duration::from_secs(2),
        }
    }
}

/// Performs follow/unfollow calls against a borrowed [`GraphApi`].
pub struct MutationClient<'a, A: ?Sized> {
    api: &'a A,
    policy: RetryPolicy,
}

impl<'a, A: GraphApi + ?Sized> MutationClient<'a, A> {
    pub fn new(api: &'a A, policy: RetryPolicy) -> Self {
        Self { api, policy }
    }

    /// Follow `username` using the policy's retry budget.
    pub async fn follow(&self, username: &str) -> bool {
        self.mutate(username, FollowAction::Follow, self.policy.max_retries)
            .await
    }

    /// Unfollow `username` using the policy's retry budget.
    pub async fn unfollow(&self, username: &str) -> bool {
        self.mutate(username, FollowAction::Unfollow, self.policy.max_retries)
            .await
    }

    /// Apply `action` to `username`, retrying up to `max_retries` attempts.
    ///
    /// ## State machine
    /// - success status: return `true` immediately
    /// - rate limited: sleep `rate_limit_backoff`, try again
    /// - other status or transport error: sleep `failure_backoff`, try again
    /// - budget spent: return `false`
    ///
    /// The backoff also follows the final failed attempt, so a rate-limited
    /// user leaves the window to cool down before the next user is tried.
    pub async fn mutate(&self, username: &str, action: FollowAction, max_retries: u32) -> bool {
        for attempt in 1..=max_retries {
            let backoff = match self.api.send_mutation(username, action).await {
                Ok(MutationStatus::Success) => return true,
                Ok(MutationStatus::RateLimited) => {
                    warn!(
                        "Rate limit hit while trying to {} {} (attempt {}/{})",
                        action, username, attempt, max_retries
                    );
                    self.policy.rate_limit_backoff
                }
                Ok(MutationStatus::Failed(code)) => {
                    warn!(
                        "Request to {} {} failed with status {} (attempt {}/{})",
                        action, username, code, attempt, max_retries
                    );
                    self.policy.failure_backoff
                }
                Err(e) => {
                    warn!(
                        "Request to {} {} failed: {} (attempt {}/{})",
                        action, username, e, attempt, max_retries
                    );
                    self.policy.failure_backoff
                }
            };

            tokio::time::sleep(backoff).await;
        }

        info!("Giving up on {} {} after {} attempts", action, username, max_retries);
        false
    }
}
