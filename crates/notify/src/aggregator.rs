//! Outcome aggregator and the end-of-operation report.
//!
//! The aggregator is plain owned state: the driver holds it and mutates it
//! through `&mut self`, so there is no hidden global list and no locking.
//! Sequences only grow until a flush is delivered; a failed flush leaves
//! them untouched so the next flush resends everything.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

use crate::error::Result;
use crate::message::Message;
use crate::sink::NotificationSink;

/// Sent instead of a report when nothing was recorded.
pub const NO_CHANGES_MESSAGE: &str = "No changes in followers/following today.";

/// Title of the embed carrying the JSON report.
pub const REPORT_TITLE: &str = "GitHub Follow/Unfollow Report";

/// The four outcome buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeCategory {
    Followed,
    Unfollowed,
    FailedFollow,
    FailedUnfollow,
}

impl OutcomeCategory {
    /// Report order, also used for the summary line.
    pub const ALL: [OutcomeCategory; 4] = [
        OutcomeCategory::Followed,
        OutcomeCategory::Unfollowed,
        OutcomeCategory::FailedFollow,
        OutcomeCategory::FailedUnfollow,
    ];

    /// Human label used in the summary line
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeCategory::Followed => "Followed",
            OutcomeCategory::Unfollowed => "Unfollowed",
            OutcomeCategory::FailedFollow => "Failed to follow",
            OutcomeCategory::FailedUnfollow => "Failed to unfollow",
        }
    }
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Count plus usernames for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub count: usize,
    pub users: Vec<String>,
}

impl CategoryReport {
    fn from_users(users: &[String]) -> Self {
        Self {
            count: users.len(),
            users: users.to_vec(),
        }
    }
}

/// Immutable snapshot of the aggregator at flush time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub followed: CategoryReport,
    pub unfollowed: CategoryReport,
    pub failed_follows: CategoryReport,
    pub failed_unfollows: CategoryReport,
}

impl Report {
    fn category(&self, category: OutcomeCategory) -> &CategoryReport {
        match category {
            OutcomeCategory::Followed => &self.followed,
            OutcomeCategory::Unfollowed => &self.unfollowed,
            OutcomeCategory::FailedFollow => &self.failed_follows,
            OutcomeCategory::FailedUnfollow => &self.failed_unfollows,
        }
    }

    /// `"<Label>: <count>"` for every non-empty category, comma-joined.
    pub fn summary(&self) -> String {
        OutcomeCategory::ALL
            .iter()
            .filter(|c| self.category(**c).count > 0)
            .map(|c| format!("{}: {}", c.label(), self.category(*c).count))
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn is_empty(&self) -> bool {
        OutcomeCategory::ALL
            .iter()
            .all(|c| self.category(*c).count == 0)
    }
}

/// Accumulates per-user outcomes across operations until a flush succeeds.
#[derive(Debug, Default)]
pub struct Aggregator {
    account: String,
    followed: Vec<String>,
    unfollowed: Vec<String>,
    failed_follow: Vec<String>,
    failed_unfollow: Vec<String>,
}

impl Aggregator {
    /// Create an empty aggregator reporting on behalf of `account`.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..Self::default()
        }
    }

    /// Append `username` to `category`.
    pub fn record(&mut self, category: OutcomeCategory, username: impl Into<String>) {
        let username = username.into();
        info!("Tracked: {} {}", category, username);
        self.bucket_mut(category).push(username);
    }

    /// Usernames recorded under `category`, in recording order.
    pub fn users(&self, category: OutcomeCategory) -> &[String] {
        match category {
            OutcomeCategory::Followed => &self.followed,
            OutcomeCategory::Unfollowed => &self.unfollowed,
            OutcomeCategory::FailedFollow => &self.failed_follow,
            OutcomeCategory::FailedUnfollow => &self.failed_unfollow,
        }
    }

    pub fn is_empty(&self) -> bool {
        OutcomeCategory::ALL.iter().all(|c| self.users(*c).is_empty())
    }

    /// Snapshot the current state.
    pub fn report(&self) -> Report {
        Report {
            followed: CategoryReport::from_users(&self.followed),
            unfollowed: CategoryReport::from_users(&self.unfollowed),
            failed_follows: CategoryReport::from_users(&self.failed_follow),
            failed_unfollows: CategoryReport::from_users(&self.failed_unfollow),
        }
    }

    /// Drop every recorded outcome.
    pub fn clear(&mut self) {
        self.followed.clear();
        self.unfollowed.clear();
        self.failed_follow.clear();
        self.failed_unfollow.clear();
    }

    /// Build the outbound report message for the current state.
    ///
    /// Returns `None` when nothing was recorded.
    pub fn report_message(&self) -> Result<Option<Message>> {
        if self.is_empty() {
            return Ok(None);
        }
        let report = self.report();
        let json = serde_json::to_string_pretty(&report)?;
        let message = Message::text(format!(
            "GitHub({}) Report: {}",
            self.account,
            report.summary()
        ))
        .with_embed(REPORT_TITLE, format!("```json\n{}\n```", json));
        Ok(Some(message))
    }

    /// Send the accumulated report through `sink`.
    ///
    /// ## Behavior
    /// - nothing recorded: send [`NO_CHANGES_MESSAGE`], nothing to clear
    /// - otherwise send summary + JSON report as one message
    /// - delivered: clear all four sequences
    /// - not delivered: keep everything for the next flush
    ///
    /// Returns whether the sink accepted the message.
    pub async fn flush<S: NotificationSink + ?Sized>(&mut self, sink: &S) -> bool {
        let message = match self.report_message() {
            Ok(Some(message)) => message,
            Ok(None) => {
                return match sink.post(&Message::text(NO_CHANGES_MESSAGE)).await {
                    Ok(()) => true,
                    Err(e) => {
                        warn!("Failed to send no-changes message via {}: {}", sink.name(), e);
                        false
                    }
                };
            }
            Err(e) => {
                warn!("Failed to serialize follow report: {}", e);
                return false;
            }
        };

        match sink.post(&message).await {
            Ok(()) => {
                info!("Follow report sent via {}", sink.name());
                self.clear();
                true
            }
            Err(e) => {
                warn!(
                    "Failed to send follow report via {}: {}; keeping state for the next flush",
                    sink.name(),
                    e
                );
                false
            }
        }
    }

    fn bucket_mut(&mut self, category: OutcomeCategory) -> &mut Vec<String> {
        match category {
            OutcomeCategory::Followed => &mut self.followed,
            OutcomeCategory::Unfollowed => &mut self.unfollowed,
            OutcomeCategory::FailedFollow => &mut self.failed_follow,
            OutcomeCategory::FailedUnfollow => &mut self.failed_unfollow,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NotifyError;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Collects messages; can be switched to fail.
    #[derive(Default)]
    struct Recording {
        fail: AtomicBool,
        sent: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl NotificationSink for Recording {
        fn name(&self) -> &str {
            "recording"
        }

        async fn post(&self, message: &Message) -> Result<()> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(NotifyError::Status(500));
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn populated() -> Aggregator {
        let mut aggregator = Aggregator::new("octo");
        aggregator.record(OutcomeCategory::Followed, "a");
        aggregator.record(OutcomeCategory::FailedUnfollow, "d");
        aggregator
    }

    #[test]
    fn test_record_keeps_order_per_category() {
        let mut aggregator = Aggregator::new("octo");
        aggregator.record(OutcomeCategory::Followed, "x");
        aggregator.record(OutcomeCategory::Unfollowed, "y");
        aggregator.record(OutcomeCategory::Followed, "w");

        assert_eq!(aggregator.users(OutcomeCategory::Followed), ["x", "w"]);
        assert_eq!(aggregator.users(OutcomeCategory::Unfollowed), ["y"]);
        assert!(aggregator.users(OutcomeCategory::FailedFollow).is_empty());
    }

    #[test]
    fn test_summary_lists_only_non_empty_categories() {
        let report = populated().report();
        assert_eq!(report.summary(), "Followed: 1, Failed to unfollow: 1");
    }

    #[test]
    fn test_summary_all_categories_in_order() {
        let mut aggregator = Aggregator::new("octo");
        aggregator.record(OutcomeCategory::FailedUnfollow, "d");
        aggregator.record(OutcomeCategory::FailedFollow, "c");
        aggregator.record(OutcomeCategory::Unfollowed, "b");
        aggregator.record(OutcomeCategory::Followed, "a");
        aggregator.record(OutcomeCategory::Followed, "e");

        assert_eq!(
            aggregator.report().summary(),
            "Followed: 2, Unfollowed: 1, Failed to follow: 1, Failed to unfollow: 1"
        );
    }

    #[test]
    fn test_report_message_embeds_pretty_json() {
        let message = populated().report_message().unwrap().unwrap();
        let description = &message.embeds[0].description;
        let json = description
            .trim_start_matches("```json\n")
            .trim_end_matches("\n```");

        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report, populated().report());
        assert!(Aggregator::new("octo").report_message().unwrap().is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let value = serde_json::to_value(populated().report()).unwrap();
        assert_eq!(value["followed"]["count"], 1);
        assert_eq!(value["followed"]["users"][0], "a");
        assert_eq!(value["unfollowed"]["count"], 0);
        assert_eq!(value["failed_follows"]["users"].as_array().unwrap().len(), 0);
        assert_eq!(value["failed_unfollows"]["users"][0], "d");
    }

    #[tokio::test]
    async fn test_flush_sends_report_and_clears() {
        let sink = Recording::default();
        let mut aggregator = populated();

        assert!(aggregator.flush(&sink).await);
        assert!(aggregator.is_empty());

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(
            sent[0].content,
            "GitHub(octo) Report: Followed: 1, Failed to unfollow: 1"
        );
        assert_eq!(sent[0].embeds[0].title, REPORT_TITLE);
        assert!(sent[0].embeds[0].description.starts_with("```json\n{"));
    }

    #[tokio::test]
    async fn test_failed_flush_retains_state() {
        let sink = Recording::default();
        sink.fail.store(true, Ordering::SeqCst);
        let mut aggregator = populated();
        let before = aggregator.report();

        assert!(!aggregator.flush(&sink).await);
        assert_eq!(aggregator.report(), before);

        // Next cycle resends old data plus new additions
        sink.fail.store(false, Ordering::SeqCst);
        aggregator.record(OutcomeCategory::Unfollowed, "z");
        assert!(aggregator.flush(&sink).await);
        assert!(aggregator.is_empty());
        assert_eq!(
            sink.sent.lock().unwrap()[0].content,
            "GitHub(octo) Report: Followed: 1, Unfollowed: 1, Failed to unfollow: 1"
        );
    }

    #[tokio::test]
    async fn test_flush_with_nothing_recorded() {
        let sink = Recording::default();
        let mut aggregator = Aggregator::new("octo");

        assert!(aggregator.flush(&sink).await);

        let sent = sink.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0], Message::text(NO_CHANGES_MESSAGE));
    }
}
