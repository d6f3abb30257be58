//! # Reconciliation Driver
//!
//! Coordinates one operation end to end:
//! 1. Fetch following and followers (fatal on error)
//! 2. Compute the target list
//! 3. Mutate each target, recording the outcome and notifying
//! 4. Flush the aggregated report
//!
//! Everything runs sequentially on the calling task. The aggregator lives
//! inside the driver, so both operations of a run share it and the report
//! flushed after each operation covers whatever is still unreported.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use graph_client::{
    DEFAULT_PAGE_SIZE, FollowSet, GraphApi, ListKind, MutationClient, RetryPolicy, fetch_all,
};
use notify::{Aggregator, Message, NotificationSink};

use crate::operation::Operation;
use crate::targets::target_list;

/// Knobs for a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    /// Acting account, used to sign per-user messages and the report
    pub account: String,
    pub page_size: u32,
    pub retry: RetryPolicy,
    /// Pause between processed users
    pub pace: Duration,
}

impl ReconcilerConfig {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
            pace: Duration::from_secs(2),
        }
    }
}

/// What one operation did, for console output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationSummary {
    pub operation: Operation,
    pub targets: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// `None` when there was nothing to do and no flush happened
    pub report_delivered: Option<bool>,
}

/// Both list snapshots taken for one operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub followers: FollowSet,
    pub following: FollowSet,
}

/// Drives follow-back and unfollow passes against a [`GraphApi`].
pub struct Reconciler<A, S> {
    api: A,
    sink: S,
    aggregator: Aggregator,
    config: ReconcilerConfig,
}

impl<A: GraphApi, S: NotificationSink> Reconciler<A, S> {
    pub fn new(api: A, sink: S, config: ReconcilerConfig) -> Self {
        let aggregator = Aggregator::new(config.account.clone());
        Self {
            api,
            sink,
            aggregator,
            config,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }

    /// Fetch following then followers, once each.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let following = fetch_all(&self.api, ListKind::Following, self.config.page_size)
            .await
            .with_context(|| {
                format!("Failed to fetch accounts followed by {}", self.config.account)
            })?;
        let followers = fetch_all(&self.api, ListKind::Followers, self.config.page_size)
            .await
            .with_context(|| format!("Failed to fetch followers of {}", self.config.account))?;

        Ok(Snapshot {
            followers,
            following,
        })
    }

    /// Run follow-back then unfollow-nonreciprocal.
    pub async fn run_all(&mut self) -> Result<Vec<OperationSummary>> {
        let mut summaries = Vec::with_capacity(Operation::ALL.len());
        for operation in Operation::ALL {
            summaries.push(self.reconcile(operation).await?);
        }
        Ok(summaries)
    }

    /// Apply one operation against freshly fetched snapshots.
    ///
    /// # Returns
    /// * `Ok(OperationSummary)` - once every target was processed
    /// * `Err` - if either list could not be fetched; nothing was mutated
    pub async fn reconcile(&mut self, operation: Operation) -> Result<OperationSummary> {
        let start_time = Instant::now();

        let snapshot = self
            .fetch_snapshot()
            .await
            .with_context(|| format!("Cannot run {}", operation))?;
        let targets = target_list(operation, &snapshot.followers, &snapshot.following);

        if targets.is_empty() {
            info!("{}", operation.nothing_to_do_message());
            post_quietly(&self.sink, Message::text(operation.nothing_to_do_message())).await;
            return Ok(OperationSummary {
                operation,
                targets: 0,
                succeeded: 0,
                failed: 0,
                report_delivered: None,
            });
        }

        info!(
            "{}: {} accounts to process ({} followers, {} following)",
            operation,
            targets.len(),
            snapshot.followers.len(),
            snapshot.following.len()
        );

        let mutations = MutationClient::new(&self.api, self.config.retry.clone());
        let mut succeeded = 0;

        for (i, username) in targets.iter().enumerate() {
            let ok = mutations
                .mutate(username, operation.action(), self.config.retry.max_retries)
                .await;
            let progress = operation.progress_message(username, ok);
            info!("{}. {}", i + 1, progress);

            if ok {
                succeeded += 1;
                self.aggregator.record(operation.success_category(), username.as_str());
                let (subject, body) = operation.user_message(username, &self.config.account);
                post_quietly(
                    &self.sink,
                    Message::text(format!("Message for {} - {}: {}", username, subject, body)),
                )
                .await;
            } else {
                self.aggregator.record(operation.failure_category(), username.as_str());
            }
            post_quietly(&self.sink, Message::text(progress)).await;

            tokio::time::sleep(self.config.pace).await;
        }

        let report_delivered = self.aggregator.flush(&self.sink).await;

        info!(
            "Finished {} in {:.2?}: {} succeeded, {} failed",
            operation,
            start_time.elapsed(),
            succeeded,
            targets.len() - succeeded
        );

        Ok(OperationSummary {
            operation,
            targets: targets.len(),
            succeeded,
            failed: targets.len() - succeeded,
            report_delivered: Some(report_delivered),
        })
    }
}

/// Deliver a message, logging instead of failing when the sink refuses it.
async fn post_quietly<S: NotificationSink + ?Sized>(sink: &S, message: Message) {
    if let Err(e) = sink.post(&message).await {
        warn!("Notification via {} failed: {}", sink.name(), e);
    }
}
