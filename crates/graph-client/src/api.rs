//! The seam between the engine and the remote social graph.
//!
//! Everything above this trait (fetcher, mutation client, driver) is
//! transport-agnostic, which lets tests swap in an in-memory graph.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{FollowAction, ListKind, MutationStatus, Username};

/// Read and write operations the engine needs from the social-graph API.
///
/// ## Design Note
/// - `list_page` returns an error for any non-success response; the caller
///   treats that as fatal.
/// - `send_mutation` classifies the response instead of failing on it, so
///   the retry loop can decide how long to back off. `Err` is reserved for
///   transport problems.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Fetch one page (1-based) of the acting account's followers or following.
    async fn list_page(&self, kind: ListKind, page: u32, per_page: u32) -> Result<Vec<Username>>;

    /// Issue a single follow or unfollow call for `username`.
    async fn send_mutation(&self, username: &str, action: FollowAction) -> Result<MutationStatus>;
}

#[async_trait]
impl<T: GraphApi + ?Sized> GraphApi for Arc<T> {
    async fn list_page(&self, kind: ListKind, page: u32, per_page: u32) -> Result<Vec<Username>> {
        (**self).list_page(kind, page, per_page).await
    }

    async fn send_mutation(&self, username: &str, action: FollowAction) -> Result<MutationStatus> {
        (**self).send_mutation(username, action).await
    }
}
