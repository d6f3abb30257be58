//! Social-graph API client for the follow reconciliation engine.
//!
//! This crate provides:
//! - [`GraphApi`], the trait the rest of the workspace programs against
//! - [`GitHubClient`], its implementation over the GitHub REST API
//! - [`fetch_all`], the paginated followers/following fetcher
//! - [`MutationClient`], the follow/unfollow caller with bounded retry
//!
//! ## Example Usage
//! ```ignore
//! use graph_client::{fetch_all, GitHubClient, ListKind, MutationClient, RetryPolicy};
//!
//! let api = GitHubClient::new(graph_client::DEFAULT_API_URL, "octocat", &token)?;
//! let followers = fetch_all(&api, ListKind::Followers, 100).await?;
//!
//! let mutations = MutationClient::new(&api, RetryPolicy::default());
//! mutations.follow("hubot").await;
//! ```

pub mod api;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod mutation;
pub mod types;

pub use api::GraphApi;
pub use error::{GraphError, Result};
pub use fetcher::{DEFAULT_PAGE_SIZE, fetch_all};
pub use github::{DEFAULT_API_URL, GitHubClient};
pub use mutation::{MutationClient, RetryPolicy};
pub use types::{FollowAction, FollowSet, ListKind, ListedUser, MutationStatus, Username};
