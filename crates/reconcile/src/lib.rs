//! Reciprocal-follow reconciliation.
//!
//! This crate provides:
//! - [`Operation`]: follow-back or unfollow-nonreciprocal
//! - [`target_list`]: the set difference each operation acts on
//! - [`Reconciler`]: fetch, mutate, record and report for one operation
//! - [`export_snapshot`]: dump the fetched lists for visualization
//!
//! ## Example Usage
//! ```ignore
//! use reconcile::{Reconciler, ReconcilerConfig};
//!
//! let mut reconciler = Reconciler::new(api, sink, ReconcilerConfig::new("octocat"));
//! for summary in reconciler.run_all().await? {
//!     println!("{:?}", summary);
//! }
//! ```

pub mod driver;
pub mod export;
pub mod operation;
pub mod targets;

pub use driver::{OperationSummary, Reconciler, ReconcilerConfig, Snapshot};
pub use export::{NetworkGraph, NetworkNode, Relationship, export_snapshot, export_snapshot_dated};
pub use operation::Operation;
pub use targets::target_list;
