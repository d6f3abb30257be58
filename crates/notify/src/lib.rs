//! Notification delivery and outcome reporting.
//!
//! ## Components
//! - [`NotificationSink`]: "post a message" seam, with [`DiscordWebhook`]
//!   and [`LogSink`] implementations
//! - [`Aggregator`]: records follow/unfollow outcomes and flushes them as a
//!   single [`Report`]

pub mod aggregator;
pub mod discord;
pub mod error;
pub mod message;
pub mod sink;

pub use aggregator::{
    Aggregator, CategoryReport, NO_CHANGES_MESSAGE, OutcomeCategory, REPORT_TITLE, Report,
};
pub use discord::{DEFAULT_WEBHOOK_TIMEOUT, DiscordWebhook};
pub use error::{NotifyError, Result};
pub use message::{Embed, Message};
pub use sink::{LogSink, NotificationSink};
