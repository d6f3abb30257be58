//! The outbound notification seam and its log-only implementation.

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;
use crate::message::Message;

/// Anything that can deliver a [`Message`].
///
/// Delivery failure is reported through `Err` and is never fatal to the
/// caller; only the report flush reacts to it.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Returns the name of this sink (for logging)
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn post(&self, message: &Message) -> Result<()>;
}

#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn post(&self, message: &Message) -> Result<()> {
        (**self).post(message).await
    }
}

/// Writes every message to the log. Used when no webhook is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn post(&self, message: &Message) -> Result<()> {
        info!("{}", message.content);
        for embed in &message.embeds {
            info!("{}\n{}", embed.title, embed.description);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_sink_always_accepts() {
        let message = Message::text("GitHub(octo) Report: Followed: 1").with_embed("Title", "body");
        assert!(LogSink.post(&message).await.is_ok());
        assert_eq!(LogSink.name(), "log");
    }
}
