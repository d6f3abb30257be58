//! Discord webhook sink.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use crate::error::{NotifyError, Result};
use crate::message::Message;
use crate::sink::NotificationSink;

/// Upper bound on one webhook call, connect included.
pub const DEFAULT_WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Posts messages as JSON to a Discord webhook URL.
///
/// Discord answers `204 No Content` for an accepted webhook execution;
/// anything else counts as a failed delivery.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: Client,
    url: String,
}

impl DiscordWebhook {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_WEBHOOK_TIMEOUT)
    }

    /// Build a webhook sink whose calls give up after `timeout`.
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("fu/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    fn name(&self) -> &str {
        "discord"
    }

    #[instrument(skip_all)]
    async fn post(&self, message: &Message) -> Result<()> {
        let response = self.client.post(&self.url).json(message).send().await?;
        let status = response.status();

        if status != StatusCode::NO_CONTENT {
            return Err(NotifyError::Status(status.as_u16()));
        }
        debug!("Discord accepted message ({} embeds)", message.embeds.len());
        Ok(())
    }
}
