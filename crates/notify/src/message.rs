//! Outbound message shape: free text plus optional structured embeds.

use serde::Serialize;

/// A single message handed to a [`crate::NotificationSink`].
///
/// Serializes to the Discord webhook body; `embeds` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

/// Structured attachment rendered by the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
}

impl Message {
    /// Plain text message with no attachments.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            embeds: Vec::new(),
        }
    }

    /// Add an embed (builder pattern).
    pub fn with_embed(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.embeds.push(Embed {
            title: title.into(),
            description: description.into(),
        });
        self
    }
}
