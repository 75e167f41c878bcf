//! Outbound channels.
//!
//! A [`ChannelSender`] delivers a finished reply to a recipient. Delivery is fire-and-forget:
//! no acknowledgment and no retry, but failures are returned to the caller.

mod console;

pub use console::ConsoleChannel;

use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Delivers reply text to a recipient.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Channel id (e.g. "console").
    fn id(&self) -> &str;

    /// Send `content` to `recipient`.
    async fn send(&self, recipient: &str, content: &str) -> Result<(), ChannelError>;
}
