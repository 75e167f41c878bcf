//! Console channel: prints replies to stdout.

use super::{ChannelError, ChannelSender};
use async_trait::async_trait;
use std::io::Write;

pub struct ConsoleChannel {
    id: String,
}

impl Default for ConsoleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self {
            id: "console".to_string(),
        }
    }
}

#[async_trait]
impl ChannelSender for ConsoleChannel {
    fn id(&self) -> &str {
        &self.id
    }

    async fn send(&self, recipient: &str, content: &str) -> Result<(), ChannelError> {
        log::info!("console channel: sending to {}", recipient);
        let mut out = std::io::stdout().lock();
        writeln!(out, "[{}] {}", recipient, content)
            .and_then(|_| out.flush())
            .map_err(|e| ChannelError::Delivery(e.to_string()))
    }
}
