//! Mock generator: logs the request and returns a canned reply.

use super::{GenerateError, TextGenerator};
use async_trait::async_trait;

const DEFAULT_REPLY: &str = "generated reply";

/// Stand-in for a model backend. Returns the same text for every request.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    reply: String,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY)
    }
}

impl MockGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, user_text: &str, context_hint: &str) -> Result<String, GenerateError> {
        log::debug!(
            "mock generator: {} chars with context {}",
            user_text.chars().count(),
            context_hint
        );
        Ok(self.reply.clone())
    }
}
