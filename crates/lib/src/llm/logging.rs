//! Logging decorator: records every request and response of the wrapped generator.

use super::{GenerateError, TextGenerator};
use async_trait::async_trait;

/// Wraps a generator and logs each exchange at info level (failures at warn).
pub struct LoggingGenerator<G> {
    inner: G,
}

impl<G: TextGenerator> LoggingGenerator<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for LoggingGenerator<G> {
    async fn generate(&self, user_text: &str, context_hint: &str) -> Result<String, GenerateError> {
        log::info!(
            "generator request: text={:?} context={}",
            user_text,
            context_hint
        );
        match self.inner.generate(user_text, context_hint).await {
            Ok(reply) => {
                log::info!("generator response: {:?}", reply);
                Ok(reply)
            }
            Err(e) => {
                log::warn!("generator failed: {}", e);
                Err(e)
            }
        }
    }
}
