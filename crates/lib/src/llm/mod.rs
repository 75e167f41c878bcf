//! Text generation abstraction.
//!
//! Handlers ask a [`TextGenerator`] for reply text given the user's message and a context hint.
//! Only a mock backend ships; [`LoggingGenerator`] wraps any backend to log each exchange.

mod logging;
mod mock;

pub use logging::LoggingGenerator;
pub use mock::MockGenerator;

use async_trait::async_trait;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("generator unavailable: {0}")]
    Unavailable(String),
    #[error("generator rejected request: {0}")]
    Rejected(String),
}

/// Produces reply text for a user message, biased by a context hint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, user_text: &str, context_hint: &str) -> Result<String, GenerateError>;
}
