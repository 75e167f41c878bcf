//! Intent handlers: turn a classified message into reply text.
//!
//! Generative handlers ask the text generator with the context hint for their intent and wrap
//! the result in a label (e.g. `ProductReply(...)`). Static handlers return a fixed reply.

mod registry;

pub use registry::{HandlerRegistry, HandlerRegistryBuilder, RegistryError};

use async_trait::async_trait;
use std::sync::Arc;

use crate::context::ContextProvider;
use crate::intent::Intent;
use crate::llm::{GenerateError, TextGenerator};
use crate::message::Message;

/// Turns a message into reply text. Implementations hold no per-message state.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Name used in logs (e.g. "product").
    fn name(&self) -> &str;

    async fn process(&self, message: &Message) -> Result<String, GenerateError>;
}

/// Asks the generator with the context hint for `intent` and returns `"{label}({generated})"`.
pub struct GenerativeHandler {
    name: String,
    intent: Intent,
    reply_label: String,
    context: Arc<ContextProvider>,
    generator: Arc<dyn TextGenerator>,
}

impl GenerativeHandler {
    pub fn new(
        name: impl Into<String>,
        intent: Intent,
        reply_label: impl Into<String>,
        context: Arc<ContextProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            name: name.into(),
            intent,
            reply_label: reply_label.into(),
            context,
            generator,
        }
    }

    pub fn product(context: Arc<ContextProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new("product", Intent::ProductInquiry, "ProductReply", context, generator)
    }

    pub fn reservation(context: Arc<ContextProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new("reservation", Intent::Reservation, "ReservationReply", context, generator)
    }

    pub fn greeting(context: Arc<ContextProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new("greeting", Intent::Greeting, "GreetingReply", context, generator)
    }

    /// Fallback for unrecognised messages; uses the `Unknown` context.
    pub fn fallback(context: Arc<ContextProvider>, generator: Arc<dyn TextGenerator>) -> Self {
        Self::new("default", Intent::Unknown, "DefaultReply", context, generator)
    }
}

#[async_trait]
impl Handler for GenerativeHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, message: &Message) -> Result<String, GenerateError> {
        let hint = self.context.context_for(self.intent);
        let generated = self.generator.generate(message.text(), hint).await?;
        Ok(format!("{}({})", self.reply_label, generated))
    }
}

/// Returns the same reply for every message without calling the generator.
pub struct StaticHandler {
    name: String,
    reply: String,
}

impl StaticHandler {
    pub fn new(name: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reply: reply.into(),
        }
    }
}

#[async_trait]
impl Handler for StaticHandler {
    fn name(&self) -> &str {
        &self.name
    }

    async fn process(&self, _message: &Message) -> Result<String, GenerateError> {
        Ok(self.reply.clone())
    }
}
