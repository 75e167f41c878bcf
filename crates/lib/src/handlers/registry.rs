//! Handler registry: intent -> handler, with the `Unknown` handler as mandatory fallback.

use std::collections::HashMap;
use std::sync::Arc;

use super::{GenerativeHandler, Handler, StaticHandler};
use crate::config::{GreetingMode, HandlersConfig};
use crate::context::ContextProvider;
use crate::intent::Intent;
use crate::llm::TextGenerator;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no handler registered for the fallback intent (unknown)")]
    MissingFallback,
}

/// Collects handlers before the registry is frozen.
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<Intent, Arc<dyn Handler>>,
}

impl HandlerRegistryBuilder {
    /// Register `handler` for `intent`. A later registration for the same intent replaces the earlier one.
    pub fn register(mut self, intent: Intent, handler: Arc<dyn Handler>) -> Self {
        if self.handlers.insert(intent, handler).is_some() {
            log::debug!("registry: replaced handler for {}", intent);
        }
        self
    }

    /// Freeze the registry. Fails when no handler is registered for `Intent::Unknown`.
    pub fn build(self) -> Result<HandlerRegistry, RegistryError> {
        let fallback = self
            .handlers
            .get(&Intent::Unknown)
            .cloned()
            .ok_or(RegistryError::MissingFallback)?;
        Ok(HandlerRegistry {
            handlers: self.handlers,
            fallback,
        })
    }
}

/// Read-only intent -> handler map. Every intent resolves, either directly or to the fallback.
pub struct HandlerRegistry {
    handlers: HashMap<Intent, Arc<dyn Handler>>,
    fallback: Arc<dyn Handler>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Default handler set: product, reservation, greeting (static or generative per config) and the fallback.
    pub fn from_config(
        config: &HandlersConfig,
        context: Arc<ContextProvider>,
        generator: Arc<dyn TextGenerator>,
    ) -> Result<Self, RegistryError> {
        let greeting: Arc<dyn Handler> = match config.greeting {
            GreetingMode::Static => Arc::new(StaticHandler::new("greeting", &config.greeting_reply)),
            GreetingMode::Generative => {
                Arc::new(GenerativeHandler::greeting(context.clone(), generator.clone()))
            }
        };
        Self::builder()
            .register(
                Intent::ProductInquiry,
                Arc::new(GenerativeHandler::product(context.clone(), generator.clone())),
            )
            .register(
                Intent::Reservation,
                Arc::new(GenerativeHandler::reservation(context.clone(), generator.clone())),
            )
            .register(Intent::Greeting, greeting)
            .register(
                Intent::Unknown,
                Arc::new(GenerativeHandler::fallback(context, generator)),
            )
            .build()
    }

    /// Handler for `intent`, or the fallback when none is registered.
    pub fn resolve(&self, intent: Intent) -> Arc<dyn Handler> {
        match self.handlers.get(&intent) {
            Some(h) => h.clone(),
            None => {
                log::debug!("registry: no handler for {}, using fallback", intent);
                self.fallback.clone()
            }
        }
    }

    /// Whether `intent` has its own handler (as opposed to resolving to the fallback).
    pub fn contains(&self, intent: Intent) -> bool {
        self.handlers.contains_key(&intent)
    }
}
