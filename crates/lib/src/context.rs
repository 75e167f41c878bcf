//! Context provider: fixed hint label per intent, passed to the text generator.

use crate::config::ContextConfig;
use crate::intent::Intent;

#[derive(Debug, Clone, Default)]
pub struct ContextProvider {
    labels: ContextConfig,
}

impl ContextProvider {
    pub fn new(labels: ContextConfig) -> Self {
        Self { labels }
    }

    /// Hint label for `intent`. Defined for every intent, including `Unknown`.
    pub fn context_for(&self, intent: Intent) -> &str {
        match intent {
            Intent::ProductInquiry => &self.labels.product_inquiry,
            Intent::Reservation => &self.labels.reservation,
            Intent::Greeting => &self.labels.greeting,
            Intent::Unknown => &self.labels.unknown,
        }
    }
}
