//! Coordinator: classify -> resolve handler -> process -> send, one message at a time.
//!
//! Each message goes through received, classified, dispatched and sent in that order; a
//! failure stops that message only. Nothing is sent when the handler fails, and a failed send
//! is reported to the caller rather than dropped.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::channels::{ChannelError, ChannelSender};
use crate::classifier::IntentClassifier;
use crate::config::Config;
use crate::context::ContextProvider;
use crate::handlers::HandlerRegistry;
use crate::intent::Intent;
use crate::llm::{GenerateError, LoggingGenerator, MockGenerator, TextGenerator};
use crate::message::Message;

/// Outcome of one successfully delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Per-message id; appears in every log line for this dispatch.
    pub id: Uuid,
    pub intent: Intent,
    pub recipient: String,
    pub reply: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("{intent} handler failed: {source}")]
    Handler {
        intent: Intent,
        #[source]
        source: GenerateError,
    },
    #[error("sending reply to {recipient} failed: {source}")]
    Send {
        recipient: String,
        #[source]
        source: ChannelError,
    },
}

/// Counters returned by [`Coordinator::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
}

pub struct Coordinator {
    classifier: IntentClassifier,
    registry: HandlerRegistry,
    channel: Arc<dyn ChannelSender>,
}

impl Coordinator {
    pub fn new(
        classifier: IntentClassifier,
        registry: HandlerRegistry,
        channel: Arc<dyn ChannelSender>,
    ) -> Self {
        Self {
            classifier,
            registry,
            channel,
        }
    }

    /// Wire classifier, context labels, mock generator and the default handler set from config.
    /// Invalid keyword rules fail here, before any message is handled.
    pub fn from_config(config: &Config, channel: Arc<dyn ChannelSender>) -> Result<Self> {
        let classifier = IntentClassifier::from_config(&config.classifier)
            .context("building intent classifier")?;
        let context = Arc::new(ContextProvider::new(config.context.clone()));
        let mock = MockGenerator::new(config.generator.canned_reply.clone());
        let generator: Arc<dyn TextGenerator> = if config.generator.log_requests {
            Arc::new(LoggingGenerator::new(mock))
        } else {
            Arc::new(mock)
        };
        let registry = HandlerRegistry::from_config(&config.handlers, context, generator)
            .context("building handler registry")?;
        log::info!(
            "coordinator ready: {} classifier rule(s), channel {}",
            config.classifier.rules.len(),
            channel.id()
        );
        Ok(Self::new(classifier, registry, channel))
    }

    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Handle one message end to end.
    pub async fn handle(&self, message: Message) -> Result<Delivery, DispatchError> {
        let id = Uuid::new_v4();
        log::debug!("[{}] received from {}", id, message.sender());

        let intent = self.classifier.classify(message.text());
        log::info!("[{}] classified as {}", id, intent);

        let handler = self.registry.resolve(intent);
        log::debug!("[{}] dispatching to {} handler", id, handler.name());
        let reply = handler
            .process(&message)
            .await
            .map_err(|source| DispatchError::Handler { intent, source })?;

        self.channel
            .send(message.sender(), &reply)
            .await
            .map_err(|source| DispatchError::Send {
                recipient: message.sender().to_string(),
                source,
            })?;
        log::debug!("[{}] sent via {}", id, self.channel.id());

        Ok(Delivery {
            id,
            intent,
            recipient: message.sender().to_string(),
            reply,
        })
    }

    /// Drain `inbound_rx`, handling messages one at a time until the sender side closes.
    /// A failed message is logged and counted; the loop moves on to the next one.
    pub async fn run(&self, mut inbound_rx: mpsc::Receiver<Message>) -> DispatchStats {
        let mut stats = DispatchStats::default();
        while let Some(message) = inbound_rx.recv().await {
            match self.handle(message).await {
                Ok(_) => stats.delivered += 1,
                Err(e) => {
                    log::warn!("dispatch failed: {}", e);
                    stats.failed += 1;
                }
            }
        }
        log::info!(
            "inbound closed: {} delivered, {} failed",
            stats.delivered,
            stats.failed
        );
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClassifierConfig, KeywordRuleConfig};
    use async_trait::async_trait;

    struct NullChannel;

    #[async_trait]
    impl ChannelSender for NullChannel {
        fn id(&self) -> &str {
            "null"
        }

        async fn send(&self, _: &str, _: &str) -> Result<(), ChannelError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn from_config_uses_configured_reply() {
        let mut config = Config::default();
        config.generator.canned_reply = "canned".to_string();
        config.generator.log_requests = true;
        let c = Coordinator::from_config(&config, Arc::new(NullChannel)).unwrap();
        let d = c.handle(Message::new("U", "precio")).await.unwrap();
        assert_eq!(d.reply, "ProductReply(canned)");
        assert_eq!(d.intent, Intent::ProductInquiry);
        assert_eq!(d.recipient, "U");
    }

    #[test]
    fn from_config_rejects_blank_keyword() {
        let mut config = Config::default();
        config.classifier = ClassifierConfig {
            rules: vec![KeywordRuleConfig::new(Intent::Greeting, &[""])],
        };
        let err = Coordinator::from_config(&config, Arc::new(NullChannel)).err();
        let err = err.map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("building intent classifier"));
    }

    #[tokio::test]
    async fn each_dispatch_gets_its_own_id() {
        let c = Coordinator::from_config(&Config::default(), Arc::new(NullChannel)).unwrap();
        let a = c.handle(Message::new("U", "hola")).await.unwrap();
        let b = c.handle(Message::new("U", "hola")).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(a.reply, b.reply);
    }
}
