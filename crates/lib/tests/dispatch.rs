//! Integration test: route messages through the coordinator with a recording channel and a
//! recording generator, and check what reaches the channel.

use async_trait::async_trait;
use concierge::channels::{ChannelError, ChannelSender};
use concierge::classifier::IntentClassifier;
use concierge::config::HandlersConfig;
use concierge::context::ContextProvider;
use concierge::handlers::{GenerativeHandler, HandlerRegistry, StaticHandler};
use concierge::llm::{GenerateError, TextGenerator};
use concierge::{Coordinator, DispatchError, DispatchStats, Intent, Message};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

#[derive(Default)]
struct RecordingChannel {
    sent: Mutex<Vec<(String, String)>>,
    fail_for: Option<String>,
}

impl RecordingChannel {
    fn failing_for(recipient: &str) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail_for: Some(recipient.to_string()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSender for RecordingChannel {
    fn id(&self) -> &str {
        "recording"
    }

    async fn send(&self, recipient: &str, content: &str) -> Result<(), ChannelError> {
        if self.fail_for.as_deref() == Some(recipient) {
            return Err(ChannelError::Delivery("recipient unreachable".to_string()));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.to_string(), content.to_string()));
        Ok(())
    }
}

/// Echoes the context hint so tests can see which context each handler used.
/// Fails for any text containing "boom".
#[derive(Default)]
struct HintGenerator {
    calls: Mutex<usize>,
}

#[async_trait]
impl TextGenerator for HintGenerator {
    async fn generate(&self, user_text: &str, context_hint: &str) -> Result<String, GenerateError> {
        *self.calls.lock().unwrap() += 1;
        if user_text.contains("boom") {
            return Err(GenerateError::Unavailable("quota exceeded".to_string()));
        }
        Ok(format!("gen:{}", context_hint))
    }
}

fn coordinator(
    generator: Arc<HintGenerator>,
    channel: Arc<RecordingChannel>,
) -> Coordinator {
    let registry = HandlerRegistry::from_config(
        &HandlersConfig::default(),
        Arc::new(ContextProvider::default()),
        generator,
    )
    .expect("default registry has a fallback");
    Coordinator::new(IntentClassifier::default(), registry, channel)
}

#[tokio::test]
async fn greeting_gets_fixed_reply_without_generation() {
    let generator = Arc::new(HintGenerator::default());
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(generator.clone(), channel.clone());

    let d = c.handle(Message::new("User1", "Hola")).await.unwrap();

    assert_eq!(d.intent, Intent::Greeting);
    assert_eq!(channel.sent(), vec![("User1".to_string(), "Greeting(Hi!)".to_string())]);
    assert_eq!(*generator.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn product_inquiry_uses_products_context() {
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());

    let d = c
        .handle(Message::new("User2", "Precio del producto A?"))
        .await
        .unwrap();

    assert_eq!(d.intent, Intent::ProductInquiry);
    assert_eq!(d.reply, "ProductReply(gen:products-context)");
    assert_eq!(
        channel.sent(),
        vec![("User2".to_string(), "ProductReply(gen:products-context)".to_string())]
    );
}

#[tokio::test]
async fn reservation_reply_is_wrapped() {
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());

    let d = c.handle(Message::new("User3", "Quiero una reserva")).await.unwrap();

    assert_eq!(d.intent, Intent::Reservation);
    assert_eq!(d.reply, "ReservationReply(gen:reservations-context)");
}

#[tokio::test]
async fn unrelated_text_goes_to_default_handler() {
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());

    let d = c.handle(Message::new("U4", "xyz unrelated")).await.unwrap();

    assert_eq!(d.intent, Intent::Unknown);
    assert_eq!(
        channel.sent(),
        vec![("U4".to_string(), "DefaultReply(gen:general-context)".to_string())]
    );
}

#[tokio::test]
async fn intents_without_handler_fall_back() {
    let channel = Arc::new(RecordingChannel::default());
    let registry = HandlerRegistry::builder()
        .register(Intent::Unknown, Arc::new(StaticHandler::new("default", "fallback")))
        .build()
        .unwrap();
    let c = Coordinator::new(IntentClassifier::default(), registry, channel.clone());

    for text in ["Hola", "precio", "reserva", ""] {
        let d = c.handle(Message::new("U", text)).await.unwrap();
        assert_eq!(d.reply, "fallback");
    }
    assert_eq!(channel.sent().len(), 4);
}

#[tokio::test]
async fn generator_failure_sends_nothing() {
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());

    let err = c.handle(Message::new("U5", "precio boom")).await.unwrap_err();

    match err {
        DispatchError::Handler { intent, source } => {
            assert_eq!(intent, Intent::ProductInquiry);
            assert_eq!(source, GenerateError::Unavailable("quota exceeded".to_string()));
        }
        other => panic!("expected handler error, got {other:?}"),
    }
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn send_failure_is_returned() {
    let channel = Arc::new(RecordingChannel::failing_for("U6"));
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());

    let err = c.handle(Message::new("U6", "Hola")).await.unwrap_err();

    match err {
        DispatchError::Send { recipient, source } => {
            assert_eq!(recipient, "U6");
            assert_eq!(source, ChannelError::Delivery("recipient unreachable".to_string()));
        }
        other => panic!("expected send error, got {other:?}"),
    }
}

#[tokio::test]
async fn run_isolates_failures_per_message() {
    let channel = Arc::new(RecordingChannel::failing_for("Offline"));
    let c = coordinator(Arc::new(HintGenerator::default()), channel.clone());
    let (tx, rx) = mpsc::channel(8);

    for (sender, text) in [
        ("User1", "Hola"),
        ("User2", "reserva boom"),
        ("Offline", "Hola"),
        ("User3", "Quiero una reserva"),
    ] {
        tx.send(Message::new(sender, text)).await.unwrap();
    }
    drop(tx);

    let stats = c.run(rx).await;

    assert_eq!(
        stats,
        DispatchStats {
            delivered: 2,
            failed: 2
        }
    );
    assert_eq!(
        channel.sent(),
        vec![
            ("User1".to_string(), "Greeting(Hi!)".to_string()),
            (
                "User3".to_string(),
                "ReservationReply(gen:reservations-context)".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn classifying_twice_leaves_collaborators_untouched() {
    let generator = Arc::new(HintGenerator::default());
    let channel = Arc::new(RecordingChannel::default());
    let c = coordinator(generator.clone(), channel.clone());

    let first = c.classifier().classify("Precio del producto A?");
    let second = c.classifier().classify("Precio del producto A?");

    assert_eq!(first, second);
    assert_eq!(*generator.calls.lock().unwrap(), 0);
    assert!(channel.sent().is_empty());
}

#[tokio::test]
async fn generative_handler_can_be_registered_for_new_routing() {
    let generator = Arc::new(HintGenerator::default());
    let channel = Arc::new(RecordingChannel::default());
    let context = Arc::new(ContextProvider::default());
    let registry = HandlerRegistry::builder()
        .register(
            Intent::Greeting,
            Arc::new(GenerativeHandler::greeting(context.clone(), generator.clone())),
        )
        .register(
            Intent::Unknown,
            Arc::new(GenerativeHandler::fallback(context, generator.clone())),
        )
        .build()
        .unwrap();
    let c = Coordinator::new(IntentClassifier::default(), registry, channel.clone());

    let d = c.handle(Message::new("User1", "hola")).await.unwrap();

    assert_eq!(d.reply, "GreetingReply(gen:general-context)");
    assert_eq!(*generator.calls.lock().unwrap(), 1);
}
