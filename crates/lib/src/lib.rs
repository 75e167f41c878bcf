//! Concierge core library: intent classification, handlers, and dispatch of replies to a
//! channel, used by the CLI.

pub mod channels;
pub mod classifier;
pub mod config;
pub mod context;
pub mod coordinator;
pub mod handlers;
pub mod init;
pub mod intent;
pub mod llm;
pub mod message;

pub use coordinator::{Coordinator, Delivery, DispatchError, DispatchStats};
pub use intent::Intent;
pub use message::Message;
