//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.concierge/config.json`). Every section is
//! optional; a missing file or section falls back to the built-in routing policy.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::intent::Intent;

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Ordered keyword rules for intent classification.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Context hint passed to the generator for each intent.
    #[serde(default)]
    pub context: ContextConfig,

    /// Handler policy (e.g. static or generative greeting).
    #[serde(default)]
    pub handlers: HandlersConfig,

    /// Mock text generator settings.
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Keyword rules, evaluated in order; the first rule with a matching keyword wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<KeywordRuleConfig>,
}

/// One classification rule: any keyword found in the lower-cased text selects `intent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordRuleConfig {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

impl KeywordRuleConfig {
    pub fn new(intent: Intent, keywords: &[&str]) -> Self {
        Self {
            intent,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

fn default_rules() -> Vec<KeywordRuleConfig> {
    vec![
        KeywordRuleConfig::new(Intent::ProductInquiry, &["precio", "producto"]),
        KeywordRuleConfig::new(Intent::Reservation, &["reserva", "reservar"]),
        KeywordRuleConfig::new(Intent::Greeting, &["hola"]),
    ]
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// Context hint labels, one per intent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextConfig {
    #[serde(default = "default_products_context")]
    pub product_inquiry: String,

    #[serde(default = "default_reservations_context")]
    pub reservation: String,

    #[serde(default = "default_general_context")]
    pub greeting: String,

    #[serde(default = "default_general_context")]
    pub unknown: String,
}

fn default_products_context() -> String {
    "products-context".to_string()
}

fn default_reservations_context() -> String {
    "reservations-context".to_string()
}

fn default_general_context() -> String {
    "general-context".to_string()
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            product_inquiry: default_products_context(),
            reservation: default_reservations_context(),
            greeting: default_general_context(),
            unknown: default_general_context(),
        }
    }
}

/// How greetings are answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GreetingMode {
    /// Fixed reply from `greetingReply`; the generator is not called.
    #[default]
    Static,

    /// Ask the generator with the greeting context, wrapped as `GreetingReply(...)`.
    Generative,
}

/// Handler policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlersConfig {
    #[serde(default)]
    pub greeting: GreetingMode,

    /// Reply used when `greeting` is "static".
    #[serde(default = "default_greeting_reply")]
    pub greeting_reply: String,
}

fn default_greeting_reply() -> String {
    "Greeting(Hi!)".to_string()
}

impl Default for HandlersConfig {
    fn default() -> Self {
        Self {
            greeting: GreetingMode::default(),
            greeting_reply: default_greeting_reply(),
        }
    }
}

/// Mock generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Text returned by the mock generator for every request.
    #[serde(default = "default_canned_reply")]
    pub canned_reply: String,

    /// Wrap the generator so every request and response is logged at info level.
    #[serde(default)]
    pub log_requests: bool,
}

fn default_canned_reply() -> String {
    "generated reply".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            canned_reply: default_canned_reply(),
            log_requests: false,
        }
    }
}

/// Resolve config path from env or default.
pub fn default_config_path() -> PathBuf {
    std::env::var("CONCIERGE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            dirs::home_dir()
                .map(|h| h.join(".concierge").join("config.json"))
                .unwrap_or_else(|| PathBuf::from("config.json"))
        })
}

/// Load config from the given path, or the default path (or CONCIERGE_CONFIG_PATH). Missing file => default config.
/// Returns the config and the path that was used.
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    let config = if !path.exists() {
        log::debug!("config file not found, using defaults: {}", path.display());
        Config::default()
    } else {
        let s = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        serde_json::from_str(&s)
            .with_context(|| format!("parsing config from {}", path.display()))?
    };
    Ok((config, path))
}
