//! Keyword intent classifier.
//!
//! Rules are tested in order against the lower-cased text and the first rule with a keyword
//! contained in the text wins. There is no scoring: where a keyword sits in the text does not
//! matter, only which rule is listed first.

use crate::config::{ClassifierConfig, KeywordRuleConfig};
use crate::intent::Intent;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClassifierError {
    #[error("classifier rule #{index} ({intent}) has no keywords")]
    NoKeywords { index: usize, intent: Intent },
    #[error("classifier rule #{index} ({intent}) contains an empty keyword")]
    EmptyKeyword { index: usize, intent: Intent },
}

#[derive(Debug, Clone)]
struct KeywordRule {
    intent: Intent,
    keywords: Vec<String>,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
    }
}

/// Ordered keyword rules; anything unmatched is `Intent::Unknown`.
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    rules: Vec<KeywordRule>,
}

impl Default for IntentClassifier {
    fn default() -> Self {
        // Built-in rules are non-empty, so this cannot fail.
        Self::from_config(&ClassifierConfig::default()).unwrap_or(Self { rules: Vec::new() })
    }
}

impl IntentClassifier {
    /// Build from config rules. Keywords are lower-cased; empty keyword lists or blank keywords
    /// are rejected because an empty substring matches every message.
    pub fn from_config(config: &ClassifierConfig) -> Result<Self, ClassifierError> {
        Self::from_rules(&config.rules)
    }

    pub fn from_rules(rules: &[KeywordRuleConfig]) -> Result<Self, ClassifierError> {
        let mut built = Vec::with_capacity(rules.len());
        for (index, rule) in rules.iter().enumerate() {
            if rule.keywords.is_empty() {
                return Err(ClassifierError::NoKeywords {
                    index,
                    intent: rule.intent,
                });
            }
            let mut keywords = Vec::with_capacity(rule.keywords.len());
            for k in &rule.keywords {
                let k = k.trim();
                if k.is_empty() {
                    return Err(ClassifierError::EmptyKeyword {
                        index,
                        intent: rule.intent,
                    });
                }
                keywords.push(k.to_lowercase());
            }
            built.push(KeywordRule {
                intent: rule.intent,
                keywords,
            });
        }
        Ok(Self { rules: built })
    }

    /// Classify a message text. Total and deterministic.
    pub fn classify(&self, text: &str) -> Intent {
        let lowered = text.to_lowercase();
        let intent = self
            .rules
            .iter()
            .find(|r| r.matches(&lowered))
            .map(|r| r.intent)
            .unwrap_or(Intent::Unknown);
        log::debug!("classifier: {:?} -> {}", text, intent);
        intent
    }
}
