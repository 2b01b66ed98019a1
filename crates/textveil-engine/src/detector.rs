//! PII detectors

mod ner;
mod patterns;

pub use ner::{NerDetector, NerOutput};
pub use patterns::{PatternDetector, PatternRule, RuleSet};

use serde::{Deserialize, Serialize};
use textveil_core::types::EntityKind;

/// Configuration for the detection stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Enable email detection
    pub detect_email: bool,

    /// Enable phone number detection
    pub detect_phone: bool,

    /// Enable IBAN detection
    pub detect_iban: bool,

    /// Enable credit card detection
    pub detect_credit_card: bool,

    /// Enable IP address detection
    pub detect_ip_address: bool,

    /// Additional pattern rules, applied after the built-in ones
    pub custom_rules: Vec<CustomRule>,

    /// Drop model entities scoring below this threshold
    ///
    /// Pattern matches are deterministic and always carry confidence 1.0,
    /// so this only affects the contextual detector.
    pub min_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            detect_email: true,
            detect_phone: true,
            detect_iban: true,
            detect_credit_card: true,
            detect_ip_address: true,
            custom_rules: Vec::new(),
            min_confidence: 0.5,
        }
    }
}

impl DetectorConfig {
    /// Set the confidence threshold for model entities
    pub fn with_min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Append a custom pattern rule
    pub fn with_custom_rule(mut self, rule: CustomRule) -> Self {
        self.custom_rules.push(rule);
        self
    }
}

/// Caller-supplied pattern rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomRule {
    /// Name used in diagnostics
    pub name: String,

    /// Regex applied to the document
    pub pattern: String,

    /// Kind assigned to matches
    pub kind: EntityKind,
}
