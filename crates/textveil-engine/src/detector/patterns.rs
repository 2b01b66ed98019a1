//! Deterministic pattern detection

use crate::detector::DetectorConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};
use textveil_core::types::{Detection, DetectionSource, EntityKind};
use textveil_core::{Error, Result};
use tracing::debug;

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";

// Phone numbers: +33 612345678, (555) 123-4567, 555-123-4567, 555.123.4567
const PHONE_PATTERN: &str = r"(?:\+?\d{1,3}[-.\s]?)?\(?\d{2,4}\)?[-.\s]?\d{2,4}[-.\s]?\d{2,4}\b";

// IBAN: two-letter country code, two check digits, then up to 27 more
// characters, compact form only
const IBAN_PATTERN: &str = r"\b[A-Z]{2}\d{2}[A-Z0-9]{4}\d{7}[A-Z0-9]{0,16}\b";

// Credit cards: 13-19 digit sequences with optional spaces/dashes
const CREDIT_CARD_PATTERN: &str = r"\b(?:\d{4}[-\s]?){3}\d{4,7}\b";

// IP addresses: IPv4 and full-form IPv6
const IP_PATTERN: &str = r"\b(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\b|\b(?:[0-9a-fA-F]{1,4}:){7}[0-9a-fA-F]{1,4}\b";

/// An ordered pattern rule list, as plain data
///
/// The set is fixed at detector construction; nothing mutates it at
/// detection time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<PatternRule>,
}

/// One pattern rule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternRule {
    /// Name used in diagnostics
    pub name: String,

    /// Kind assigned to matches
    pub kind: EntityKind,

    /// Regex applied to the document
    pub pattern: String,
}

impl RuleSet {
    /// Build the standard rule set enabled by `config`, custom rules last
    pub fn from_config(config: &DetectorConfig) -> Self {
        let mut rules = Vec::new();

        if config.detect_email {
            rules.push(PatternRule {
                name: "email".to_string(),
                kind: EntityKind::Email,
                pattern: EMAIL_PATTERN.to_string(),
            });
        }
        if config.detect_phone {
            rules.push(PatternRule {
                name: "phone".to_string(),
                kind: EntityKind::Phone,
                pattern: PHONE_PATTERN.to_string(),
            });
        }
        if config.detect_iban {
            rules.push(PatternRule {
                name: "iban".to_string(),
                kind: EntityKind::Iban,
                pattern: IBAN_PATTERN.to_string(),
            });
        }
        if config.detect_credit_card {
            rules.push(PatternRule {
                name: "credit_card".to_string(),
                kind: EntityKind::CreditCard,
                pattern: CREDIT_CARD_PATTERN.to_string(),
            });
        }
        if config.detect_ip_address {
            rules.push(PatternRule {
                name: "ip_address".to_string(),
                kind: EntityKind::IpAddress,
                pattern: IP_PATTERN.to_string(),
            });
        }
        for custom in &config.custom_rules {
            rules.push(PatternRule {
                name: custom.name.clone(),
                kind: custom.kind,
                pattern: custom.pattern.clone(),
            });
        }

        Self { rules }
    }
}

#[derive(Debug)]
struct CompiledRule {
    name: String,
    kind: EntityKind,
    regex: Regex,
}

/// Regex-based deterministic detector
#[derive(Debug)]
pub struct PatternDetector {
    rules: Vec<CompiledRule>,
}

impl PatternDetector {
    /// Compile the rule set enabled by `config`
    pub fn new(config: &DetectorConfig) -> Result<Self> {
        Self::from_rules(&RuleSet::from_config(config))
    }

    /// Compile an explicit rule set
    pub fn from_rules(rules: &RuleSet) -> Result<Self> {
        let mut compiled = Vec::with_capacity(rules.rules.len());
        for rule in &rules.rules {
            let regex = Regex::new(&rule.pattern).map_err(|source| Error::InvalidRule {
                rule: rule.name.clone(),
                source,
            })?;
            compiled.push(CompiledRule {
                name: rule.name.clone(),
                kind: rule.kind,
                regex,
            });
        }
        Ok(Self { rules: compiled })
    }

    /// Kinds the compiled rules can produce, in rule order
    pub fn kinds(&self) -> Vec<EntityKind> {
        let mut kinds = Vec::new();
        for rule in &self.rules {
            if !kinds.contains(&rule.kind) {
                kinds.push(rule.kind);
            }
        }
        kinds
    }

    /// Detect pattern matches in `text`
    ///
    /// Pure and deterministic: the same text always yields the same spans,
    /// ordered by position and then by rule declaration order. Matches may
    /// overlap across rules; the resolver arbitrates those later.
    pub fn detect(&self, text: &str) -> Vec<Detection> {
        let mut detections = Vec::new();

        for rule in &self.rules {
            match rule.kind {
                EntityKind::Phone => scan_phone(&rule.regex, text, &mut detections),
                _ => {
                    for m in rule.regex.find_iter(text) {
                        if accept(rule.kind, m.as_str()) {
                            detections.push(make_detection(rule.kind, m.start(), m.end(), m.as_str()));
                        } else {
                            debug!(rule = %rule.name, start = m.start(), "match failed validation");
                        }
                    }
                }
            }
        }

        detections.sort_by_key(|d| d.start);
        detections
    }
}

// The phone rule must not fire inside a longer word or digit run, and the
// regex crate cannot express that boundary itself. Matches glued to a
// preceding word character are rejected and the scan resumes one character
// past the rejected start, so shorter candidates inside are still found.
fn scan_phone(regex: &Regex, text: &str, detections: &mut Vec<Detection>) {
    let mut at = 0;
    while let Some(m) = regex.find_at(text, at) {
        if m.start() == m.end() {
            at = next_char_boundary(text, m.start());
            continue;
        }

        let preceded_by_word = text[..m.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if preceded_by_word {
            at = next_char_boundary(text, m.start());
            continue;
        }

        if validate_phone(m.as_str()) {
            detections.push(make_detection(EntityKind::Phone, m.start(), m.end(), m.as_str()));
        } else {
            debug!(start = m.start(), "phone candidate failed validation");
        }
        at = m.end();
    }
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    let mut next = at + 1;
    while next < text.len() && !text.is_char_boundary(next) {
        next += 1;
    }
    next
}

fn make_detection(kind: EntityKind, start: usize, end: usize, text: &str) -> Detection {
    Detection {
        kind,
        source: DetectionSource::Pattern,
        start,
        end,
        text: text.to_string(),
        confidence: 1.0,
    }
}

fn accept(kind: EntityKind, text: &str) -> bool {
    match kind {
        EntityKind::Phone => validate_phone(text),
        EntityKind::CreditCard => validate_credit_card(text),
        _ => true,
    }
}

/// Validate a potential phone number
///
/// The pattern alone is too permissive; require a plausible digit count.
/// Country code prefixes vary, so there are no per-country rules here.
fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    (10..=15).contains(&digits)
}

/// Validate a potential credit card number using the Luhn algorithm
fn validate_credit_card(number: &str) -> bool {
    let digits: Vec<u32> = number
        .chars()
        .filter(|c| c.is_ascii_digit())
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() < 13 || digits.len() > 19 {
        return false;
    }

    let checksum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();

    checksum.is_multiple_of(10)
}
