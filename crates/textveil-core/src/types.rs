//! Detection spans, entity kinds and languages

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the engine can be asked to process
///
/// Whether a language is actually supported depends on which entity
/// models were registered at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English
    En,

    /// French
    Fr,
}

impl Language {
    /// ISO 639-1 code for this language
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Kinds of personal data the engine can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Email address
    Email,

    /// Phone number
    Phone,

    /// International bank account number
    Iban,

    /// Credit card number
    CreditCard,

    /// IP address (v4 or v6)
    IpAddress,

    /// Person name
    Person,

    /// Location or place name
    Location,

    /// Organization name
    Organization,

    /// Any other named entity
    Misc,
}

impl EntityKind {
    /// Tag used inside placeholders for this kind, e.g. `PER` in `<PER_1>`
    pub fn tag(&self) -> &'static str {
        match self {
            EntityKind::Email => "EMAIL",
            EntityKind::Phone => "PHONE",
            EntityKind::Iban => "IBAN",
            EntityKind::CreditCard => "CC",
            EntityKind::IpAddress => "IP",
            EntityKind::Person => "PER",
            EntityKind::Location => "LOC",
            EntityKind::Organization => "ORG",
            EntityKind::Misc => "MISC",
        }
    }

    /// Inverse of [`tag`](Self::tag)
    pub fn from_tag(tag: &str) -> Option<EntityKind> {
        match tag {
            "EMAIL" => Some(EntityKind::Email),
            "PHONE" => Some(EntityKind::Phone),
            "IBAN" => Some(EntityKind::Iban),
            "CC" => Some(EntityKind::CreditCard),
            "IP" => Some(EntityKind::IpAddress),
            "PER" => Some(EntityKind::Person),
            "LOC" => Some(EntityKind::Location),
            "ORG" => Some(EntityKind::Organization),
            "MISC" => Some(EntityKind::Misc),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which detector produced a candidate span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionSource {
    /// Deterministic pattern rule
    Pattern,

    /// Contextual entity model
    Model,
}

/// A detected PII span
///
/// Offsets are byte offsets into the document the span was detected in,
/// and both lie on UTF-8 character boundaries. `text` is the exact slice
/// `&document[start..end]` at detection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Kind of entity detected
    pub kind: EntityKind,

    /// Which detector produced this span
    pub source: DetectionSource,

    /// Start position in the text
    pub start: usize,

    /// End position in the text (exclusive)
    pub end: usize,

    /// The detected text
    pub text: String,

    /// Confidence score (0.0 to 1.0); pattern matches always carry 1.0
    pub confidence: f32,
}

impl Detection {
    /// Length of the span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the span covers no text
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// Why a candidate span was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSpanReason {
    /// Start equals end
    Empty,

    /// Start is greater than end
    Reversed,

    /// End lies past the end of the document
    OutOfBounds,

    /// Start or end splits a multi-byte character
    NotCharBoundary,

    /// Entity referenced token indices outside the token list
    TokenOutOfRange,
}

impl fmt::Display for InvalidSpanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvalidSpanReason::Empty => "empty span",
            InvalidSpanReason::Reversed => "reversed span",
            InvalidSpanReason::OutOfBounds => "span out of bounds",
            InvalidSpanReason::NotCharBoundary => "span splits a character",
            InvalidSpanReason::TokenOutOfRange => "token indices out of range",
        };
        f.write_str(reason)
    }
}

/// A rejected candidate span, reported alongside sanitized output
///
/// For [`TokenOutOfRange`](InvalidSpanReason::TokenOutOfRange) the bounds
/// are token indices as reported by the model; for every other reason they
/// are byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanWarning {
    /// Which detector produced the rejected span
    pub source: DetectionSource,

    /// Claimed entity kind
    pub kind: EntityKind,

    /// Claimed start position
    pub start: usize,

    /// Claimed end position
    pub end: usize,

    /// Why the span was rejected
    pub reason: InvalidSpanReason,
}
