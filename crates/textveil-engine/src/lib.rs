//! TextVeil PII Detection and Redaction Engine
//!
//! This crate implements the sanitize/restore pipeline:
//! - Deterministic pattern detection (emails, phones, IBANs, cards, IPs)
//! - Contextual entity detection behind injected NER models
//! - Span resolution with pattern-over-model precedence
//! - Reversible placeholder substitution and exact restoration

pub mod detector;
pub mod resolver;
pub mod restore;
pub mod sanitizer;

pub use detector::{
    CustomRule, DetectorConfig, NerDetector, NerOutput, PatternDetector, PatternRule, RuleSet,
};
pub use resolver::{ResolvedSpans, resolve};
pub use restore::{Restored, UnresolvedPlaceholder, restore};
pub use sanitizer::{Anonymizer, Sanitized};
