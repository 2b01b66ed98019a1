//! The placeholder grammar embedded in sanitized text
//!
//! A placeholder is `<TAG_n>` where `TAG` is one of the fixed entity tags
//! and `n` is a positive integer, e.g. `<PER_1>` or `<EMAIL_12>`.

use crate::types::EntityKind;
use once_cell::sync::Lazy;
use regex::Regex;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(EMAIL|PHONE|IBAN|CC|IP|PER|LOC|ORG|MISC)_([0-9]+)>")
        .expect("placeholder grammar must compile")
});

/// Regex matching every placeholder occurrence in a piece of text
pub fn pattern() -> &'static Regex {
    &PLACEHOLDER_RE
}

/// Render the placeholder for the `index`-th value of `kind`
pub fn format_placeholder(kind: EntityKind, index: u32) -> String {
    format!("<{}_{}>", kind.tag(), index)
}

/// Parse a string that is exactly one placeholder
///
/// Returns `None` for anything else, including text that merely contains
/// a placeholder, an unknown tag, or a zero index.
pub fn parse_placeholder(text: &str) -> Option<(EntityKind, u32)> {
    let captures = PLACEHOLDER_RE.captures(text)?;
    let matched = captures.get(0)?;
    if matched.start() != 0 || matched.end() != text.len() {
        return None;
    }

    let kind = EntityKind::from_tag(&captures[1])?;
    let index: u32 = captures[2].parse().ok()?;
    if index == 0 {
        return None;
    }

    Some((kind, index))
}
