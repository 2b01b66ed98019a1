//! Span resolution: validation, precedence and overlap discard

use textveil_core::types::{Detection, DetectionSource, InvalidSpanReason, SpanWarning};
use tracing::{debug, warn};

/// Non-overlapping spans in ascending start order
///
/// Only [`resolve`] builds values of this type, so holding one is proof
/// the ordering and non-overlap invariants held at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSpans(Vec<Detection>);

impl ResolvedSpans {
    pub(crate) fn new(spans: Vec<Detection>) -> Self {
        Self(spans)
    }

    pub fn as_slice(&self) -> &[Detection] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Detection> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Detection> {
        self.0
    }
}

impl<'a> IntoIterator for &'a ResolvedSpans {
    type Item = &'a Detection;
    type IntoIter = std::slice::Iter<'a, Detection>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

pub(crate) fn invalid_reason(text: &str, start: usize, end: usize) -> Option<InvalidSpanReason> {
    if start > end {
        Some(InvalidSpanReason::Reversed)
    } else if start == end {
        Some(InvalidSpanReason::Empty)
    } else if end > text.len() {
        Some(InvalidSpanReason::OutOfBounds)
    } else if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        Some(InvalidSpanReason::NotCharBoundary)
    } else {
        None
    }
}

/// Merge pattern and model candidates into a conflict-free span list
///
/// Every candidate is validated against the document first; invalid ones
/// are dropped and reported. Survivors are ordered by start, then longer
/// span first, then pattern before model, and swept left to right: a
/// candidate overlapping an already accepted span is discarded whole,
/// never truncated. The sort is stable, so detector emission order breaks
/// remaining ties.
pub fn resolve(
    pattern_spans: Vec<Detection>,
    model_spans: Vec<Detection>,
    text: &str,
) -> (ResolvedSpans, Vec<SpanWarning>) {
    let mut warnings = Vec::new();
    let mut candidates = Vec::with_capacity(pattern_spans.len() + model_spans.len());

    for span in pattern_spans.into_iter().chain(model_spans) {
        match invalid_reason(text, span.start, span.end) {
            Some(reason) => {
                warn!(
                    source = ?span.source,
                    start = span.start,
                    end = span.end,
                    %reason,
                    "dropping invalid span"
                );
                warnings.push(SpanWarning {
                    source: span.source,
                    kind: span.kind,
                    start: span.start,
                    end: span.end,
                    reason,
                });
            }
            None => candidates.push(span),
        }
    }

    candidates.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(b.len().cmp(&a.len()))
            .then(source_rank(a.source).cmp(&source_rank(b.source)))
    });

    // Accepted spans have ascending ends, so overlap checks against the
    // last accepted span suffice.
    let mut resolved: Vec<Detection> = Vec::new();
    for candidate in candidates {
        match resolved.last() {
            Some(prev) if candidate.start < prev.end => {
                debug!(
                    kind = %candidate.kind,
                    source = ?candidate.source,
                    start = candidate.start,
                    end = candidate.end,
                    "discarding overlapping span"
                );
            }
            _ => resolved.push(candidate),
        }
    }

    (ResolvedSpans::new(resolved), warnings)
}

fn source_rank(source: DetectionSource) -> u8 {
    match source {
        DetectionSource::Pattern => 0,
        DetectionSource::Model => 1,
    }
}
