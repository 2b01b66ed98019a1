//! Sanitization: detection, resolution and placeholder substitution

use crate::detector::{DetectorConfig, NerDetector, NerOutput, PatternDetector};
use crate::resolver;
use std::collections::HashMap;
use std::sync::Arc;
use textveil_core::mapping::MappingTable;
use textveil_core::model::NerModel;
use textveil_core::types::{Language, SpanWarning};
use textveil_core::{Error, Result};
use tracing::{debug, info};

/// Sanitized text plus the warnings gathered while producing it
#[derive(Debug, Clone)]
pub struct Sanitized {
    /// Text with every resolved span replaced by a placeholder
    pub text: String,

    /// Candidate spans rejected on the way; inspect these when a model
    /// misbehaves
    pub warnings: Vec<SpanWarning>,
}

/// The sanitization engine
///
/// Owns the compiled pattern rules and the per-language models, and no
/// mutable state: placeholders live in a caller-owned [`MappingTable`],
/// so independent calls are fully independent and an `Anonymizer` shared
/// across threads needs no locking of its own.
pub struct Anonymizer {
    patterns: PatternDetector,
    ner: NerDetector,
}

impl Anonymizer {
    /// Build an engine from configuration and one model per language
    ///
    /// Rule compilation happens here; an invalid custom rule fails
    /// construction rather than a later detection call.
    pub fn new(
        config: DetectorConfig,
        models: HashMap<Language, Arc<dyn NerModel>>,
    ) -> Result<Self> {
        let patterns = PatternDetector::new(&config)?;
        let ner = NerDetector::new(models, config.min_confidence);
        Ok(Self { patterns, ner })
    }

    /// Build an engine with the default configuration
    pub fn with_defaults(models: HashMap<Language, Arc<dyn NerModel>>) -> Result<Self> {
        Self::new(DetectorConfig::default(), models)
    }

    /// True when `language` has a registered model
    pub fn supports(&self, language: Language) -> bool {
        self.ner.supports(language)
    }

    /// Sanitize `text`, returning the output and a fresh mapping table
    pub fn anonymize(&self, text: &str, language: Language) -> Result<(Sanitized, MappingTable)> {
        let mut table = MappingTable::new();
        let sanitized = self.anonymize_with(text, language, &mut table)?;
        Ok((sanitized, table))
    }

    /// Sanitize `text`, assigning placeholders from a caller-owned table
    ///
    /// Carrying one table across calls keeps placeholders stable for
    /// values recurring anywhere in the session: a value already in the
    /// table is reused, never renumbered.
    pub fn anonymize_with(
        &self,
        text: &str,
        language: Language,
        table: &mut MappingTable,
    ) -> Result<Sanitized> {
        if !self.ner.supports(language) {
            return Err(Error::UnsupportedLanguage(language));
        }

        let pattern_spans = self.patterns.detect(text);
        let NerOutput {
            spans: model_spans,
            mut warnings,
        } = self.ner.detect(text, language)?;
        debug!(
            pattern = pattern_spans.len(),
            model = model_spans.len(),
            "detection complete"
        );

        let (resolved, resolver_warnings) = resolver::resolve(pattern_spans, model_spans, text);
        warnings.extend(resolver_warnings);

        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        for span in &resolved {
            out.push_str(&text[last_end..span.start]);
            out.push_str(&table.assign(span.kind, &span.text));
            last_end = span.end;
        }
        out.push_str(&text[last_end..]);

        info!(
            language = %language,
            spans = resolved.len(),
            warnings = warnings.len(),
            "text sanitized"
        );
        Ok(Sanitized {
            text: out,
            warnings,
        })
    }
}
