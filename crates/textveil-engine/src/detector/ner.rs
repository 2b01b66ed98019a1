//! Contextual entity detection behind injected NER models

use crate::resolver;
use std::collections::HashMap;
use std::sync::Arc;
use textveil_core::model::NerModel;
use textveil_core::types::{Detection, DetectionSource, InvalidSpanReason, Language, SpanWarning};
use textveil_core::{Error, Result};
use tracing::{debug, warn};

/// Spans and rejected-span warnings from one model pass
#[derive(Debug, Clone, Default)]
pub struct NerOutput {
    /// Valid model spans, as byte offsets into the original text
    pub spans: Vec<Detection>,

    /// Entities dropped because their offsets could not be trusted
    pub warnings: Vec<SpanWarning>,
}

/// Contextual detector dispatching to one model per language
pub struct NerDetector {
    models: HashMap<Language, Arc<dyn NerModel>>,
    min_confidence: f32,
}

impl NerDetector {
    pub fn new(models: HashMap<Language, Arc<dyn NerModel>>, min_confidence: f32) -> Self {
        Self {
            models,
            min_confidence,
        }
    }

    /// True when a model is registered for `language`
    pub fn supports(&self, language: Language) -> bool {
        self.models.contains_key(&language)
    }

    /// Languages with a registered model
    pub fn languages(&self) -> Vec<Language> {
        self.models.keys().copied().collect()
    }

    /// Run the model for `language` over `text`
    ///
    /// Fails before touching any model when the language has none
    /// registered. Adapter failures are wrapped and propagated whole
    /// rather than degraded into partial output.
    ///
    /// Entity token runs are mapped back to byte offsets through the
    /// token list; entities whose offsets cannot be trusted are dropped
    /// and reported in [`NerOutput::warnings`].
    pub fn detect(&self, text: &str, language: Language) -> Result<NerOutput> {
        let model = self
            .models
            .get(&language)
            .ok_or(Error::UnsupportedLanguage(language))?;

        let tokens = model.tokenize(text).map_err(Error::Detection)?;
        let entities = model.classify(text, &tokens).map_err(Error::Detection)?;
        debug!(
            language = %language,
            tokens = tokens.len(),
            entities = entities.len(),
            "model pass complete"
        );

        let mut output = NerOutput::default();
        for entity in entities {
            if entity.start_token >= entity.end_token || entity.end_token > tokens.len() {
                warn!(
                    start_token = entity.start_token,
                    end_token = entity.end_token,
                    "entity references tokens out of range"
                );
                output.warnings.push(SpanWarning {
                    source: DetectionSource::Model,
                    kind: entity.kind,
                    start: entity.start_token,
                    end: entity.end_token,
                    reason: InvalidSpanReason::TokenOutOfRange,
                });
                continue;
            }

            let start = tokens[entity.start_token].start;
            let end = tokens[entity.end_token - 1].end;
            if let Some(reason) = resolver::invalid_reason(text, start, end) {
                warn!(start, end, %reason, "dropping model span");
                output.warnings.push(SpanWarning {
                    source: DetectionSource::Model,
                    kind: entity.kind,
                    start,
                    end,
                    reason,
                });
                continue;
            }

            if entity.confidence < self.min_confidence {
                debug!(
                    kind = %entity.kind,
                    confidence = entity.confidence,
                    "dropping low-confidence entity"
                );
                continue;
            }

            output.spans.push(Detection {
                kind: entity.kind,
                source: DetectionSource::Model,
                start,
                end,
                text: text[start..end].to_string(),
                confidence: entity.confidence,
            });
        }

        Ok(output)
    }
}
