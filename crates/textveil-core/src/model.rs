//! Entity model trait definitions
//!
//! The engine treats the underlying NER model as a black box behind
//! [`NerModel`]: something that can split text into tokens with byte
//! offsets and classify runs of those tokens. Adapters own their error
//! representation; the engine wraps whatever they return.

use crate::types::EntityKind;
use serde::{Deserialize, Serialize};

/// Error type adapters are free to fail with
pub type ModelError = Box<dyn std::error::Error + Send + Sync>;

pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// One model token, as byte offsets into the original text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Start position in the text
    pub start: usize,

    /// End position in the text (exclusive)
    pub end: usize,
}

impl Token {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A classified, grouped run of tokens
///
/// Token indices reference the list returned by
/// [`tokenize`](NerModel::tokenize); `end_token` is exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEntity {
    /// Index of the first token in the run
    pub start_token: usize,

    /// Index one past the last token in the run
    pub end_token: usize,

    /// Kind of entity the run was classified as
    pub kind: EntityKind,

    /// Model confidence score (0.0 to 1.0)
    pub confidence: f32,
}

impl TokenEntity {
    pub fn new(start_token: usize, end_token: usize, kind: EntityKind, confidence: f32) -> Self {
        Self {
            start_token,
            end_token,
            kind,
            confidence,
        }
    }
}

/// Black-box contextual entity model
pub trait NerModel: Send + Sync {
    /// Split text into tokens carrying byte offsets into `text`
    fn tokenize(&self, text: &str) -> ModelResult<Vec<Token>>;

    /// Classify runs of the given tokens into entities
    fn classify(&self, text: &str, tokens: &[Token]) -> ModelResult<Vec<TokenEntity>>;
}
