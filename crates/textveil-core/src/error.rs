//! Error types for TextVeil Core

use crate::types::Language;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(Language),

    #[error("Invalid detection rule '{rule}': {source}")]
    InvalidRule {
        rule: String,
        source: regex::Error,
    },

    #[error("Entity model error: {0}")]
    Detection(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Invalid mapping table: {0}")]
    InvalidTable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
