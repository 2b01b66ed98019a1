//! TextVeil Core Types and Traits
//!
//! This crate provides the fundamental types and traits used throughout TextVeil:
//! - Detection spans, entity kinds and languages
//! - The entity model trait implemented by NER adapters
//! - The reversible placeholder registry
//! - Core error types

pub mod error;
pub mod mapping;
pub mod model;
pub mod placeholder;
pub mod types;

pub use error::{Error, Result};
