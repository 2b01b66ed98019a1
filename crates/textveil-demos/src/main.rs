//! Sanitization Walkthrough
//!
//! This example demonstrates the full TextVeil pipeline:
//! - Detects emails and phone numbers with the built-in patterns
//! - Detects people and places with a small lexicon-backed model
//! - Replaces every occurrence with a reversible placeholder
//! - Restores the original text from the mapping table
//!
//! The lexicon model stands in for a real NER model; anything
//! implementing [`NerModel`] plugs into the same pipeline.
//!
//! Usage:
//! ```bash
//! cargo run -p textveil-demos
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use textveil_core::mapping::{MappingEntry, MappingTable};
use textveil_core::model::{ModelResult, NerModel, Token, TokenEntity};
use textveil_core::types::{EntityKind, Language};
use textveil_engine::{Anonymizer, restore};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Word-lookup model tagging known names and places
///
/// Tokenizes on alphanumeric runs and labels each token through a
/// case-sensitive lexicon. Adjacent tokens of the same kind separated
/// only by spaces are merged, so "John Doe" and "New York" come back
/// as single entities while "John, Paul" stays two.
struct LexiconModel {
    lexicon: HashMap<&'static str, EntityKind>,
}

impl LexiconModel {
    fn english() -> Self {
        let mut lexicon = HashMap::new();
        for name in [
            "John", "Doe", "Paul", "George", "Ringo", "Mick", "Keith", "Charlie", "Ronnie",
            "Freddie", "Brian", "Roger", "Pete",
        ] {
            lexicon.insert(name, EntityKind::Person);
        }
        for place in ["New", "York", "London"] {
            lexicon.insert(place, EntityKind::Location);
        }
        Self { lexicon }
    }

    fn french() -> Self {
        let mut lexicon = HashMap::new();
        for name in ["Jean", "Dupont"] {
            lexicon.insert(name, EntityKind::Person);
        }
        lexicon.insert("Paris", EntityKind::Location);
        Self { lexicon }
    }
}

impl NerModel for LexiconModel {
    fn tokenize(&self, text: &str) -> ModelResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (offset, ch) in text.char_indices() {
            if ch.is_alphanumeric() {
                if start.is_none() {
                    start = Some(offset);
                }
            } else if let Some(begin) = start.take() {
                tokens.push(Token::new(begin, offset));
            }
        }
        if let Some(begin) = start {
            tokens.push(Token::new(begin, text.len()));
        }
        Ok(tokens)
    }

    fn classify(&self, text: &str, tokens: &[Token]) -> ModelResult<Vec<TokenEntity>> {
        let mut entities = Vec::new();
        let mut idx = 0;
        while idx < tokens.len() {
            let word = &text[tokens[idx].start..tokens[idx].end];
            let Some(&kind) = self.lexicon.get(word) else {
                idx += 1;
                continue;
            };

            let mut end = idx + 1;
            while end < tokens.len() {
                let next = &text[tokens[end].start..tokens[end].end];
                let gap = &text[tokens[end - 1].end..tokens[end].start];
                if self.lexicon.get(next) != Some(&kind) || !gap.chars().all(|c| c == ' ') {
                    break;
                }
                end += 1;
            }

            entities.push(TokenEntity::new(idx, end, kind, 0.95));
            idx = end;
        }
        Ok(entities)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // Wire one model per language into the pipeline
    info!("Creating anonymizer with lexicon models for en and fr");
    let mut models: HashMap<Language, Arc<dyn NerModel>> = HashMap::new();
    models.insert(Language::En, Arc::new(LexiconModel::english()));
    models.insert(Language::Fr, Arc::new(LexiconModel::french()));
    let anonymizer = Anonymizer::with_defaults(models)?;

    // English walkthrough: patterns and model working together
    let text =
        "Contact John Doe at john.doe@example.com or call +1-555-123-4567. He lives in New York.";
    let (sanitized, table) = anonymizer.anonymize(text, Language::En)?;

    println!("=== English ===");
    println!("original:  {}", text);
    println!("sanitized: {}", sanitized.text);
    println!("mapping:\n{}", table.to_json()?);

    let restored = restore(&sanitized.text, &table);
    println!("restored:  {}", restored.text);
    println!("round-trips: {}\n", restored.text == text);

    // French walkthrough: same pipeline, different model
    let text = "M. Jean Dupont habite à Paris. Son email est jean.dupont@orange.fr.";
    let (sanitized, table) = anonymizer.anonymize(text, Language::Fr)?;

    println!("=== French ===");
    println!("original:  {}", text);
    println!("sanitized: {}", sanitized.text);
    println!("restored:  {}\n", restore(&sanitized.text, &table).text);

    // Many entities: indices grow past 9 and still restore cleanly
    let text = "John, Paul, George and Ringo met Mick, Keith, Charlie and Ronnie. \
                Freddie, Brian, Roger and Pete live in London.";
    let (sanitized, table) = anonymizer.anonymize(text, Language::En)?;

    println!("=== Twelve people ===");
    println!("sanitized: {}", sanitized.text);
    let restored = restore(&sanitized.text, &table);
    println!("round-trips: {}\n", restored.text == text);

    // Drop one entry and restore again: the orphaned placeholder is
    // left in place and reported instead of failing the whole pass
    let mut entries: Vec<MappingEntry> = table.clone().into();
    entries.retain(|entry| entry.placeholder != "<PER_5>");
    let pruned = MappingTable::try_from(entries)?;

    let partial = restore(&sanitized.text, &pruned);
    println!("=== Restore with a pruned table ===");
    println!("partial:   {}", partial.text);
    for orphan in &partial.unresolved {
        println!(
            "unresolved {} at byte {}",
            orphan.placeholder, orphan.offset
        );
    }

    info!("✅ Walkthrough complete");
    Ok(())
}
