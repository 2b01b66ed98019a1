//! Common test utilities for integration tests

use std::collections::HashMap;
use std::sync::Arc;
use textveil_core::model::{ModelResult, NerModel, Token, TokenEntity};
use textveil_core::types::{EntityKind, Language};

/// Lexicon-backed stand-in for a real NER model
///
/// Tokenizes on alphanumeric runs and tags tokens through a
/// case-sensitive word list. Adjacent same-kind tokens separated only
/// by spaces come back as one entity, so "Nicolas Grivelet" is a
/// single person while "John, Paul" stays two.
pub struct LexiconModel {
    lexicon: HashMap<&'static str, EntityKind>,
}

#[allow(dead_code)]
impl LexiconModel {
    pub fn new(words: &[(&'static str, EntityKind)]) -> Self {
        Self {
            lexicon: words.iter().copied().collect(),
        }
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

#[allow(dead_code)]
pub fn english_model() -> Arc<dyn NerModel> {
    Arc::new(LexiconModel::new(&[
        ("Nicolas", EntityKind::Person),
        ("Grivelet", EntityKind::Person),
        ("John", EntityKind::Person),
        ("Doe", EntityKind::Person),
        ("Paul", EntityKind::Person),
        ("George", EntityKind::Person),
        ("Ringo", EntityKind::Person),
        ("Mick", EntityKind::Person),
        ("Keith", EntityKind::Person),
        ("Charlie", EntityKind::Person),
        ("Ronnie", EntityKind::Person),
        ("Freddie", EntityKind::Person),
        ("Brian", EntityKind::Person),
        ("Roger", EntityKind::Person),
        ("Pete", EntityKind::Person),
        ("New", EntityKind::Location),
        ("York", EntityKind::Location),
        ("London", EntityKind::Location),
    ]))
}

#[allow(dead_code)]
pub fn french_model() -> Arc<dyn NerModel> {
    Arc::new(LexiconModel::new(&[
        ("Jean", EntityKind::Person),
        ("Dupont", EntityKind::Person),
        ("Hélène", EntityKind::Person),
        ("Paris", EntityKind::Location),
    ]))
}

#[allow(dead_code)]
pub fn models() -> HashMap<Language, Arc<dyn NerModel>> {
    HashMap::from([
        (Language::En, english_model()),
        (Language::Fr, french_model()),
    ])
}
