//! The reversible placeholder registry

use crate::placeholder;
use crate::types::EntityKind;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// One placeholder assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Placeholder substituted into the sanitized text
    pub placeholder: String,

    /// The original text the placeholder stands for
    pub original: String,

    /// Kind the original value was detected as
    pub kind: EntityKind,
}

/// Reversible placeholder registry for a sanitization session
///
/// The table is append-only: assigning a value already seen under the same
/// kind returns the existing placeholder, and nothing ever removes or
/// rewrites an entry. Placeholder numbering is per kind, starting at 1,
/// and scoped to this table rather than to the process.
///
/// Tables are owned by the caller. They serialize as the ordered entry
/// list; deserialization rebuilds the lookup indexes and rejects tables
/// with malformed placeholders, tag/kind disagreements or duplicates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<MappingEntry>", into = "Vec<MappingEntry>")]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    forward: HashMap<String, usize>,
    reverse: HashMap<EntityKind, HashMap<String, usize>>,
    counters: HashMap<EntityKind, u32>,
}

impl MappingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the placeholder standing for `original`, assigning a fresh
    /// one when this `(original, kind)` pair has not been seen before
    pub fn assign(&mut self, kind: EntityKind, original: &str) -> String {
        if let Some(&idx) = self.reverse.get(&kind).and_then(|m| m.get(original)) {
            return self.entries[idx].placeholder.clone();
        }

        let counter = self.counters.entry(kind).or_insert(0);
        *counter += 1;
        let placeholder = placeholder::format_placeholder(kind, *counter);
        debug!(%placeholder, kind = %kind, "registered placeholder");

        let idx = self.entries.len();
        self.forward.insert(placeholder.clone(), idx);
        self.reverse
            .entry(kind)
            .or_default()
            .insert(original.to_string(), idx);
        self.entries.push(MappingEntry {
            placeholder: placeholder.clone(),
            original: original.to_string(),
            kind,
        });

        placeholder
    }

    /// Original value a placeholder stands for, if the table knows it
    pub fn original_for(&self, placeholder: &str) -> Option<&str> {
        self.forward
            .get(placeholder)
            .map(|&idx| self.entries[idx].original.as_str())
    }

    /// Placeholder already assigned to `(original, kind)`, if any
    pub fn placeholder_for(&self, kind: EntityKind, original: &str) -> Option<&str> {
        self.reverse
            .get(&kind)
            .and_then(|m| m.get(original))
            .map(|&idx| self.entries[idx].placeholder.as_str())
    }

    /// Entries in assignment order
    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    /// Number of entries in the table
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no placeholder has been assigned yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize the table as a JSON record list
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a table from its JSON record list, revalidating every entry
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: Vec<MappingEntry> = serde_json::from_str(json)?;
        MappingTable::try_from(entries)
    }
}

impl From<MappingTable> for Vec<MappingEntry> {
    fn from(table: MappingTable) -> Self {
        table.entries
    }
}

impl TryFrom<Vec<MappingEntry>> for MappingTable {
    type Error = Error;

    fn try_from(entries: Vec<MappingEntry>) -> Result<Self> {
        let mut table = MappingTable::default();

        for entry in entries {
            let Some((kind, index)) = placeholder::parse_placeholder(&entry.placeholder) else {
                return Err(Error::InvalidTable(format!(
                    "malformed placeholder '{}'",
                    entry.placeholder
                )));
            };
            if placeholder::format_placeholder(kind, index) != entry.placeholder {
                return Err(Error::InvalidTable(format!(
                    "non-canonical placeholder '{}'",
                    entry.placeholder
                )));
            }
            if kind != entry.kind {
                return Err(Error::InvalidTable(format!(
                    "placeholder '{}' does not agree with kind '{}'",
                    entry.placeholder, entry.kind
                )));
            }
            if table.forward.contains_key(&entry.placeholder) {
                return Err(Error::InvalidTable(format!(
                    "duplicate placeholder '{}'",
                    entry.placeholder
                )));
            }
            if table
                .reverse
                .get(&kind)
                .is_some_and(|m| m.contains_key(&entry.original))
            {
                return Err(Error::InvalidTable(format!(
                    "duplicate original value for kind '{}'",
                    kind
                )));
            }

            let idx = table.entries.len();
            table.forward.insert(entry.placeholder.clone(), idx);
            table
                .reverse
                .entry(kind)
                .or_default()
                .insert(entry.original.clone(), idx);
            let counter = table.counters.entry(kind).or_insert(0);
            *counter = (*counter).max(index);
            table.entries.push(entry);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests;
