//! Restoration of sanitized text from a mapping table

use serde::{Deserialize, Serialize};
use textveil_core::mapping::MappingTable;
use textveil_core::placeholder;
use tracing::warn;

/// A placeholder found in the text but absent from the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedPlaceholder {
    /// The placeholder exactly as it appears in the text
    pub placeholder: String,

    /// Byte offset of the occurrence in the input
    pub offset: usize,
}

/// Result of a restoration pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restored {
    /// Text with every known placeholder replaced by its original value
    pub text: String,

    /// Occurrences the table could not resolve, left verbatim in `text`
    pub unresolved: Vec<UnresolvedPlaceholder>,
}

/// Replace placeholders in `text` with the originals recorded in `table`
///
/// A single left-to-right pass over the placeholder grammar, so `<PER_1>`
/// can never clobber part of `<PER_10>`. Occurrences missing from the
/// table stay verbatim and are reported in [`Restored::unresolved`]
/// rather than failing the call.
///
/// Text that matched the placeholder grammar before sanitization is
/// indistinguishable from real placeholders here; the engine does not
/// guard against that.
pub fn restore(text: &str, table: &MappingTable) -> Restored {
    let mut out = String::with_capacity(text.len());
    let mut unresolved = Vec::new();
    let mut last_end = 0;

    for m in placeholder::pattern().find_iter(text) {
        out.push_str(&text[last_end..m.start()]);
        match table.original_for(m.as_str()) {
            Some(original) => out.push_str(original),
            None => {
                warn!(
                    placeholder = m.as_str(),
                    offset = m.start(),
                    "unresolved placeholder left verbatim"
                );
                unresolved.push(UnresolvedPlaceholder {
                    placeholder: m.as_str().to_string(),
                    offset: m.start(),
                });
                out.push_str(m.as_str());
            }
        }
        last_end = m.end();
    }
    out.push_str(&text[last_end..]);

    Restored {
        text: out,
        unresolved,
    }
}
