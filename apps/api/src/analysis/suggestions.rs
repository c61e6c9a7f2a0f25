//! Assertive rewording suggestions driven by a weak-phrase → strong-phrase table.
//!
//! The table is built once at startup and shared read-only. Declaration order is the
//! output order; where a phrase appears in the text does not matter.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Built-in weak phrases and their assertive replacements, in declaration order.
const DEFAULT_REPLACEMENTS: &[(&str, &str)] = &[
    ("responsible for", "led"),
    ("assisted in", "collaborated on"),
    ("helped", "contributed to"),
    ("involved in", "participated in"),
    ("worked on", "developed"),
    ("participated in", "took initiative in"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub weak: String,
    pub strong: String,
}

/// Immutable weak-phrase table. Entries keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementTable {
    entries: Vec<Replacement>,
}

impl Default for ReplacementTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_REPLACEMENTS
                .iter()
                .map(|(weak, strong)| Replacement {
                    weak: weak.to_string(),
                    strong: strong.to_string(),
                })
                .collect(),
        }
    }
}

impl ReplacementTable {
    /// Builds a table from explicit entries. Weak phrases are stored lowercased.
    pub fn new(entries: Vec<Replacement>) -> Result<Self> {
        if entries.is_empty() {
            bail!("Replacement table must contain at least one entry");
        }
        let mut normalized = Vec::with_capacity(entries.len());
        for entry in entries {
            let weak = entry.weak.trim().to_lowercase();
            if weak.is_empty() {
                bail!("Replacement table entry for '{}' has an empty weak phrase", entry.strong);
            }
            normalized.push(Replacement {
                weak,
                strong: entry.strong.trim().to_string(),
            });
        }
        Ok(Self {
            entries: normalized,
        })
    }

    /// Loads the table from `path`, or falls back to the built-in table when `None`.
    /// Any failure here is a startup failure.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read replacement table {}", path.display()))?;
        let entries: Vec<Replacement> = serde_json::from_str(&raw)
            .with_context(|| format!("Replacement table {} is not valid JSON", path.display()))?;
        Self::new(entries)
    }

    pub fn entries(&self) -> &[Replacement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// One suggestion per table entry whose weak phrase occurs anywhere in the text
/// (case-insensitive). Occurrence counts are not tracked.
pub fn suggest_rewordings(text: &str, table: &ReplacementTable) -> Vec<String> {
    let lower_text = text.to_lowercase();
    table
        .entries()
        .iter()
        .filter(|entry| lower_text.contains(&entry.weak))
        .map(|entry| format!("Replace '{}' → '{}'", entry.weak, entry.strong))
        .collect()
}
