//! Lexical scanning for cryptic identifiers.
//!
//! The scanner finds identifiers shaped like `<prefix><digits>` (`v12`,
//! `pu7`, ...) with whole-word matching, counts their occurrences, and
//! returns them sorted by numeric suffix. Matching is purely lexical:
//! occurrences inside comments or string literals count too, which keeps
//! scripts that reference their own identifiers in `loadstring` payloads
//! coherent after a rename.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::RenameConfig;
use crate::core::errors::{RelumeError, Result};

/// One distinct cryptic identifier found in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableOccurrence {
    /// The raw identifier text (`v42`, `pu3`, ...).
    pub name: String,
    /// Whole-word occurrence count across the entire source.
    pub occurrence_count: usize,
    /// 1-based line number of the first occurrence.
    pub first_line: usize,
    /// Trimmed text of the first occurrence's line.
    pub context_line: String,
}

/// Scans source text for cryptic identifiers.
#[derive(Debug)]
pub struct VariableScanner {
    pattern: Regex,
}

impl VariableScanner {
    /// Build a scanner for the prefixes in `config`.
    pub fn new(config: &RenameConfig) -> Result<Self> {
        let alternation = config
            .prefixes
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"\b(?:{alternation})\d+\b")).map_err(|e| {
            RelumeError::config_field(format!("failed to compile scan pattern: {e}"), "prefixes")
        })?;
        Ok(Self { pattern })
    }

    /// Return every distinct cryptic identifier in `source` with its
    /// occurrence count, sorted by numeric suffix ascending (ties broken by
    /// name). Scanning the same text twice yields the same list.
    pub fn scan(&self, source: &str) -> Vec<VariableOccurrence> {
        let mut found: HashMap<String, VariableOccurrence> = HashMap::new();

        for (line_index, line) in source.lines().enumerate() {
            for m in self.pattern.find_iter(line) {
                let name = m.as_str();
                if let Some(entry) = found.get_mut(name) {
                    entry.occurrence_count += 1;
                } else {
                    found.insert(
                        name.to_string(),
                        VariableOccurrence {
                            name: name.to_string(),
                            occurrence_count: 1,
                            first_line: line_index + 1,
                            context_line: line.trim().to_string(),
                        },
                    );
                }
            }
        }

        let mut occurrences: Vec<VariableOccurrence> = found.into_values().collect();
        occurrences.sort_by(|a, b| {
            numeric_suffix(&a.name)
                .cmp(&numeric_suffix(&b.name))
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!("Scan found {} distinct cryptic identifiers", occurrences.len());
        occurrences
    }
}

/// The digit tail of a cryptic name, for ordering (`v12` -> 12).
fn numeric_suffix(name: &str) -> u64 {
    let digits: String = name
        .chars()
        .skip_while(|c| c.is_ascii_alphabetic())
        .collect();
    digits.parse().unwrap_or(u64::MAX)
}
