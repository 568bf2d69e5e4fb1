//! Whole-word rewriting of finalized renames.
//!
//! All mappings are applied in a single scan over the original text, so one
//! rename can never turn another identifier into a substring target. The
//! automaton uses leftmost-longest matching and an explicit word-boundary
//! check on the surrounding bytes, which keeps `v1` from touching `v10` or
//! `myv1`.

use std::collections::HashMap;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::core::errors::{RelumeError, Result};

/// Comment line prepended to every rewritten output, followed by one blank
/// line.
pub const PROVENANCE_HEADER: &str = "-- Variables renamed by relume";

/// Replace every whole-word occurrence of each mapped identifier and prepend
/// the provenance header. An empty mapping yields the header plus the
/// unchanged source.
pub fn apply_renames(source: &str, mapping: &HashMap<String, String>) -> Result<String> {
    let mut output = String::with_capacity(source.len() + PROVENANCE_HEADER.len() + 2);
    output.push_str(PROVENANCE_HEADER);
    output.push_str("\n\n");

    if mapping.is_empty() {
        output.push_str(source);
        return Ok(output);
    }

    let patterns: Vec<&str> = mapping.keys().map(String::as_str).collect();
    let replacements: Vec<&str> = patterns.iter().map(|p| mapping[*p].as_str()).collect();

    let automaton = AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(&patterns)
        .map_err(|e| RelumeError::internal(format!("failed to build rename automaton: {e}")))?;

    let bytes = source.as_bytes();
    let mut last = 0;
    for m in automaton.find_iter(source) {
        if !on_word_boundary(bytes, m.start(), m.end()) {
            continue;
        }
        output.push_str(&source[last..m.start()]);
        output.push_str(replacements[m.pattern().as_usize()]);
        last = m.end();
    }
    output.push_str(&source[last..]);

    Ok(output)
}

fn on_word_boundary(bytes: &[u8], start: usize, end: usize) -> bool {
    let clear_before = start == 0 || !is_word_byte(bytes[start - 1]);
    let clear_after = end == bytes.len() || !is_word_byte(bytes[end]);
    clear_before && clear_after
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
