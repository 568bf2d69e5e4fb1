//! Per-pass registry of issued replacement names.
//!
//! Guarantees that no two distinct originals ever receive the same final
//! name within one rename pass. Collisions are resolved by suffixing
//! (`Name`, `Name1`, `Name2`, ...); the registry is seeded with names that
//! must never be issued at all (Lua keywords by default), which take the
//! suffix path immediately.

use std::collections::HashSet;

/// Tracks replacement names issued during a single rename pass.
#[derive(Debug, Default)]
pub struct NameRegistry {
    issued: HashSet<String>,
    reserved: HashSet<String>,
}

impl NameRegistry {
    /// An empty registry with no reserved names.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry whose reserved set is pre-populated; reserved names are
    /// never returned from [`reserve`](Self::reserve).
    pub fn with_reserved<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            issued: HashSet::new(),
            reserved: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Reserve a unique final name for `base`. Returns `base` unchanged when
    /// it is free, otherwise the first free candidate among `base1`,
    /// `base2`, ... The returned name is recorded and will never be issued
    /// again within this pass.
    pub fn reserve(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut counter: u64 = 0;
        while self.is_taken(&candidate) {
            counter += 1;
            candidate = format!("{base}{counter}");
        }
        self.issued.insert(candidate.clone());
        candidate
    }

    /// Number of names issued so far in this pass.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn is_taken(&self, name: &str) -> bool {
        self.issued.contains(name) || self.reserved.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_first_reservation_is_unchanged() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.reserve("Players"), "Players");
    }

    #[test]
    fn test_collisions_take_ascending_suffixes() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.reserve("Workspace"), "Workspace");
        assert_eq!(registry.reserve("Workspace"), "Workspace1");
        assert_eq!(registry.reserve("Workspace"), "Workspace2");
    }

    #[test]
    fn test_explicitly_issued_suffix_is_skipped() {
        let mut registry = NameRegistry::new();
        assert_eq!(registry.reserve("var"), "var");
        assert_eq!(registry.reserve("var1"), "var1");
        // var and var1 are both taken now, so the next var jumps to var2.
        assert_eq!(registry.reserve("var"), "var2");
    }

    #[test]
    fn test_reserved_words_are_never_issued() {
        let mut registry = NameRegistry::with_reserved(["end", "local"]);
        assert_eq!(registry.reserve("end"), "end1");
        assert_eq!(registry.reserve("local"), "local1");
        assert_eq!(registry.issued_count(), 2);
    }

    #[test]
    fn test_no_persistence_between_registries() {
        let mut first = NameRegistry::new();
        first.reserve("Players");

        let mut second = NameRegistry::new();
        assert_eq!(second.reserve("Players"), "Players");
    }

    proptest! {
        #[test]
        fn reserve_never_issues_duplicates(
            bases in proptest::collection::vec("[A-Za-z][A-Za-z0-9_]{0,8}", 1..60)
        ) {
            let mut registry = NameRegistry::new();
            let mut seen = HashSet::new();
            for base in &bases {
                let final_name = registry.reserve(base);
                prop_assert!(seen.insert(final_name), "duplicate name issued");
            }
        }
    }
}
