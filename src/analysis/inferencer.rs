//! Context-based replacement-name inference.
//!
//! For each cryptic identifier the inferencer locates its first assignment,
//! takes the right-hand side as a text fragment, and runs a fixed-priority
//! rule cascade against it: service lookups by string literal, well-known
//! player/character accessors, named-child fetches, then a generic fallback.
//! The proposed base name is sanitized into a legal identifier before the
//! registry assigns the final (possibly suffixed) name.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::core::config::RenameConfig;

static SERVICE_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"GetService\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());
static WAIT_FOR_CHILD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"WaitForChild\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());
static FIND_FIRST_CHILD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"FindFirstChild\s*\(\s*["']([^"']+)["']\s*\)"#).unwrap());

/// Proposes replacement base names for cryptic identifiers.
#[derive(Debug)]
pub struct NameInferencer<'a> {
    config: &'a RenameConfig,
}

impl<'a> NameInferencer<'a> {
    /// Create an inferencer over the given configuration.
    pub fn new(config: &'a RenameConfig) -> Self {
        Self { config }
    }

    /// Propose a sanitized base name for `name`. Never fails: when no
    /// assignment is found or no rule matches, the configured fallback base
    /// is returned. The final name still needs to go through the registry.
    pub fn propose(&self, source: &str, name: &str) -> String {
        let base = self
            .first_assignment_fragment(source, name)
            .and_then(|fragment| self.match_rules(&fragment))
            .unwrap_or_else(|| self.config.fallback_base.clone());

        let sanitized = sanitize_base(&base, self.config);
        debug!("Proposed '{}' for '{}'", sanitized, name);
        sanitized
    }

    /// The right-hand side of the identifier's first declaration or plain
    /// assignment, trimmed, as a single-line fragment. `==` comparisons and
    /// field writes (`obj.v1 = ...`) are not assignments of the identifier.
    fn first_assignment_fragment(&self, source: &str, name: &str) -> Option<String> {
        let pattern = format!(
            r"(?m)(?:^|[^.:A-Za-z0-9_]){}\s*=\s*([^\n]*)",
            regex::escape(name)
        );
        let re = Regex::new(&pattern).ok()?;

        for cap in re.captures_iter(source) {
            if let Some(rhs) = cap.get(1) {
                let fragment = rhs.as_str().trim();
                // A fragment starting with '=' means the match was the first
                // half of a `==` comparison; keep looking.
                if fragment.is_empty() || fragment.starts_with('=') {
                    continue;
                }
                return Some(fragment.to_string());
            }
        }
        None
    }

    /// Run the rule cascade in strict priority order; first match wins.
    fn match_rules(&self, fragment: &str) -> Option<String> {
        if let Some(cap) = SERVICE_CALL.captures(fragment) {
            let literal = &cap[1];
            let name = self
                .config
                .canonical_service(literal)
                .map(str::to_string)
                .unwrap_or_else(|| literal.to_string());
            return Some(name);
        }
        if fragment.contains(".LocalPlayer") {
            return Some("LocalPlayer".to_string());
        }
        if fragment.contains(".Character") {
            return Some("Character".to_string());
        }
        if fragment.contains("Humanoid") {
            return Some("Humanoid".to_string());
        }
        if let Some(cap) = WAIT_FOR_CHILD.captures(fragment) {
            return Some(cap[1].to_string());
        }
        if let Some(cap) = FIND_FIRST_CHILD.captures(fragment) {
            return Some(cap[1].to_string());
        }
        None
    }
}

/// Reduce a proposed name to a legal identifier: keep `[A-Za-z0-9_]` only,
/// and prepend the marker prefix when the remainder is empty or starts with
/// a digit.
pub fn sanitize_base(raw: &str, config: &RenameConfig) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    let needs_marker = cleaned.is_empty()
        || cleaned
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit());

    if needs_marker {
        format!("{}{}", config.marker_prefix, cleaned)
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RenameConfig {
        RenameConfig::default()
    }

    fn propose(source: &str, name: &str) -> String {
        let config = config();
        NameInferencer::new(&config).propose(source, name)
    }

    #[test]
    fn test_service_lookup_uses_literal() {
        let base = propose("local v1 = game:GetService(\"Players\")\nprint(v1)", "v1");
        assert_eq!(base, "Players");
    }

    #[test]
    fn test_service_alias_is_canonicalized() {
        let base = propose("local v2 = game:GetService(\"workspace\")", "v2");
        assert_eq!(base, "Workspace");
    }

    #[test]
    fn test_unknown_service_used_verbatim() {
        let base = propose("local v2 = game:GetService(\"DataHub\")", "v2");
        assert_eq!(base, "DataHub");
    }

    #[test]
    fn test_single_quoted_literal_accepted() {
        let base = propose("local pu1 = game:GetService('RunService')", "pu1");
        assert_eq!(base, "RunService");
    }

    #[test]
    fn test_local_player_rule() {
        let base = propose("local v3 = v3.LocalPlayer", "v3");
        assert_eq!(base, "LocalPlayer");
    }

    #[test]
    fn test_character_rule() {
        let base = propose("local v4 = player.Character or player.CharacterAdded:Wait()", "v4");
        assert_eq!(base, "Character");
    }

    #[test]
    fn test_humanoid_rule() {
        let base = propose("local v5 = char:FindFirstChildOfClass(\"Humanoid\")", "v5");
        assert_eq!(base, "Humanoid");
    }

    #[test]
    fn test_wait_for_child_literal() {
        let base = propose("local v6 = backpack:WaitForChild(\"Sword\")", "v6");
        assert_eq!(base, "Sword");
    }

    #[test]
    fn test_find_first_child_literal() {
        let base = propose("local v7 = model:FindFirstChild(\"Handle\")", "v7");
        assert_eq!(base, "Handle");
    }

    #[test]
    fn test_service_rule_outranks_accessors() {
        let base = propose(
            "local v8 = game:GetService(\"Players\").LocalPlayer",
            "v8",
        );
        assert_eq!(base, "Players");
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        let base = propose("local v5 = somefunc()", "v5");
        assert_eq!(base, "var");
    }

    #[test]
    fn test_fallback_when_never_assigned() {
        let base = propose("print(v9)\nreturn v9", "v9");
        assert_eq!(base, "var");
    }

    #[test]
    fn test_comparison_is_not_an_assignment() {
        let source = "if v1 == 5 then end\nlocal v1 = game:GetService(\"Players\")";
        assert_eq!(propose(source, "v1"), "Players");
    }

    #[test]
    fn test_field_write_is_not_an_assignment() {
        let source = "state.v1 = 5\nv1 = obj:WaitForChild(\"Sword\")";
        assert_eq!(propose(source, "v1"), "Sword");
    }

    #[test]
    fn test_sanitize_strips_illegal_characters() {
        let config = config();
        assert_eq!(sanitize_base("My Name!", &config), "MyName");
        assert_eq!(sanitize_base("health-bar", &config), "healthbar");
        assert_eq!(sanitize_base("under_score", &config), "under_score");
    }

    #[test]
    fn test_sanitize_marks_digit_leading_names() {
        let config = config();
        assert_eq!(sanitize_base("123abc", &config), "ref123abc");
        assert_eq!(sanitize_base("!!!", &config), "ref");
        assert_eq!(sanitize_base("", &config), "ref");
    }

    #[test]
    fn test_literal_with_spaces_sanitizes_cleanly() {
        let base = propose("local v6 = gui:WaitForChild(\"Main Frame\")", "v6");
        assert_eq!(base, "MainFrame");
    }
}
