//! Configuration types for the relume rename pipeline.
//!
//! Everything a rename pass can be tuned with lives here: the cryptic-prefix
//! set the scanner matches, the fallback and marker names the inferencer uses,
//! the service alias table, and the reserved-word list the registry is seeded
//! with. Configuration is YAML-backed and validates itself before use.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::errors::{RelumeError, Result};

/// File name probed in the working directory when no explicit config is given.
pub const DEFAULT_CONFIG_FILE: &str = ".relume.yml";

/// Main configuration for a rename pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenameConfig {
    /// Alphabetic prefixes that mark an identifier as cryptic when followed
    /// by one or more digits (`v` matches `v1`, `v42`, ...).
    pub prefixes: Vec<String>,

    /// Base name used when no inference rule matches (`var`, `var1`, ...).
    pub fallback_base: String,

    /// Prefix prepended to sanitized names that ended up empty or
    /// digit-leading.
    pub marker_prefix: String,

    /// Canonical spellings for well-known service names, keyed by lowercase
    /// alias. Looked-up names not present here are used verbatim.
    pub service_aliases: HashMap<String, String>,

    /// Names that must never be issued as replacements. Defaults to the Lua
    /// keyword set.
    pub reserved_words: Vec<String>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        let mut service_aliases = HashMap::new();
        for canonical in [
            "Players",
            "Workspace",
            "Lighting",
            "ReplicatedStorage",
            "ReplicatedFirst",
            "ServerStorage",
            "ServerScriptService",
            "StarterGui",
            "StarterPack",
            "StarterPlayer",
            "RunService",
            "UserInputService",
            "TweenService",
            "HttpService",
            "SoundService",
            "TeleportService",
            "MarketplaceService",
            "PathfindingService",
            "CollectionService",
            "ContextActionService",
            "Debris",
        ] {
            service_aliases.insert(canonical.to_lowercase(), canonical.to_string());
        }

        Self {
            prefixes: vec!["v".to_string(), "pu".to_string()],
            fallback_base: "var".to_string(),
            marker_prefix: "ref".to_string(),
            service_aliases,
            reserved_words: LUA_KEYWORDS.iter().map(|kw| kw.to_string()).collect(),
        }
    }
}

/// Lua 5.1 keywords; never valid as replacement identifiers.
const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

impl RenameConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a YAML file, validating it before returning.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RelumeError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content).map_err(|e| {
            RelumeError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })?;
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.prefixes.is_empty() {
            return Err(RelumeError::config_field(
                "at least one cryptic prefix is required",
                "prefixes",
            ));
        }

        for prefix in &self.prefixes {
            if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(RelumeError::config_field(
                    format!("prefix '{prefix}' must be non-empty and alphabetic"),
                    "prefixes",
                ));
            }
        }

        if !is_valid_identifier(&self.fallback_base) {
            return Err(RelumeError::config_field(
                format!("'{}' is not a valid identifier", self.fallback_base),
                "fallback_base",
            ));
        }

        // The marker gets prepended to digit-leading names, so it must start
        // with a letter or underscore itself.
        if !is_valid_identifier(&self.marker_prefix) {
            return Err(RelumeError::config_field(
                format!("'{}' is not a valid identifier", self.marker_prefix),
                "marker_prefix",
            ));
        }

        Ok(())
    }

    /// Canonical spelling for a looked-up service name, if it is a known
    /// alias. Lookup is case-insensitive.
    pub fn canonical_service(&self, raw: &str) -> Option<&str> {
        self.service_aliases
            .get(&raw.to_lowercase())
            .map(|s| s.as_str())
    }

    /// Whether `name` is on the reserved list (Lua keywords by default).
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.iter().any(|kw| kw == name)
    }
}

fn is_valid_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
