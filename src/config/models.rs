//! Configuration data structures for Switchyard.
//!
//! These types map directly to TOML (also JSON / YAML) configuration files. Every section has
//! defaults so an empty file, or no file at all, yields a working factory.
use serde::{Deserialize, Serialize};

/// Default area holding the built-in controllers
pub const DEFAULT_BUILTIN_AREA: &str = "builtin";

/// Top-level configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SwitchyardConfig {
    pub factory: FactorySettings,
    pub tree: TreeSettings,
    pub logging: LoggingSettings,
}

/// Controller factory behaviour
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FactorySettings {
    /// Register the built-in controllers during initialization
    pub register_builtins: bool,
    /// Area the built-in controllers are registered under
    pub builtin_area: String,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            register_builtins: true,
            builtin_area: DEFAULT_BUILTIN_AREA.to_string(),
        }
    }
}

/// What the controller tree does when a key is registered twice
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The last registration wins
    #[default]
    Replace,
    /// The first registration is kept and the duplicate is reported
    Reject,
}

/// Default controller tree behaviour
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Compare area and controller names case-sensitively. When unset, names are folded
    /// with Unicode lowercasing, so `Ärea` and `ärea` are the same area.
    pub case_sensitive: bool,
    pub on_duplicate: DuplicatePolicy,
}

/// Log output settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
    /// `EnvFilter` directive, overridden by `RUST_LOG` when set
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
    /// Include span context in JSON output
    pub include_spans: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            include_spans: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SwitchyardConfig::default();
        assert!(config.factory.register_builtins);
        assert_eq!(config.factory.builtin_area, "builtin");
        assert!(!config.tree.case_sensitive);
        assert_eq!(config.tree.on_duplicate, DuplicatePolicy::Replace);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SwitchyardConfig =
            serde_json::from_str(r#"{"tree": {"on_duplicate": "reject"}}"#).unwrap();
        assert_eq!(config.tree.on_duplicate, DuplicatePolicy::Reject);
        assert!(!config.tree.case_sensitive);
        assert_eq!(config.factory, FactorySettings::default());
    }
}
