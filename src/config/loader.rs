use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use eyre::{Result, WrapErr};

use crate::config::models::SwitchyardConfig;

/// Prefix of environment variables overriding file settings, e.g. `SWITCHYARD__TREE__CASE_SENSITIVE`
pub const ENV_PREFIX: &str = "SWITCHYARD";

/// Load configuration from a file using the config crate
/// Supports multiple formats: YAML, JSON, TOML, etc.
pub fn load_config(config_path: &str) -> Result<SwitchyardConfig> {
    let config_path = Path::new(config_path);

    // Determine file format based on extension
    let format = match config_path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        Some("json") => FileFormat::Json,
        Some("ini") => FileFormat::Ini,
        _ => FileFormat::Toml,
    };

    let settings = Config::builder()
        .add_source(File::new(
            config_path
                .to_str()
                .ok_or_else(|| eyre::eyre!("Invalid UTF-8 path: {}", config_path.display()))?,
            format,
        ))
        .add_source(env_source())
        .build()
        .wrap_err_with(|| format!("Failed to build config from {}", config_path.display()))?;

    settings.try_deserialize().wrap_err_with(|| {
        format!(
            "Failed to deserialize config from {}",
            config_path.display()
        )
    })
}

/// Load the file if it exists, otherwise defaults plus environment overrides
pub fn load_config_or_default(config_path: &str) -> Result<SwitchyardConfig> {
    if Path::new(config_path).exists() {
        return load_config(config_path);
    }

    tracing::debug!("Config file {} not found, using defaults", config_path);
    Config::builder()
        .add_source(env_source())
        .build()
        .wrap_err("Failed to build config from environment")?
        .try_deserialize()
        .wrap_err("Failed to deserialize config from environment")
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
