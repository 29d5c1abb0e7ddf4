mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LapisError;
use defaults::*;

/// Top-level Lapis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// User id that is always allowed to run admin-gated commands.
    #[serde(default)]
    pub administrator_id: i64,
    /// Address tokens that put a message into strict command mode.
    #[serde(default = "default_aliases")]
    pub aliases: Vec<String>,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
            administrator_id: 0,
            aliases: default_aliases(),
        }
    }
}

/// Settings store config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, LapisError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LapisError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| LapisError::Config(format!("failed to parse config: {}", e)))?;

    if config.bot.aliases.iter().any(|a| a.trim().is_empty()) {
        return Err(LapisError::Config(
            "bot.aliases must not contain empty entries".to_string(),
        ));
    }

    Ok(config)
}
