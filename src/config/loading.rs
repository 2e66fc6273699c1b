//! Configuration loading.
//!
//! Handles locating the configuration file, creating a default one on first
//! run, and turning TOML text into a validated [`Config`].

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::validation::validate_config;
use super::{Config, ConfigFile};
use crate::constants::CONFIG_FILE_NAME;

/// The default configuration path: `$XDG_CONFIG_HOME/sunsched/sunsched.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("could not determine configuration directory")?;
    Ok(config_dir.join("sunsched").join(CONFIG_FILE_NAME))
}

/// Load configuration from the default path, creating a default
/// configuration file if none exists yet.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        super::builder::create_default_config(&config_path)
            .context("failed to create default configuration")?;
    }
    load_from_path(&config_path)
}

/// Load and validate configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration from {}", path.display()))?;
    let config = load_from_str(&text)
        .with_context(|| format!("invalid configuration in {}", path.display()))?;
    log_decorated!("Configuration {} loaded", path.display());
    Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn load_from_str(text: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(text).context("configuration is not valid TOML")?;
    validate_config(&file)?;
    Config::from_file_format(file)
}
