//! Configuration loading from TOML files

mod combat;

pub use combat::{
    CombatConfig, CritConfig, ElementPair, ElementalConfig, MitigationConfig, ScalingConfig,
    ScalingMode,
};

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

/// Load and validate a combat config file
pub fn load_combat_config(path: &Path) -> Result<CombatConfig, ConfigError> {
    let config: CombatConfig = load_toml(path)?;
    config.validate()?;
    Ok(config)
}

/// Parse and validate a combat config from a TOML string
pub fn parse_combat_config(content: &str) -> Result<CombatConfig, ConfigError> {
    let config: CombatConfig = parse_toml(content)?;
    config.validate()?;
    Ok(config)
}

/// The bundled default combat config
pub fn default_config() -> CombatConfig {
    let toml = include_str!("../../config/combat.toml");
    parse_combat_config(toml).unwrap_or_default()
}
