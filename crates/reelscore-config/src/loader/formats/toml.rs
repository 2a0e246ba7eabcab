//! TOML format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from TOML string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from TOML string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    ::toml::from_str(content).map_err(|e| ConfigError::from_toml_error(e, content, path))
}

/// Parse the TOML document without the config schema, to see which keys
/// it actually sets
pub fn parse_tree(content: &str, path: Option<&str>) -> Result<serde_json::Value> {
    ::toml::from_str(content).map_err(|e| ConfigError::from_toml_error(e, content, path))
}
