//! JSON format parser

use crate::{error::ConfigError, Config, Result};

/// Parse configuration from JSON string
pub fn parse(content: &str) -> Result<Config> {
    parse_with_path(content, None)
}

/// Parse configuration from JSON string with file path for better errors
pub fn parse_with_path(content: &str, path: Option<&str>) -> Result<Config> {
    serde_json::from_str(content).map_err(|e| ConfigError::from_json_error(e, content, path))
}

/// Parse the JSON document without the config schema, to see which keys
/// it actually sets
pub fn parse_tree(content: &str, path: Option<&str>) -> Result<serde_json::Value> {
    serde_json::from_str(content).map_err(|e| ConfigError::from_json_error(e, content, path))
}
