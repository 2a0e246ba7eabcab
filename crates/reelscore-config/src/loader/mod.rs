//! Configuration loading from various sources

pub mod env;
pub mod file;
pub mod formats;
pub mod merge;

use crate::{error::ConfigError, Config, Result, Validate};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Format for configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yml") | Some("yaml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("json") => Ok(ConfigFormat::Json),
            _ => Err(ConfigError::UnknownFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// One configuration layer: a full [`Config`] plus the dotted paths
/// (`scoring.normalize`, `scoring.weights.shares`) it actually sets.
///
/// Only touched fields override the layers below, so a value that happens
/// to equal the default still wins.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub config: Config,
    pub touched: BTreeSet<String>,
}

impl Layer {
    /// A layer that sets nothing yet.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            touched: BTreeSet::new(),
        }
    }

    /// A layer that sets every field of `config`.
    pub fn full(config: Config) -> Self {
        Self {
            config,
            touched: merge::FIELDS.iter().map(|f| f.to_string()).collect(),
        }
    }

    pub fn touch(mut self, path: impl Into<String>) -> Self {
        self.touched.insert(path.into());
        self
    }

    pub fn is_set(&self, path: &str) -> bool {
        self.touched.contains(path)
    }
}

/// Configuration source for layered loading
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Load from a file
    File(PathBuf),
    /// Load from environment variables
    Environment,
    /// Explicit layer (CLI flags, programmatic use)
    Explicit(Layer),
}

/// Builder for loading and merging configurations
///
/// Supports layered configuration with proper precedence:
/// defaults < file < environment < explicit overrides
///
/// # Example
///
/// ```no_run
/// use reelscore_config::loader::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .with_file(".reelscore.toml")
///     .with_env()
///     .build()?;
/// # Ok::<(), reelscore_config::ConfigError>(())
/// ```
pub struct ConfigBuilder {
    sources: Vec<ConfigSource>,
}

impl ConfigBuilder {
    /// Create a new config builder starting with defaults
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.sources
            .push(ConfigSource::File(path.as_ref().to_path_buf()));
        self
    }

    /// Add environment variable overlay
    pub fn with_env(mut self) -> Self {
        self.sources.push(ConfigSource::Environment);
        self
    }

    /// Add a config that replaces every field below it
    pub fn with_config(self, config: Config) -> Self {
        self.with_layer(Layer::full(config))
    }

    /// Add a layer that overrides only its touched fields
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.sources.push(ConfigSource::Explicit(layer));
        self
    }

    /// Build and validate the final configuration
    ///
    /// Merges all sources in order, with later sources taking precedence.
    /// Validation runs once, on the merged result.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        for source in self.sources {
            let layer = match source {
                ConfigSource::File(path) => file::load_layer(&path)?,
                ConfigSource::Environment => match env::from_env()? {
                    Some(layer) => layer,
                    None => continue,
                },
                ConfigSource::Explicit(layer) => layer,
            };
            config = merge::merge(config, layer);
        }

        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Files searched by [`Config::load`], in order.
pub const DEFAULT_PATHS: [&str; 4] = [
    ".reelscore.toml",
    ".reelscore.yml",
    ".reelscore.yaml",
    ".reelscore.json",
];

impl Config {
    /// Load configuration from default locations
    ///
    /// Uses the first existing file of [`DEFAULT_PATHS`], falling back to
    /// defaults, and applies the environment overlay.
    pub fn load() -> Result<Self> {
        Self::builder(None).build()
    }

    /// Load configuration from a specific file
    ///
    /// Also applies environment variable overlays.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        ConfigBuilder::new().with_file(path).with_env().build()
    }

    /// Builder preloaded with the file layer and the env overlay, ready for
    /// an explicit overlay on top.
    pub fn builder(path: Option<&Path>) -> ConfigBuilder {
        let mut builder = ConfigBuilder::new();

        match path {
            Some(p) => builder = builder.with_file(p),
            None => {
                if let Some(found) = DEFAULT_PATHS.iter().find(|p| Path::new(p).exists()) {
                    builder = builder.with_file(found);
                }
            }
        }

        builder.with_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let config = ConfigBuilder::new().build().unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_explicit_overlay_wins() {
        let mut explicit = Config::default();
        explicit.scoring.weights.comments = 3.0;
        let config = ConfigBuilder::new().with_config(explicit).build().unwrap();
        assert_eq!(config.scoring.weights.comments, 3.0);
    }

    #[test]
    fn test_builder_with_env() {
        let _lock = env::tests::ENV_LOCK
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        std::env::set_var("REELSCORE_ANALYSIS_TOP_N", "25");
        let config = ConfigBuilder::new().with_env().build().unwrap();
        assert_eq!(config.analysis.top_n, 25);
        std::env::remove_var("REELSCORE_ANALYSIS_TOP_N");
    }

    #[test]
    fn test_partial_layer_keeps_lower_values() {
        let mut first = Config::default();
        first.scoring.normalize = false;
        first.scoring.weights.shares = 4.0;
        let first = Layer::new(first)
            .touch("scoring.normalize")
            .touch("scoring.weights.shares");

        // Second layer restores the default for `normalize` only.
        let second = Layer::new(Config::default()).touch("scoring.normalize");

        let config = ConfigBuilder::new()
            .with_layer(first)
            .with_layer(second)
            .build()
            .unwrap();
        assert!(config.scoring.normalize);
        assert_eq!(config.scoring.weights.shares, 4.0);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.yaml")).unwrap(),
            ConfigFormat::Yaml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.toml")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("config.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(ConfigFormat::from_path(Path::new("config.txt")).is_err());
    }

    #[test]
    fn test_builder_rejects_invalid_overlay() {
        let mut explicit = Config::default();
        explicit.analysis.top_n = 0;
        assert!(ConfigBuilder::new().with_config(explicit).build().is_err());
    }
}
