//! Dataset sources and record normalization defaults

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Where records come from and how raw fields are defaulted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Named record files
    ///
    /// Each value is a JSON file holding an array of video records.
    #[serde(default = "default_sources")]
    pub sources: BTreeMap<String, PathBuf>,

    /// Name of the source loaded at startup
    #[serde(default = "default_active")]
    pub active: String,

    /// Creator name used when a record has none
    #[serde(default = "default_creator")]
    pub default_creator: String,

    /// Descriptions are cut to this many characters
    #[serde(default = "default_description_chars")]
    pub description_chars: usize,
}

impl DatasetConfig {
    /// Path of the source called `name`, if configured.
    pub fn source(&self, name: &str) -> Option<&PathBuf> {
        self.sources.get(name)
    }

    /// Path of the active source.
    pub fn active_source(&self) -> Option<&PathBuf> {
        self.source(&self.active)
    }

    /// Name of the source after `current`, wrapping around.
    pub fn next_source(&self, current: &str) -> Option<&str> {
        let names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        let pos = names.iter().position(|n| *n == current);
        match pos {
            Some(i) => names.get((i + 1) % names.len()).copied(),
            None => names.first().copied(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            active: default_active(),
            default_creator: default_creator(),
            description_chars: default_description_chars(),
        }
    }
}

impl crate::validation::Validate for DatasetConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        if self.sources.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "dataset.sources".to_string(),
                message: "Must configure at least one record source".to_string(),
            });
        }

        for (name, path) in &self.sources {
            if name.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: "dataset.sources".to_string(),
                    message: "Source names cannot be empty".to_string(),
                });
            }
            if path.as_os_str().is_empty() {
                return Err(ConfigError::ValidationError {
                    field: format!("dataset.sources.{}", name),
                    message: "Source path cannot be empty".to_string(),
                });
            }
        }

        if !self.sources.contains_key(&self.active) {
            let names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
            return Err(ConfigError::invalid_enum("dataset.active", &self.active, &names));
        }

        validate_positive("dataset.description_chars", self.description_chars, 0)?;

        Ok(())
    }
}

fn default_sources() -> BTreeMap<String, PathBuf> {
    BTreeMap::from([
        ("mit_views".to_string(), PathBuf::from("mit_views.json")),
        ("ohne_views".to_string(), PathBuf::from("ohne_views.json")),
    ])
}

fn default_active() -> String {
    "mit_views".to_string()
}

fn default_creator() -> String {
    "Unbekannt".to_string()
}

fn default_description_chars() -> usize {
    80
}
