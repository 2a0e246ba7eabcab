//! Config file layer
//!
//! A file only overrides the keys it spells out. Everything else is left to
//! the layers below it, so validation waits until all layers are merged.

use super::{formats, ConfigFormat, Layer};
use crate::{error::ConfigError, Result};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Read `path` into a [`Layer`] holding the typed config and the keys the
/// file sets.
pub fn load_layer<P: AsRef<Path>>(path: P) -> Result<Layer> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path)?;

    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let shown = path.to_str();
    let (config, tree) = match format {
        ConfigFormat::Yaml => (
            formats::yaml::parse_with_path(&content, shown)?,
            formats::yaml::parse_tree(&content, shown)?,
        ),
        ConfigFormat::Toml => (
            formats::toml::parse_with_path(&content, shown)?,
            formats::toml::parse_tree(&content, shown)?,
        ),
        ConfigFormat::Json => (
            formats::json::parse_with_path(&content, shown)?,
            formats::json::parse_tree(&content, shown)?,
        ),
    };

    Ok(Layer {
        config,
        touched: touched_paths(&tree),
    })
}

/// Dotted `section.field` paths present in a parsed document. Weights are
/// tracked per metric (`scoring.weights.likes`).
fn touched_paths(tree: &Value) -> BTreeSet<String> {
    let mut touched = BTreeSet::new();
    let Some(sections) = tree.as_object() else {
        return touched;
    };

    for (section, fields) in sections {
        let Some(fields) = fields.as_object() else {
            continue;
        };
        for (field, value) in fields {
            match (section.as_str(), field.as_str(), value.as_object()) {
                ("scoring", "weights", Some(weights)) => {
                    touched.extend(weights.keys().map(|k| format!("scoring.weights.{}", k)));
                }
                _ => {
                    touched.insert(format!("{}.{}", section, field));
                }
            }
        }
    }

    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn paths(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_touched_paths_from_toml() {
        let tree = formats::toml::parse_tree(
            r#"
[scoring]
normalize = false

[scoring.weights]
shares = 4.0

[llm]
model = "gpt-4o-mini"
"#,
            None,
        )
        .unwrap();
        assert_eq!(
            touched_paths(&tree),
            paths(&["llm.model", "scoring.normalize", "scoring.weights.shares"])
        );
    }

    #[test]
    fn test_touched_paths_ignores_non_tables() {
        let tree = formats::yaml::parse_tree("analysis: 3\ndataset:\n  active: q3\n", None).unwrap();
        assert_eq!(touched_paths(&tree), paths(&["dataset.active"]));
        assert!(touched_paths(&Value::Null).is_empty());
    }

    #[test]
    fn test_load_layer_keeps_invalid_values_for_later() {
        // Zero weights alone are rejected only once every layer is merged.
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"scoring": {"metrics": ["likes"], "weights": {"likes": 0.0}}}"#)
            .unwrap();
        let layer = load_layer(file.path()).unwrap();
        assert_eq!(layer.config.scoring.weights.likes, 0.0);
        assert!(layer.is_set("scoring.weights.likes"));
        assert!(!layer.is_set("scoring.weights.shares"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_layer("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }

    #[test]
    fn test_unknown_extension() {
        let err = load_layer("settings.ini").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat { .. }));
    }
}
