//! Loading raw records from disk.

use crate::error::DatasetError;
use crate::models::RawRecord;
use reelscore_config::DatasetConfig;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// A record file chosen either by configured name or by explicit path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    /// Configured name, or the file name for explicit paths.
    pub name: String,
    pub path: PathBuf,
}

/// Pick the record file to load.
///
/// An explicit `input` path wins over everything. Otherwise `name` (or the
/// configured active source) is looked up in `dataset.sources`.
pub fn resolve_source(
    config: &DatasetConfig,
    name: Option<&str>,
    input: Option<&Path>,
) -> Result<DatasetSource, DatasetError> {
    if let Some(path) = input {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        return Ok(DatasetSource {
            name,
            path: path.to_path_buf(),
        });
    }

    let name = name.unwrap_or(&config.active);
    match config.source(name) {
        Some(path) => Ok(DatasetSource {
            name: name.to_string(),
            path: path.clone(),
        }),
        None => Err(DatasetError::UnknownSource {
            name: name.to_string(),
            available: config
                .sources
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
        }),
    }
}

/// Read a JSON array of raw records.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let Value::Array(items) = value else {
        return Err(DatasetError::NotAnArray {
            path: path.to_path_buf(),
        });
    };

    let records: Vec<RawRecord> = items.into_iter().map(RawRecord).collect();
    info!(path = %path.display(), records = records.len(), "loaded dataset");
    Ok(records)
}

/// Load the records of a resolved source.
pub fn load_source(source: &DatasetSource) -> Result<Vec<RawRecord>, DatasetError> {
    load_records(&source.path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_json(body: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_array() {
        let file = write_json(r#"[{"likes": 1}, {"title": "x"}, null]"#);
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("likes"), Some(&Value::from(1)));
    }

    #[test]
    fn test_empty_array() {
        let file = write_json("[]");
        assert!(load_records(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_object_is_rejected() {
        let file = write_json(r#"{"likes": 1}"#);
        assert!(matches!(
            load_records(file.path()),
            Err(DatasetError::NotAnArray { .. })
        ));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_json("[{");
        let err = load_records(file.path()).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse dataset"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_records(Path::new("/nonexistent/reelscore.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn test_resolve_active_source() {
        let config = DatasetConfig::default();
        let source = resolve_source(&config, None, None).unwrap();
        assert_eq!(source.name, "mit_views");
        assert_eq!(source.path, PathBuf::from("mit_views.json"));

        let source = resolve_source(&config, Some("ohne_views"), None).unwrap();
        assert_eq!(source.path, PathBuf::from("ohne_views.json"));
    }

    #[test]
    fn test_resolve_explicit_path_wins() {
        let config = DatasetConfig::default();
        let source =
            resolve_source(&config, Some("missing"), Some(Path::new("data/q3.json"))).unwrap();
        assert_eq!(source.name, "q3");
        assert_eq!(source.path, PathBuf::from("data/q3.json"));
    }

    #[test]
    fn test_resolve_unknown_name() {
        let err = resolve_source(&DatasetConfig::default(), Some("q4"), None).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("q4"));
        assert!(message.contains("mit_views, ohne_views"));
    }
}
