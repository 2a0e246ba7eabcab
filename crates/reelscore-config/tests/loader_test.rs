use reelscore_config::{ConfigBuilder, ConfigError, Metric};
use std::env;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_LOCK: Mutex<()> = Mutex::new(());

fn clear_env() {
    let keys: Vec<String> = env::vars()
        .map(|(k, _)| k)
        .filter(|k| k.starts_with("REELSCORE_"))
        .collect();
    for key in keys {
        env::remove_var(key);
    }
}

fn write_config(suffix: &str, body: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(body.as_bytes()).unwrap();
    file
}

#[test]
fn toml_file_overrides_defaults() {
    let file = write_config(
        ".toml",
        r#"
[dataset]
active = "q3"

[dataset.sources]
q3 = "data/q3.json"

[scoring]
normalize = false
metrics = ["likes", "shares", "bookmarks", "comments"]

[scoring.weights]
shares = 3.0
"#,
    );

    let config = ConfigBuilder::new().with_file(file.path()).build().unwrap();
    assert_eq!(config.dataset.active, "q3");
    assert_eq!(
        config.dataset.active_source().unwrap().to_str(),
        Some("data/q3.json")
    );
    assert!(!config.scoring.normalize);
    assert_eq!(config.scoring.metrics, Metric::WITHOUT_VIEWS.to_vec());
    assert_eq!(config.scoring.weights.shares, 3.0);
    assert_eq!(config.scoring.weights.bookmarks, 1.5);
}

#[test]
fn json_file_with_zero_weights_is_rejected() {
    let file = write_config(
        ".json",
        r#"{
  "scoring": {
    "metrics": ["likes"],
    "weights": { "likes": 0.0 }
  }
}"#,
    );

    let err = ConfigBuilder::new()
        .with_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::ZeroWeightSum { .. }));
}

#[test]
fn yaml_file_with_unknown_active_source_is_rejected() {
    let file = write_config(
        ".yaml",
        r#"
dataset:
  active: missing
"#,
    );

    let err = ConfigBuilder::new()
        .with_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnum { .. }));
}

#[test]
fn unsupported_extension_is_rejected() {
    let file = write_config(".ini", "scoring = 1");
    let err = ConfigBuilder::new()
        .with_file(file.path())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::UnknownFormat { .. }));
}

#[test]
fn env_overrides_file_even_with_default_values() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let file = write_config(
        ".toml",
        r#"
[scoring]
normalize = false
metrics = ["likes", "shares", "bookmarks", "comments"]

[scoring.weights]
shares = 4.0
"#,
    );
    env::set_var("REELSCORE_SCORING_NORMALIZE", "true");
    env::set_var(
        "REELSCORE_SCORING_METRICS",
        "likes,shares,bookmarks,comments,views",
    );
    env::set_var("REELSCORE_SCORING_SHARES", "2.0");

    let config = ConfigBuilder::new()
        .with_file(file.path())
        .with_env()
        .build();
    clear_env();

    let config = config.unwrap();
    assert!(config.scoring.normalize);
    assert_eq!(config.scoring.metrics, Metric::ALL.to_vec());
    assert_eq!(config.scoring.weights.shares, 2.0);
}

#[test]
fn env_can_complete_a_file_that_fails_alone() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    let file = write_config(
        ".yaml",
        r#"
scoring:
  metrics: [likes]
  weights:
    likes: 0.0
"#,
    );
    env::set_var("REELSCORE_SCORING_LIKES", "1.5");

    let config = ConfigBuilder::new()
        .with_file(file.path())
        .with_env()
        .build();
    clear_env();

    let config = config.unwrap();
    assert_eq!(config.scoring.metrics, vec![Metric::Likes]);
    assert_eq!(config.scoring.weights.likes, 1.5);
}
