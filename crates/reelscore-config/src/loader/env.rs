//! Environment variable configuration overlay
//!
//! Supports environment variables in the format:
//! `REELSCORE_<section>_<field>=value`
//!
//! Examples:
//! - `REELSCORE_SCORING_SHARES=2.5`
//! - `REELSCORE_SCORING_NORMALIZE=false`
//! - `REELSCORE_SCORING_METRICS=likes,shares,bookmarks,comments`
//! - `REELSCORE_DATASET_ACTIVE=ohne_views`
//! - `REELSCORE_LLM_PROVIDER=openai`

use super::Layer;
use crate::{error::ConfigError, types::*, Config, Result};
use std::env;
use tracing::warn;

const PREFIX: &str = "REELSCORE_";

/// Parse configuration from environment variables
///
/// The layer touches exactly the fields that have a variable set. Variables
/// that fail to parse are logged and skipped.
pub fn from_env() -> Result<Option<Layer>> {
    let mut layer = Layer::new(Config::default());

    let env_vars: Vec<(String, String)> = env::vars()
        .filter(|(k, _)| k.starts_with(PREFIX))
        .collect();

    if env_vars.is_empty() {
        return Ok(None);
    }

    for (key, value) in env_vars {
        match apply_env_var(&mut layer.config, &key, &value) {
            Ok(path) => {
                layer.touched.insert(path);
            }
            Err(e) => warn!(var = %key, error = %e, "ignoring environment override"),
        }
    }

    Ok(Some(layer))
}

/// Apply a single environment variable to config, returning the dotted path
/// it set
fn apply_env_var(config: &mut Config, key: &str, value: &str) -> Result<String> {
    let key = key.strip_prefix(PREFIX).unwrap_or(key);

    let parts: Vec<&str> = key.split('_').collect();
    if parts.len() < 2 {
        return Err(ConfigError::EnvVarError {
            var: key.to_string(),
            message: "Expected format: REELSCORE_<section>_<field>".to_string(),
        });
    }

    let section = parts[0].to_lowercase();
    let field = parts[1..].join("_").to_lowercase();

    match section.as_str() {
        "dataset" => apply_dataset_var(&mut config.dataset, &field, value)?,
        "scoring" => {
            if let Ok(metric) = field.parse::<Metric>() {
                apply_weight_var(&mut config.scoring, metric, &field, value)?;
                return Ok(format!("scoring.weights.{}", metric.key()));
            }
            apply_scoring_var(&mut config.scoring, &field, value)?
        }
        "analysis" => apply_analysis_var(&mut config.analysis, &field, value)?,
        "llm" => apply_llm_var(&mut config.llm, &field, value)?,
        _ => {
            return Err(ConfigError::EnvVarError {
                var: key.to_string(),
                message: format!("Unknown section: {}", section),
            })
        }
    }

    Ok(format!("{}.{}", section, field))
}

fn apply_dataset_var(config: &mut DatasetConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "active" => config.active = value.to_string(),
        "default_creator" => config.default_creator = value.to_string(),
        "description_chars" => {
            config.description_chars = parse_int("REELSCORE_DATASET_DESCRIPTION_CHARS", value)?
        }
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}DATASET_{}", PREFIX, field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_weight_var(
    config: &mut ScoringConfig,
    metric: Metric,
    field: &str,
    value: &str,
) -> Result<()> {
    let weight = value.parse().map_err(|_| ConfigError::EnvVarError {
        var: format!("{}SCORING_{}", PREFIX, field.to_uppercase()),
        message: format!("Invalid float: {}", value),
    })?;
    config.weights.set(metric, weight);
    Ok(())
}

fn apply_scoring_var(config: &mut ScoringConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "normalize" => config.normalize = parse_bool(value)?,
        "metrics" => {
            config.metrics = value
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(str::parse)
                .collect::<Result<Vec<Metric>>>()?;
        }
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}SCORING_{}", PREFIX, field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_analysis_var(config: &mut AnalysisConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "top_n" => config.top_n = parse_int("REELSCORE_ANALYSIS_TOP_N", value)?,
        "breakdown_n" => config.breakdown_n = parse_int("REELSCORE_ANALYSIS_BREAKDOWN_N", value)?,
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}ANALYSIS_{}", PREFIX, field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn apply_llm_var(config: &mut LlmConfig, field: &str, value: &str) -> Result<()> {
    match field {
        "provider" => config.provider = LlmProvider::parse(value)?,
        "model" => config.model = value.to_string(),
        "max_tokens" => {
            config.max_tokens = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: "REELSCORE_LLM_MAX_TOKENS".to_string(),
                message: format!("Invalid integer: {}", value),
            })?;
        }
        "timeout_secs" => {
            config.timeout_secs = value.parse().map_err(|_| ConfigError::EnvVarError {
                var: "REELSCORE_LLM_TIMEOUT_SECS".to_string(),
                message: format!("Invalid integer: {}", value),
            })?;
        }
        "api_base" => config.api_base = Some(value.to_string()),
        "language" => config.language = value.to_string(),
        _ => {
            return Err(ConfigError::EnvVarError {
                var: format!("{}LLM_{}", PREFIX, field.to_uppercase()),
                message: format!("Unknown field: {}", field),
            })
        }
    }
    Ok(())
}

fn parse_int(var: &str, value: &str) -> Result<usize> {
    value.parse().map_err(|_| ConfigError::EnvVarError {
        var: var.to_string(),
        message: format!("Invalid integer: {}", value),
    })
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::EnvVarError {
            var: value.to_string(),
            message: "Expected true/false, 1/0, yes/no, or on/off".to_string(),
        }),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serializes tests that touch process-wide env vars.
    pub(crate) static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn cleanup_env_vars() {
        let keys: Vec<String> = env::vars()
            .filter(|(k, _)| k.starts_with(PREFIX))
            .map(|(k, _)| k)
            .collect();
        for key in keys {
            env::remove_var(&key);
        }
    }

    #[test]
    fn test_scoring_weight_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        env::set_var("REELSCORE_SCORING_SHARES", "3.5");
        let config = from_env().unwrap().unwrap().config;
        assert_eq!(config.scoring.weights.shares, 3.5);
        cleanup_env_vars();
    }

    #[test]
    fn test_scoring_metrics_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        env::set_var("REELSCORE_SCORING_METRICS", "likes, shares,comments");
        env::set_var("REELSCORE_SCORING_NORMALIZE", "off");
        let config = from_env().unwrap().unwrap().config;
        assert_eq!(
            config.scoring.metrics,
            vec![Metric::Likes, Metric::Shares, Metric::Comments]
        );
        assert!(!config.scoring.normalize);
        cleanup_env_vars();
    }

    #[test]
    fn test_dataset_and_llm_env() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        env::set_var("REELSCORE_DATASET_ACTIVE", "ohne_views");
        env::set_var("REELSCORE_LLM_PROVIDER", "ollama");
        env::set_var("REELSCORE_LLM_MAX_TOKENS", "512");
        let config = from_env().unwrap().unwrap().config;
        assert_eq!(config.dataset.active, "ohne_views");
        assert_eq!(config.llm.provider, LlmProvider::Ollama);
        assert_eq!(config.llm.max_tokens, 512);
        cleanup_env_vars();
    }

    #[test]
    fn test_bad_value_is_skipped() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        env::set_var("REELSCORE_SCORING_LIKES", "lots");
        let layer = from_env().unwrap().unwrap();
        assert_eq!(layer.config.scoring.weights.likes, 1.0);
        assert!(layer.touched.is_empty());
        cleanup_env_vars();
    }

    #[test]
    fn test_touched_paths_match_variables() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        env::set_var("REELSCORE_SCORING_SHARES", "2.0");
        env::set_var("REELSCORE_SCORING_NORMALIZE", "true");
        env::set_var("REELSCORE_LLM_TIMEOUT_SECS", "30");
        let layer = from_env().unwrap().unwrap();
        let touched: Vec<&str> = layer.touched.iter().map(String::as_str).collect();
        assert_eq!(
            touched,
            vec!["llm.timeout_secs", "scoring.normalize", "scoring.weights.shares"]
        );
        cleanup_env_vars();
    }

    #[test]
    fn test_bool_parsing() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(parse_bool("yes").unwrap());
        assert!(!parse_bool("false").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn test_no_env_vars() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        cleanup_env_vars();
        assert!(from_env().unwrap().is_none());
    }
}
