use reelscore_config::Metric;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of a scoring pass. Malformed record fields never end up here;
/// they are coerced to zero during normalization.
#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("no metrics selected for scoring")]
    EmptyMetricSet,

    #[error("weight for {metric} must be a finite, non-negative number, got {value}")]
    InvalidWeight { metric: Metric, value: f64 },

    #[error("all weights are zero ({metrics}); raise at least one weight to compute a success score")]
    ZeroWeightSum { metrics: String },

    #[error("weights for {metrics} are too large to sum")]
    WeightOverflow { metrics: String },
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset {path} must contain a JSON array of records")]
    NotAnArray { path: PathBuf },

    #[error("unknown dataset '{name}' (configured: {available})")]
    UnknownSource { name: String, available: String },
}
