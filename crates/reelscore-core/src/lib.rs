//! Success score pipeline for short-form video records.
//!
//! raw JSON → [`normalize`] → [`CanonicalRecord`] → [`score`] →
//! [`ScoredRecord`] → [`rank`].

pub mod analysis;
pub mod dataset;
pub mod error;
pub mod models;
pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use analysis::{BreakdownRow, ScoreBand};
pub use dataset::{load_records, load_source, resolve_source, DatasetSource};
pub use error::{DatasetError, ScoreError};
pub use models::{CanonicalRecord, RawRecord, ScoredRecord};
pub use normalize::{normalize, normalize_all, NormalizeOptions};
pub use ranking::{creators, rank, FilterSpec};
pub use reelscore_config::Metric;
pub use scoring::{score, ScoreMode, WeightConfig};
