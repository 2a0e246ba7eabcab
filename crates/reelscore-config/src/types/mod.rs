//! Configuration type definitions
//!
//! This module contains all configuration structures organized by concern.
//! Each type is self-contained with validation and sensible defaults.

pub mod analysis;
pub mod dataset;
pub mod llm;
pub mod scoring;

pub use analysis::AnalysisConfig;
pub use dataset::DatasetConfig;
pub use llm::{LlmConfig, LlmProvider};
pub use scoring::{Metric, MetricWeights, ScoringConfig, WEIGHT_MAX};

use serde::{Deserialize, Serialize};

/// Main configuration struct aggregating all settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Record sources and normalization defaults
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Success score weights, metric set and mode
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Sizes of the analysis views
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Trend summary LLM settings
    #[serde(default)]
    pub llm: LlmConfig,
}

impl crate::validation::Validate for Config {
    fn validate(&self) -> crate::error::Result<()> {
        self.dataset.validate()?;
        self.scoring.validate()?;
        self.analysis.validate()?;
        self.llm.validate()?;

        Ok(())
    }
}
