//! Analysis view sizes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of videos in the top chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Number of top videos whose normalized metrics are broken down
    #[serde(default = "default_breakdown_n")]
    pub breakdown_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            breakdown_n: default_breakdown_n(),
        }
    }
}

impl crate::validation::Validate for AnalysisConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::validate_positive;

        validate_positive("analysis.top_n", self.top_n, 0)?;
        validate_positive("analysis.breakdown_n", self.breakdown_n, 0)?;

        if self.top_n > 1000 {
            return Err(ConfigError::ValidationError {
                field: "analysis.top_n".to_string(),
                message: format!("top_n too large ({}), consider using <= 1000", self.top_n),
            });
        }

        if self.breakdown_n > self.top_n {
            return Err(ConfigError::ValidationError {
                field: "analysis.breakdown_n".to_string(),
                message: format!(
                    "breakdown_n ({}) cannot exceed top_n ({})",
                    self.breakdown_n, self.top_n
                ),
            });
        }

        Ok(())
    }
}

fn default_top_n() -> usize {
    20
}

fn default_breakdown_n() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_breakdown_larger_than_top() {
        let config = AnalysisConfig {
            top_n: 5,
            breakdown_n: 6,
        };
        assert!(config.validate().is_err());
    }
}
