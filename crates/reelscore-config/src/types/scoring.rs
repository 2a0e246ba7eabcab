//! Success score configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of every metric weight.
pub const WEIGHT_MAX: f64 = 5.0;

/// An engagement metric that can take part in scoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Likes,
    Shares,
    Bookmarks,
    Comments,
    Views,
}

impl Metric {
    /// All metrics in display order.
    pub const ALL: [Metric; 5] = [
        Metric::Likes,
        Metric::Shares,
        Metric::Bookmarks,
        Metric::Comments,
        Metric::Views,
    ];

    /// The four-metric variant used by datasets without view counts.
    pub const WITHOUT_VIEWS: [Metric; 4] = [
        Metric::Likes,
        Metric::Shares,
        Metric::Bookmarks,
        Metric::Comments,
    ];

    /// Lowercase key used in config files, env vars and CLI flags.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Likes => "likes",
            Metric::Shares => "shares",
            Metric::Bookmarks => "bookmarks",
            Metric::Comments => "comments",
            Metric::Views => "views",
        }
    }

    /// Human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Likes => "Likes",
            Metric::Shares => "Shares",
            Metric::Bookmarks => "Bookmarks",
            Metric::Comments => "Comments",
            Metric::Views => "Views",
        }
    }

    /// Lowest weight the interactive controls allow. Views may be switched
    /// off entirely, the others stay at least slightly weighted.
    pub fn min_weight(self) -> f64 {
        match self {
            Metric::Views => 0.0,
            _ => 0.1,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = crate::error::ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == needle)
            .ok_or_else(|| {
                let options: Vec<&str> = Metric::ALL.iter().map(|m| m.key()).collect();
                crate::error::ConfigError::invalid_enum("scoring.metrics", s, &options)
            })
    }
}

/// One weight per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricWeights {
    #[serde(default = "default_likes")]
    pub likes: f64,
    #[serde(default = "default_shares")]
    pub shares: f64,
    #[serde(default = "default_bookmarks")]
    pub bookmarks: f64,
    #[serde(default = "default_comments")]
    pub comments: f64,
    #[serde(default = "default_views")]
    pub views: f64,
}

impl MetricWeights {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Likes => self.likes,
            Metric::Shares => self.shares,
            Metric::Bookmarks => self.bookmarks,
            Metric::Comments => self.comments,
            Metric::Views => self.views,
        }
    }

    pub fn set(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::Likes => self.likes = value,
            Metric::Shares => self.shares = value,
            Metric::Bookmarks => self.bookmarks = value,
            Metric::Comments => self.comments = value,
            Metric::Views => self.views = value,
        }
    }
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            likes: default_likes(),
            shares: default_shares(),
            bookmarks: default_bookmarks(),
            comments: default_comments(),
            views: default_views(),
        }
    }
}

/// Success score configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Per-metric weights
    #[serde(default)]
    pub weights: MetricWeights,

    /// Metrics that take part in scoring
    ///
    /// Drop `views` for datasets that carry no view counts.
    #[serde(default = "default_metrics")]
    pub metrics: Vec<Metric>,

    /// Normalize each metric by its column maximum (0-100 scores)
    ///
    /// When false, raw values are scaled by fixed per-metric factors and
    /// the score has no upper bound.
    #[serde(default = "default_normalize")]
    pub normalize: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: MetricWeights::default(),
            metrics: default_metrics(),
            normalize: default_normalize(),
        }
    }
}

impl crate::validation::Validate for ScoringConfig {
    fn validate(&self) -> crate::error::Result<()> {
        use crate::error::ConfigError;
        use crate::validation::{validate_range, validate_weight_sum};

        for metric in Metric::ALL {
            validate_range(
                format!("scoring.weights.{}", metric.key()),
                self.weights.get(metric),
                0.0,
                WEIGHT_MAX,
            )?;
        }

        if self.metrics.is_empty() {
            return Err(ConfigError::ValidationError {
                field: "scoring.metrics".to_string(),
                message: "At least one metric must be active".to_string(),
            });
        }

        for (i, metric) in self.metrics.iter().enumerate() {
            if self.metrics[..i].contains(metric) {
                return Err(ConfigError::ValidationError {
                    field: "scoring.metrics".to_string(),
                    message: format!("Metric '{}' is listed more than once", metric),
                });
            }
        }

        let active: Vec<(String, f64)> = self
            .metrics
            .iter()
            .map(|m| (m.key().to_string(), self.weights.get(*m)))
            .collect();
        validate_weight_sum("scoring.weights", &active)?;

        Ok(())
    }
}

// Defaults mirror the dashboard sliders: shares are rarer than likes and
// count double, bookmarks sit in between, views only nudge the score.

fn default_likes() -> f64 {
    1.0
}

fn default_shares() -> f64 {
    2.0
}

fn default_bookmarks() -> f64 {
    1.5
}

fn default_comments() -> f64 {
    1.0
}

fn default_views() -> f64 {
    0.5
}

fn default_metrics() -> Vec<Metric> {
    Metric::ALL.to_vec()
}

fn default_normalize() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validate;

    #[test]
    fn test_default_is_valid() {
        assert!(ScoringConfig::default().validate().is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        let mut config = ScoringConfig::default();
        config.weights.shares = 5.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.likes = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_all_active_weights_zero() {
        let config = ScoringConfig {
            weights: MetricWeights {
                likes: 0.0,
                shares: 0.0,
                bookmarks: 0.0,
                comments: 0.0,
                views: 3.0,
            },
            metrics: Metric::WITHOUT_VIEWS.to_vec(),
            normalize: true,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_metric_rejected() {
        let config = ScoringConfig {
            metrics: vec![Metric::Likes, Metric::Likes],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_metrics_rejected() {
        let config = ScoringConfig {
            metrics: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("Shares".parse::<Metric>().unwrap(), Metric::Shares);
        assert_eq!(" views ".parse::<Metric>().unwrap(), Metric::Views);
        assert!("plays".parse::<Metric>().is_err());
    }

    #[test]
    fn test_weights_get_set() {
        let mut weights = MetricWeights::default();
        weights.set(Metric::Bookmarks, 4.2);
        assert_eq!(weights.get(Metric::Bookmarks), 4.2);
        assert_eq!(weights.get(Metric::Shares), 2.0);
    }
}
