//! Success score computation.
//!
//! Both modes run over the full record set on every call. Column maxima are
//! taken across all records, so the same video can score differently
//! depending on what else is in the batch.

use crate::error::ScoreError;
use crate::models::{CanonicalRecord, ScoredRecord};
use reelscore_config::{Metric, ScoringConfig};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoreMode {
    /// Each metric divided by its column maximum, weighted mean scaled to 0-100.
    #[default]
    Normalized,
    /// Raw counts times fixed magnitude factors, weighted mean. Unbounded.
    Raw,
}

impl ScoreMode {
    pub fn from_normalize(normalize: bool) -> Self {
        if normalize {
            ScoreMode::Normalized
        } else {
            ScoreMode::Raw
        }
    }

    pub fn is_normalized(self) -> bool {
        self == ScoreMode::Normalized
    }
}

/// Magnitude compensation used in raw mode. Shares are typically two orders
/// of magnitude rarer than likes, views two orders more common.
pub fn raw_scale(metric: Metric) -> f64 {
    match metric {
        Metric::Likes => 1.0,
        Metric::Shares => 100.0,
        Metric::Bookmarks => 10.0,
        Metric::Comments => 10.0,
        Metric::Views => 0.01,
    }
}

/// Weights of the active metric set. Metrics not listed do not take part in
/// scoring at all.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightConfig {
    entries: Vec<(Metric, f64)>,
}

impl WeightConfig {
    /// Later entries for the same metric replace earlier ones.
    pub fn new(entries: impl IntoIterator<Item = (Metric, f64)>) -> Self {
        let mut out: Vec<(Metric, f64)> = Vec::new();
        for (metric, weight) in entries {
            match out.iter_mut().find(|(m, _)| *m == metric) {
                Some(slot) => slot.1 = weight,
                None => out.push((metric, weight)),
            }
        }
        Self { entries: out }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config
                .metrics
                .iter()
                .map(|m| (*m, config.weights.get(*m))),
        )
    }

    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.entries.iter().map(|(m, _)| *m)
    }

    pub fn entries(&self) -> &[(Metric, f64)] {
        &self.entries
    }

    pub fn weight(&self, metric: Metric) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| *m == metric)
            .map(|(_, w)| *w)
    }

    /// Reject an empty set, negative or non-finite weights and an all-zero
    /// set. Returns the largest weight.
    fn check(&self) -> Result<f64, ScoreError> {
        if self.entries.is_empty() {
            return Err(ScoreError::EmptyMetricSet);
        }

        for (metric, value) in &self.entries {
            if !value.is_finite() || *value < 0.0 {
                return Err(ScoreError::InvalidWeight {
                    metric: *metric,
                    value: *value,
                });
            }
        }

        let max = self.entries.iter().map(|(_, w)| *w).fold(0.0, f64::max);
        if max <= 0.0 {
            return Err(ScoreError::ZeroWeightSum {
                metrics: self.keys(),
            });
        }

        Ok(max)
    }

    fn keys(&self) -> String {
        self.entries
            .iter()
            .map(|(m, _)| m.key())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check every weight and return their sum.
    pub fn total(&self) -> Result<f64, ScoreError> {
        self.check()?;
        let total: f64 = self.entries.iter().map(|(_, w)| w).sum();
        if !total.is_finite() {
            return Err(ScoreError::WeightOverflow {
                metrics: self.keys(),
            });
        }
        Ok(total)
    }

    /// Weights divided by the largest one, and their sum.
    ///
    /// Scores only depend on weight ratios, so this keeps the sum finite
    /// for any finite weights without changing the result.
    fn scaled(&self) -> Result<(Vec<(Metric, f64)>, f64), ScoreError> {
        let max = self.check()?;
        let scaled: Vec<(Metric, f64)> = self
            .entries
            .iter()
            .map(|(m, w)| (*m, w / max))
            .collect();
        let total: f64 = scaled.iter().map(|(_, w)| w).sum();
        Ok((scaled, total))
    }
}

fn column_max(records: &[CanonicalRecord], metric: Metric) -> u64 {
    records.iter().map(|r| r.metric(metric)).max().unwrap_or(0)
}

/// Score every record.
///
/// Fails only when the weights are unusable (none active, negative, or all
/// zero). An empty record set yields an empty result.
pub fn score(
    records: &[CanonicalRecord],
    weights: &WeightConfig,
    mode: ScoreMode,
) -> Result<Vec<ScoredRecord>, ScoreError> {
    let (scaled, total) = weights.scaled()?;

    let maxima: Vec<(Metric, f64, u64)> = scaled
        .iter()
        .map(|(m, w)| (*m, *w, column_max(records, *m)))
        .collect();

    let scored: Vec<ScoredRecord> = records
        .iter()
        .map(|record| {
            let mut normalized = BTreeMap::new();
            let mut weighted = 0.0;

            for (metric, weight, max) in &maxima {
                let value = record.metric(*metric) as f64;
                let norm = if *max > 0 { value / *max as f64 } else { 0.0 };
                normalized.insert(*metric, norm);

                weighted += match mode {
                    ScoreMode::Normalized => norm * weight,
                    ScoreMode::Raw => value * weight * raw_scale(*metric),
                };
            }

            let success_score = match mode {
                ScoreMode::Normalized => (weighted / total * 100.0).min(100.0),
                ScoreMode::Raw => weighted / total,
            };

            ScoredRecord {
                record: record.clone(),
                normalized,
                success_score,
            }
        })
        .collect();

    debug!(
        records = scored.len(),
        metrics = maxima.len(),
        ?mode,
        "recomputed success scores"
    );

    Ok(scored)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(likes: u64, shares: u64, bookmarks: u64, comments: u64, views: u64) -> CanonicalRecord {
        CanonicalRecord {
            likes,
            shares,
            bookmarks,
            comments,
            views,
            ..Default::default()
        }
    }

    fn likes_only() -> WeightConfig {
        WeightConfig::new([(Metric::Likes, 1.0)])
    }

    #[test]
    fn test_normalized_likes_example() {
        let records = vec![rec(100, 0, 0, 0, 0), rec(50, 0, 0, 0, 0)];
        let scored = score(&records, &likes_only(), ScoreMode::Normalized).unwrap();
        assert_eq!(scored[0].normalized(Metric::Likes), Some(1.0));
        assert_eq!(scored[1].normalized(Metric::Likes), Some(0.5));
        assert_eq!(scored[0].success_score, 100.0);
        assert_eq!(scored[1].success_score, 50.0);
    }

    #[test]
    fn test_zero_column_contributes_nothing() {
        let records = vec![rec(10, 0, 0, 0, 0), rec(5, 0, 0, 0, 0)];
        let weights = WeightConfig::new([(Metric::Likes, 1.0), (Metric::Shares, 1.0)]);
        let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
        for s in &scored {
            assert_eq!(s.normalized(Metric::Shares), Some(0.0));
        }
        assert_eq!(scored[0].success_score, 50.0);
        assert_eq!(scored[1].success_score, 25.0);
    }

    #[test]
    fn test_normalized_range() {
        let records = vec![
            rec(3, 9, 1, 0, 1000),
            rec(7, 2, 0, 4, 5),
            rec(0, 0, 0, 0, 0),
            rec(7, 9, 1, 4, 1000),
        ];
        let weights = WeightConfig::from_config(&ScoringConfig::default());
        let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
        for s in &scored {
            assert!((0.0..=100.0).contains(&s.success_score));
        }
        assert_eq!(scored[2].success_score, 0.0);
        assert_eq!(scored[3].success_score, 100.0);
    }

    #[test]
    fn test_raw_mode_scales() {
        let records = vec![rec(10, 1, 2, 3, 1000)];
        let weights = WeightConfig::new(Metric::ALL.map(|m| (m, 1.0)));
        let scored = score(&records, &weights, ScoreMode::Raw).unwrap();
        // (10 + 100 + 20 + 30 + 10) / 5
        assert!((scored[0].success_score - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_raw_mode_weighted_mean() {
        let records = vec![rec(0, 2, 0, 0, 0)];
        let weights = WeightConfig::new([(Metric::Likes, 1.0), (Metric::Shares, 3.0)]);
        let scored = score(&records, &weights, ScoreMode::Raw).unwrap();
        // 2 * 3 * 100 / 4
        assert!((scored[0].success_score - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_inactive_metric_ignored() {
        let records = vec![rec(1, 0, 0, 0, 1_000_000), rec(2, 0, 0, 0, 0)];
        let weights = WeightConfig::new(Metric::WITHOUT_VIEWS.map(|m| (m, 1.0)));
        let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
        assert_eq!(scored[0].normalized(Metric::Views), None);
        assert!(scored[1].success_score > scored[0].success_score);
    }

    #[test]
    fn test_all_zero_weights_fail() {
        let records = vec![rec(1, 1, 1, 1, 1)];
        let weights = WeightConfig::new([(Metric::Likes, 0.0), (Metric::Views, 0.0)]);
        let err = score(&records, &weights, ScoreMode::Normalized).unwrap_err();
        assert!(matches!(err, ScoreError::ZeroWeightSum { .. }));
        assert!(err.to_string().contains("likes, views"));
    }

    #[test]
    fn test_invalid_weights_fail() {
        let weights = WeightConfig::new([(Metric::Likes, -1.0)]);
        assert!(matches!(
            score(&[], &weights, ScoreMode::Raw),
            Err(ScoreError::InvalidWeight { .. })
        ));
        let weights = WeightConfig::new([(Metric::Likes, f64::NAN)]);
        assert!(weights.total().is_err());
        assert_eq!(
            WeightConfig::new([]).total(),
            Err(ScoreError::EmptyMetricSet)
        );
    }

    #[test]
    fn test_huge_weights_stay_in_range() {
        let records = vec![rec(10, 4, 0, 0, 0), rec(5, 8, 0, 0, 0)];
        let weights =
            WeightConfig::new([(Metric::Likes, f64::MAX), (Metric::Shares, f64::MAX)]);
        let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
        for s in &scored {
            assert!((0.0..=100.0).contains(&s.success_score), "{}", s.success_score);
        }
        assert_eq!(scored[0].success_score, 75.0);
        assert_eq!(scored[1].success_score, 75.0);

        let raw = score(&records, &weights, ScoreMode::Raw).unwrap();
        // (10 + 400) / 2
        assert!((raw[0].success_score - 205.0).abs() < 1e-9);

        assert!(matches!(
            weights.total(),
            Err(ScoreError::WeightOverflow { .. })
        ));
    }

    #[test]
    fn test_scaling_keeps_weight_ratios() {
        let records = vec![rec(100, 0, 0, 0, 0), rec(50, 10, 0, 0, 0)];
        let small = WeightConfig::new([(Metric::Likes, 1.0), (Metric::Shares, 3.0)]);
        let large = WeightConfig::new([(Metric::Likes, 1e300), (Metric::Shares, 3e300)]);
        let a = score(&records, &small, ScoreMode::Normalized).unwrap();
        let b = score(&records, &large, ScoreMode::Normalized).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x.success_score - y.success_score).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_dataset() {
        let scored = score(&[], &likes_only(), ScoreMode::Normalized).unwrap();
        assert!(scored.is_empty());
    }

    #[test]
    fn test_weight_config_dedups() {
        let weights = WeightConfig::new([(Metric::Likes, 1.0), (Metric::Likes, 2.0)]);
        assert_eq!(weights.entries().len(), 1);
        assert_eq!(weights.weight(Metric::Likes), Some(2.0));
    }

    #[test]
    fn test_weight_config_from_config() {
        let mut config = ScoringConfig::default();
        config.metrics = Metric::WITHOUT_VIEWS.to_vec();
        let weights = WeightConfig::from_config(&config);
        assert_eq!(weights.metrics().count(), 4);
        assert_eq!(weights.weight(Metric::Shares), Some(2.0));
        assert_eq!(weights.weight(Metric::Views), None);
    }
}
