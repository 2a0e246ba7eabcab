//! Aggregate views over a scored record set.

use crate::models::ScoredRecord;
use crate::ranking::{rank, FilterSpec};
use crate::scoring::WeightConfig;
use reelscore_config::Metric;
use std::fmt;

/// Coarse quality bucket used for colouring scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: f64) -> Self {
        if score > 70.0 {
            ScoreBand::High
        } else if score > 40.0 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreBand::High => "high",
            ScoreBand::Medium => "medium",
            ScoreBand::Low => "low",
        };
        f.write_str(s)
    }
}

/// The `n` best records, best first.
pub fn top_n(records: &[ScoredRecord], n: usize) -> Vec<ScoredRecord> {
    let mut ranked = rank(records, &FilterSpec::default());
    ranked.truncate(n);
    ranked
}

/// One bar of the per-metric breakdown chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    /// "1. @creator", numbered by rank.
    pub video: String,
    pub metric: Metric,
    pub normalized: f64,
    pub weight: f64,
}

/// Normalized value of every active metric for the first `n` records.
///
/// `records` is expected to be ranked already.
pub fn metric_breakdown(
    records: &[ScoredRecord],
    weights: &WeightConfig,
    n: usize,
) -> Vec<BreakdownRow> {
    records
        .iter()
        .take(n)
        .enumerate()
        .flat_map(|(i, record)| {
            let video = format!("{}. @{}", i + 1, record.record.creator);
            weights.entries().iter().map(move |(metric, weight)| BreakdownRow {
                video: video.clone(),
                metric: *metric,
                normalized: record.normalized(*metric).unwrap_or(0.0),
                weight: *weight,
            })
        })
        .collect()
}

/// Pearson correlation of `xs` and `ys`. `None` when either side has no
/// variance or fewer than two points.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Correlation of each raw metric with the success score.
pub fn correlations(records: &[ScoredRecord], metrics: &[Metric]) -> Vec<(Metric, Option<f64>)> {
    let scores: Vec<f64> = records.iter().map(|r| r.success_score).collect();
    metrics
        .iter()
        .map(|metric| {
            let values: Vec<f64> = records
                .iter()
                .map(|r| r.record.metric(*metric) as f64)
                .collect();
            (*metric, pearson(&values, &scores))
        })
        .collect()
}

/// Numbered listing of descriptions, one per line, in input order.
pub fn description_listing<'a, I>(descriptions: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    descriptions
        .into_iter()
        .enumerate()
        .map(|(i, d)| format!("{}. {}\n", i + 1, d))
        .collect()
}
