use reelscore_config::Metric;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One video record exactly as it appears in the input file.
///
/// Any JSON value is accepted; fields are looked up lazily and non-object
/// values simply have no fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(pub Value);

impl RawRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

impl From<Value> for RawRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A video with every field coerced to a usable type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub creator: String,
    pub description: String,
    pub video_url: String,
    pub likes: u64,
    pub shares: u64,
    pub bookmarks: u64,
    pub comments: u64,
    pub views: u64,
    pub song_title: String,
}

impl CanonicalRecord {
    pub fn metric(&self, metric: Metric) -> u64 {
        match metric {
            Metric::Likes => self.likes,
            Metric::Shares => self.shares,
            Metric::Bookmarks => self.bookmarks,
            Metric::Comments => self.comments,
            Metric::Views => self.views,
        }
    }
}

/// A canonical record plus its per-metric normalized values and score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredRecord {
    #[serde(flatten)]
    pub record: CanonicalRecord,
    /// Value divided by the column maximum, one entry per active metric.
    pub normalized: BTreeMap<Metric, f64>,
    pub success_score: f64,
}

impl ScoredRecord {
    pub fn normalized(&self, metric: Metric) -> Option<f64> {
        self.normalized.get(&metric).copied()
    }
}
