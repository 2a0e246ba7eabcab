//! Raw record → canonical record coercion.
//!
//! Metric coercion table:
//!
//! | raw value                         | result            |
//! |-----------------------------------|-------------------|
//! | absent / `null`                   | 0                 |
//! | non-negative integer              | as is             |
//! | non-negative float                | truncated         |
//! | negative number                   | 0                 |
//! | string of ASCII digits only       | parsed, saturating|
//! | any other string (incl. `"-5"`)   | 0                 |
//! | bool, array, object               | 0                 |

use crate::models::{CanonicalRecord, RawRecord};
use reelscore_config::DatasetConfig;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub default_creator: String,
    pub description_chars: usize,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self::from_config(&DatasetConfig::default())
    }
}

impl NormalizeOptions {
    pub fn from_config(config: &DatasetConfig) -> Self {
        Self {
            default_creator: config.default_creator.clone(),
            description_chars: config.description_chars,
        }
    }
}

/// Interpret `value` as a metric count. `None` means the value had to be
/// replaced by zero.
pub fn parse_metric(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(v)
            } else if n.is_i64() {
                None
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            }
        }
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(s.parse().unwrap_or(u64::MAX))
        }
        _ => None,
    }
}

fn metric_field(raw: Option<&Value>, coerced: &mut usize) -> u64 {
    match raw {
        None | Some(Value::Null) => 0,
        Some(value) => parse_metric(value).unwrap_or_else(|| {
            *coerced += 1;
            0
        }),
    }
}

fn text_field(raw: &RawRecord, key: &str) -> Option<String> {
    match raw.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Convert one raw record. Never fails; unusable fields fall back to their
/// defaults.
pub fn normalize(raw: &RawRecord, opts: &NormalizeOptions) -> CanonicalRecord {
    let mut coerced = 0;
    normalize_counted(raw, opts, &mut coerced)
}

fn normalize_counted(raw: &RawRecord, opts: &NormalizeOptions, coerced: &mut usize) -> CanonicalRecord {
    let views = raw
        .get("statsV2")
        .filter(|stats| !stats.is_null())
        .and_then(|stats| stats.get("playCount"));

    CanonicalRecord {
        creator: text_field(raw, "tiktok_user").unwrap_or_else(|| opts.default_creator.clone()),
        description: truncate_chars(
            &text_field(raw, "title").unwrap_or_default(),
            opts.description_chars,
        ),
        video_url: text_field(raw, "item_url")
            .or_else(|| text_field(raw, "video_url"))
            .unwrap_or_default(),
        likes: metric_field(raw.get("likes"), coerced),
        shares: metric_field(raw.get("shares"), coerced),
        bookmarks: metric_field(raw.get("bookmarks"), coerced),
        comments: metric_field(raw.get("comments"), coerced),
        views: metric_field(views, coerced),
        song_title: text_field(raw, "song_title").unwrap_or_default(),
    }
}

/// Convert a whole batch, one canonical record per raw record.
pub fn normalize_all(raws: &[RawRecord], opts: &NormalizeOptions) -> Vec<CanonicalRecord> {
    let mut coerced = 0;
    let records: Vec<CanonicalRecord> = raws
        .iter()
        .map(|raw| normalize_counted(raw, opts, &mut coerced))
        .collect();

    if coerced > 0 {
        debug!(
            records = records.len(),
            coerced, "replaced malformed metric fields with zero"
        );
    }

    records
}
