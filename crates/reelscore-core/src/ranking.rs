use crate::models::ScoredRecord;
use std::collections::BTreeSet;

/// Conjunctive filters applied before sorting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    /// Case-insensitive substring matched against the description.
    pub search: Option<String>,
    /// Creators to keep. Empty keeps everyone.
    pub creators: BTreeSet<String>,
    /// Inclusive lower bound on the score. Zero disables the filter.
    pub min_score: f64,
}

impl FilterSpec {
    /// An empty string clears the search. Whitespace is matched literally.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = if search.is_empty() {
            None
        } else {
            Some(search)
        };
        self
    }

    pub fn with_creators<I, S>(mut self, creators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.creators = creators.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.creators.is_empty() && self.min_score <= 0.0
    }

    pub fn matches(&self, record: &ScoredRecord) -> bool {
        if let Some(needle) = &self.search {
            let haystack = record.record.description.to_lowercase();
            if !haystack.contains(&needle.to_lowercase()) {
                return false;
            }
        }

        if !self.creators.is_empty() && !self.creators.contains(&record.record.creator) {
            return false;
        }

        if self.min_score > 0.0 && record.success_score < self.min_score {
            return false;
        }

        true
    }
}

/// Filter, then sort by score descending. Equal scores keep input order.
pub fn rank(records: &[ScoredRecord], filters: &FilterSpec) -> Vec<ScoredRecord> {
    let mut out: Vec<ScoredRecord> = records
        .iter()
        .filter(|r| filters.matches(r))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.success_score.total_cmp(&a.success_score));
    out
}

/// Sorted, de-duplicated creator names.
pub fn creators(records: &[ScoredRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.record.creator.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
