//! Configuration merging logic
//!
//! Copies the fields a [`Layer`] touches onto the configuration built so far.

use super::Layer;
use crate::{types::*, Config};

/// Every path a layer can touch.
pub const FIELDS: [&str; 19] = [
    "dataset.sources",
    "dataset.active",
    "dataset.default_creator",
    "dataset.description_chars",
    "scoring.weights.likes",
    "scoring.weights.shares",
    "scoring.weights.bookmarks",
    "scoring.weights.comments",
    "scoring.weights.views",
    "scoring.metrics",
    "scoring.normalize",
    "analysis.top_n",
    "analysis.breakdown_n",
    "llm.provider",
    "llm.model",
    "llm.max_tokens",
    "llm.api_base",
    "llm.timeout_secs",
    "llm.language",
];

/// Merge `layer` onto `base`; untouched fields keep the base value.
pub fn merge(mut base: Config, layer: Layer) -> Config {
    let Layer {
        config: overlay,
        touched,
    } = layer;
    let set = |path: &str| touched.contains(path);

    merge_dataset(&mut base.dataset, overlay.dataset, &set);
    merge_scoring(&mut base.scoring, overlay.scoring, &set);
    merge_analysis(&mut base.analysis, overlay.analysis, &set);
    merge_llm(&mut base.llm, overlay.llm, &set);

    base
}

fn take<T>(slot: &mut T, value: T, set: bool) {
    if set {
        *slot = value;
    }
}

fn merge_dataset(base: &mut DatasetConfig, o: DatasetConfig, set: &dyn Fn(&str) -> bool) {
    take(&mut base.sources, o.sources, set("dataset.sources"));
    take(&mut base.active, o.active, set("dataset.active"));
    take(
        &mut base.default_creator,
        o.default_creator,
        set("dataset.default_creator"),
    );
    take(
        &mut base.description_chars,
        o.description_chars,
        set("dataset.description_chars"),
    );
}

fn merge_scoring(base: &mut ScoringConfig, o: ScoringConfig, set: &dyn Fn(&str) -> bool) {
    for metric in Metric::ALL {
        if set(&format!("scoring.weights.{}", metric.key())) {
            base.weights.set(metric, o.weights.get(metric));
        }
    }
    take(&mut base.metrics, o.metrics, set("scoring.metrics"));
    take(&mut base.normalize, o.normalize, set("scoring.normalize"));
}

fn merge_analysis(base: &mut AnalysisConfig, o: AnalysisConfig, set: &dyn Fn(&str) -> bool) {
    take(&mut base.top_n, o.top_n, set("analysis.top_n"));
    take(&mut base.breakdown_n, o.breakdown_n, set("analysis.breakdown_n"));
}

fn merge_llm(base: &mut LlmConfig, o: LlmConfig, set: &dyn Fn(&str) -> bool) {
    take(&mut base.provider, o.provider, set("llm.provider"));
    take(&mut base.model, o.model, set("llm.model"));
    take(&mut base.max_tokens, o.max_tokens, set("llm.max_tokens"));
    take(&mut base.api_base, o.api_base, set("llm.api_base"));
    take(&mut base.timeout_secs, o.timeout_secs, set("llm.timeout_secs"));
    take(&mut base.language, o.language, set("llm.language"));
}
