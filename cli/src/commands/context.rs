use super::{GlobalArgs, ScoringArgs};
use anyhow::{Context as _, Result};
use reelscore_config::{Config, ConfigError, Validate};
use reelscore_core::{
    dataset::{load_source, resolve_source, DatasetSource},
    normalize_all, score, CanonicalRecord, NormalizeOptions, ScoreMode, ScoredRecord,
    WeightConfig,
};
use tracing::debug;

/// Load config from file + env, then apply the command line overlay.
///
/// Config errors are returned untouched so `main` can render them with
/// [`reelscore_config::ErrorFormatter`].
pub fn load_config(global: &GlobalArgs, scoring: Option<&ScoringArgs>) -> Result<Config> {
    let mut config = Config::builder(global.config.as_deref()).build()?;

    if let Some(args) = scoring {
        apply_scoring_args(&mut config, args)?;
    }

    if let Some(name) = &global.dataset {
        config.dataset.active = name.clone();
    }

    config.validate()?;
    Ok(config)
}

fn apply_scoring_args(config: &mut Config, args: &ScoringArgs) -> Result<(), ConfigError> {
    for (metric, weight) in args.weight_overrides() {
        config.scoring.weights.set(metric, weight);
    }
    if let Some(metrics) = &args.metrics {
        config.scoring.metrics = metrics.clone();
    }
    if args.raw {
        config.scoring.normalize = false;
    }
    config.scoring.validate()
}

/// Everything a one-shot command needs: config, chosen dataset, records.
pub struct Workspace {
    pub config: Config,
    pub source: DatasetSource,
    pub records: Vec<CanonicalRecord>,
}

impl Workspace {
    pub fn open(global: &GlobalArgs, scoring: Option<&ScoringArgs>) -> Result<Self> {
        let config = load_config(global, scoring)?;
        let source = resolve_source(&config.dataset, None, global.input.as_deref())?;
        let raws = load_source(&source)
            .with_context(|| format!("Could not load dataset '{}'", source.name))?;
        let records = normalize_all(&raws, &NormalizeOptions::from_config(&config.dataset));
        debug!(
            dataset = %source.name,
            path = %source.path.display(),
            records = records.len(),
            "workspace ready"
        );

        Ok(Self {
            config,
            source,
            records,
        })
    }

    pub fn weights(&self) -> WeightConfig {
        WeightConfig::from_config(&self.config.scoring)
    }

    pub fn mode(&self) -> ScoreMode {
        ScoreMode::from_normalize(self.config.scoring.normalize)
    }

    pub fn scored(&self) -> Result<Vec<ScoredRecord>> {
        Ok(score(&self.records, &self.weights(), self.mode())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelscore_config::Metric;

    #[test]
    fn test_scoring_args_override_config() {
        let mut config = Config::default();
        let args = ScoringArgs {
            shares: Some(4.0),
            views: Some(0.0),
            raw: true,
            metrics: Some(Metric::WITHOUT_VIEWS.to_vec()),
            ..Default::default()
        };
        apply_scoring_args(&mut config, &args).unwrap();
        assert_eq!(config.scoring.weights.shares, 4.0);
        assert_eq!(config.scoring.weights.views, 0.0);
        assert_eq!(config.scoring.weights.likes, 1.0);
        assert!(!config.scoring.normalize);
        assert_eq!(config.scoring.metrics.len(), 4);
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let mut config = Config::default();
        let args = ScoringArgs {
            likes: Some(7.5),
            ..Default::default()
        };
        assert!(matches!(
            apply_scoring_args(&mut config, &args),
            Err(ConfigError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_active_weights_rejected() {
        let mut config = Config::default();
        let args = ScoringArgs {
            likes: Some(0.0),
            metrics: Some(vec![Metric::Likes]),
            ..Default::default()
        };
        assert!(matches!(
            apply_scoring_args(&mut config, &args),
            Err(ConfigError::ZeroWeightSum { .. })
        ));
    }
}
