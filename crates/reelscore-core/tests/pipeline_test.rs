use reelscore_core::analysis::{correlations, description_listing, metric_breakdown, top_n};
use reelscore_core::{
    load_records, normalize_all, rank, score, FilterSpec, Metric, NormalizeOptions, ScoreError,
    ScoreMode, WeightConfig,
};
use std::io::Write;
use tempfile::NamedTempFile;

const DATASET: &str = r#"[
  {"tiktok_user": "anna", "title": "Morning routine", "likes": 10, "shares": "2",
   "bookmarks": 1, "comments": 4, "statsV2": {"playCount": 1000}},
  {"tiktok_user": "ben", "title": "Gym vlog", "likes": "5", "shares": 0,
   "bookmarks": null, "comments": "abc", "statsV2": null},
  {"title": "Routine for busy days", "likes": 10.7, "shares": -3,
   "bookmarks": "1", "comments": 1, "statsV2": {"playCount": "250"}}
]"#;

fn dataset_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(DATASET.as_bytes()).unwrap();
    file
}

#[test]
fn likes_only_ranking_keeps_ties_in_input_order() {
    let file = dataset_file();
    let raws = load_records(file.path()).unwrap();
    let records = normalize_all(&raws, &NormalizeOptions::default());
    assert_eq!(records.len(), 3);
    assert_eq!(records[2].creator, "Unbekannt");
    assert_eq!(records[2].likes, 10);
    assert_eq!(records[2].shares, 0);

    let weights = WeightConfig::new([(Metric::Likes, 1.0)]);
    let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
    let ranked = rank(&scored, &FilterSpec::default());

    let creators: Vec<&str> = ranked.iter().map(|r| r.record.creator.as_str()).collect();
    assert_eq!(creators, vec!["anna", "Unbekannt", "ben"]);
    assert_eq!(ranked[0].success_score, 100.0);
    assert_eq!(ranked[2].success_score, 50.0);
}

#[test]
fn full_metric_set_with_filters() {
    let file = dataset_file();
    let records = normalize_all(&load_records(file.path()).unwrap(), &NormalizeOptions::default());

    let weights = WeightConfig::new(Metric::ALL.map(|m| (m, 1.0)));
    let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();
    assert!(scored
        .iter()
        .all(|r| (0.0..=100.0).contains(&r.success_score)));

    let filters = FilterSpec::default().with_search("ROUTINE");
    let ranked = rank(&scored, &filters);
    assert_eq!(ranked.len(), 2);
    assert!(ranked[0].success_score >= ranked[1].success_score);

    let filters = FilterSpec::default().with_creators(["nobody"]);
    assert!(rank(&scored, &filters).is_empty());
}

#[test]
fn raw_mode_is_unbounded() {
    let file = dataset_file();
    let records = normalize_all(&load_records(file.path()).unwrap(), &NormalizeOptions::default());
    let weights = WeightConfig::new([(Metric::Shares, 1.0)]);
    let scored = score(&records, &weights, ScoreMode::Raw).unwrap();
    assert_eq!(scored[0].success_score, 200.0);
    assert_eq!(scored[0].normalized(Metric::Shares), Some(1.0));
}

#[test]
fn zero_weights_fail_before_scoring() {
    let file = dataset_file();
    let records = normalize_all(&load_records(file.path()).unwrap(), &NormalizeOptions::default());
    let weights = WeightConfig::new(Metric::WITHOUT_VIEWS.map(|m| (m, 0.0)));
    assert!(matches!(
        score(&records, &weights, ScoreMode::Normalized),
        Err(ScoreError::ZeroWeightSum { .. })
    ));
}

#[test]
fn analysis_views() {
    let file = dataset_file();
    let records = normalize_all(&load_records(file.path()).unwrap(), &NormalizeOptions::default());
    let weights = WeightConfig::new(Metric::ALL.map(|m| (m, 1.0)));
    let scored = score(&records, &weights, ScoreMode::Normalized).unwrap();

    let top = top_n(&scored, 2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].record.creator, "anna");

    let rows = metric_breakdown(&top, &weights, 10);
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0].video, "1. @anna");

    let corr = correlations(&scored, &Metric::ALL);
    assert_eq!(corr.len(), 5);
    assert!(corr.iter().all(|(_, c)| c.map_or(true, |v| (-1.0..=1.0).contains(&v))));

    let listing = description_listing(records.iter().map(|r| r.description.as_str()));
    assert!(listing.starts_with("1. Morning routine\n2. Gym vlog\n"));
}
