use super::context::Workspace;
use super::ui::{self, Table};
use super::utils::{format_count, format_score};
use super::{GlobalArgs, ScoringArgs};
use anyhow::Result;
use console::{Alignment, Style};
use reelscore_core::{rank, FilterSpec, Metric, ScoredRecord};

pub struct RankOptions {
    pub search: Option<String>,
    pub creators: Vec<String>,
    pub min_score: f64,
    pub limit: Option<usize>,
    pub json: bool,
}

impl RankOptions {
    fn filters(&self) -> FilterSpec {
        FilterSpec::default()
            .with_search(self.search.clone().unwrap_or_default())
            .with_creators(self.creators.iter().cloned())
            .with_min_score(self.min_score)
    }
}

pub fn handle_rank(global: &GlobalArgs, scoring: &ScoringArgs, opts: RankOptions) -> Result<()> {
    let ws = Workspace::open(global, Some(scoring))?;
    let scored = ws.scored()?;
    let mut ranked = rank(&scored, &opts.filters());
    let matched = ranked.len();
    if let Some(limit) = opts.limit {
        ranked.truncate(limit);
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
        return Ok(());
    }

    let normalized = ws.mode().is_normalized();
    ui::print_header(&format!(
        "Ranking · {} ({} of {} videos, {})",
        ws.source.name,
        matched,
        ws.records.len(),
        if normalized { "normalized" } else { "raw" }
    ));

    if ranked.is_empty() {
        println!("{}", Style::new().dim().apply_to("No videos match the filters."));
        return Ok(());
    }

    print_ranking(&ranked, &ws.config.scoring.metrics, normalized);
    Ok(())
}

pub fn print_ranking(ranked: &[ScoredRecord], metrics: &[Metric], normalized: bool) {
    let mut table = Table::new()
        .column("#", 4, Alignment::Right)
        .column("Creator", 18, Alignment::Left)
        .column("Score", 10, Alignment::Right);
    for metric in metrics {
        table = table.column(metric.label(), 11, Alignment::Right);
    }
    table = table.column("Description", 40, Alignment::Left);
    table.print_header();

    for (i, row) in ranked.iter().enumerate() {
        let mut values = vec![
            format!("{}", i + 1),
            format!("@{}", row.record.creator),
            format_score(row.success_score, normalized),
        ];
        values.extend(metrics.iter().map(|m| format_count(row.record.metric(*m))));
        values.push(row.record.description.clone());

        let styles = [
            Some(Style::new().dim()),
            Some(Style::new().bold()),
            Some(ui::band_style(row.success_score, normalized)),
        ];
        table.print_row(&values, &styles);
    }
}
