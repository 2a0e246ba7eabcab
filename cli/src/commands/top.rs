use super::context::Workspace;
use super::rank::print_ranking;
use super::ui::{self, Table};
use super::{GlobalArgs, ScoringArgs};
use anyhow::Result;
use console::{Alignment, Style};
use reelscore_core::analysis::{correlations, metric_breakdown, top_n};

pub fn handle_top(global: &GlobalArgs, scoring: &ScoringArgs, top: Option<usize>) -> Result<()> {
    let ws = Workspace::open(global, Some(scoring))?;
    let scored = ws.scored()?;
    let weights = ws.weights();
    let normalized = ws.mode().is_normalized();
    let n = top.unwrap_or(ws.config.analysis.top_n);

    let best = top_n(&scored, n);
    ui::print_header(&format!("Top {} videos · {}", best.len(), ws.source.name));
    print_ranking(&best, &ws.config.scoring.metrics, normalized);

    let breakdown_n = ws.config.analysis.breakdown_n.min(best.len());
    ui::print_header(&format!("Metric breakdown · top {}", breakdown_n));
    let table = Table::new()
        .column("Video", 24, Alignment::Left)
        .column("Metric", 10, Alignment::Left)
        .column("Normalized", 10, Alignment::Right)
        .column("Weight", 6, Alignment::Right)
        .column("", 20, Alignment::Left);
    table.print_header();
    for row in metric_breakdown(&best, &weights, breakdown_n) {
        let bar = "█".repeat((row.normalized * 20.0).round() as usize);
        table.print_row(
            &[
                row.video,
                row.metric.label().to_string(),
                format!("{:.3}", row.normalized),
                format!("{:.1}", row.weight),
                bar,
            ],
            &[None, None, None, Some(Style::new().dim()), Some(Style::new().cyan())],
        );
    }

    ui::print_header("Correlation with success score");
    for (metric, corr) in correlations(&scored, &ws.config.scoring.metrics) {
        let value = match corr {
            Some(c) => format!("{:+.3}", c),
            None => "n/a".to_string(),
        };
        ui::print_key_value(&format!("{:>10}", metric.label()), &value);
    }

    Ok(())
}
