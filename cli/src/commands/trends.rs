use super::context::Workspace;
use super::ui;
use super::utils::render_markdown_answer;
use super::GlobalArgs;
use anyhow::{Context, Result};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use reelscore_core::analysis::description_listing;
use reelscore_trends::{client_from_config, TrendRequest, TrendSession};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub fn handle_trends(
    global: &GlobalArgs,
    context: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let ws = Workspace::open(global, None)?;
    let listing = description_listing(ws.records.iter().map(|r| r.description.as_str()));
    let request = TrendRequest::new(listing, &ws.config.llm).with_context(context);
    let client = client_from_config(&ws.config.llm)?;

    if let Some(extra) = &request.context {
        ui::print_panel("Additional information", extra, Style::new().cyan(), None);
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.green} {msg}")?,
    );
    spinner.set_message(format!(
        "{} is analysing {} descriptions...",
        client.name(),
        ws.records.len()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut session = TrendSession::new();
    let result = session.generate(client.as_ref(), &request).map(str::to_string);
    spinner.finish_and_clear();
    let summary = result.context("Trend summary failed")?;

    ui::print_success("Trend analysis complete");
    println!("{}", render_markdown_answer(&summary));

    if let Some(path) = output {
        fs::write(&path, &summary)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        ui::print_success(&format!("Saved to {}", path.display()));
    }

    Ok(())
}
