use super::context::load_config;
use super::ui;
use super::utils::{format_score, metric_list};
use super::GlobalArgs;
use anyhow::Result;
use console::Style;
use reelscore_config::{loader::DEFAULT_PATHS, LlmProvider, Metric};
use reelscore_core::{load_records, normalize_all, score, NormalizeOptions, ScoreMode, WeightConfig};
use std::path::Path;

pub fn handle_status(global: &GlobalArgs) -> Result<()> {
    let config = load_config(global, None)?;

    let config_file = match &global.config {
        Some(path) => path.display().to_string(),
        None => DEFAULT_PATHS
            .iter()
            .find(|p| Path::new(p).exists())
            .map(|p| p.to_string())
            .unwrap_or_else(|| "(defaults)".to_string()),
    };

    ui::print_header("reelscore status");
    ui::print_key_value("Config", &config_file);
    ui::print_key_value("Active dataset", &config.dataset.active);

    ui::print_header("Datasets");
    let opts = NormalizeOptions::from_config(&config.dataset);
    let weights = WeightConfig::from_config(&config.scoring);
    let mode = ScoreMode::from_normalize(config.scoring.normalize);

    let mut sources: Vec<(String, &Path)> = config
        .dataset
        .sources
        .iter()
        .map(|(name, path)| (name.clone(), path.as_path()))
        .collect();
    if let Some(input) = &global.input {
        sources.push(("--input".to_string(), input.as_path()));
    }

    for (name, path) in sources {
        let marker = if name == config.dataset.active {
            Style::new().green().apply_to("●")
        } else {
            Style::new().dim().apply_to("○")
        };

        let detail = match load_records(path) {
            Ok(raws) => {
                let records = normalize_all(&raws, &opts);
                let best = score(&records, &weights, mode)?
                    .iter()
                    .map(|r| r.success_score)
                    .fold(None, |acc: Option<f64>, s| Some(acc.map_or(s, |a| a.max(s))));
                match best {
                    Some(best) => format!(
                        "{} records, best score {}",
                        records.len(),
                        format_score(best, mode.is_normalized())
                    ),
                    None => "0 records".to_string(),
                }
            }
            Err(err) => Style::new().red().apply_to(err.to_string()).to_string(),
        };

        println!(" {} {} ({}): {}", marker, name, path.display(), detail);
    }

    ui::print_header("Scoring");
    ui::print_key_value(
        "Mode",
        if mode.is_normalized() {
            "normalized (0-100)"
        } else {
            "raw (scaled, unbounded)"
        },
    );
    ui::print_key_value("Metrics", &metric_list(&config.scoring.metrics));
    for metric in Metric::ALL {
        let active = config.scoring.metrics.contains(&metric);
        let line = format!(
            "{:>10}  {:.1}{}",
            metric.label(),
            config.scoring.weights.get(metric),
            if active { "" } else { "  (inactive)" }
        );
        if active {
            println!("{}", line);
        } else {
            println!("{}", Style::new().dim().apply_to(line));
        }
    }

    ui::print_header("Trend summary");
    ui::print_key_value(
        "Provider",
        &format!("{:?} · {}", config.llm.provider, config.llm.model),
    );
    let key_var = match config.llm.provider {
        LlmProvider::Gemini => Some("GEMINI_API_KEY"),
        LlmProvider::OpenAi => Some("OPENAI_API_KEY"),
        LlmProvider::Ollama => None,
    };
    if let Some(var) = key_var {
        let present = std::env::var(var).map(|v| !v.is_empty()).unwrap_or(false);
        ui::print_key_value(var, if present { "set" } else { "missing" });
    }

    Ok(())
}
