mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{
    context::load_config, handle_descriptions, handle_rank, handle_status, handle_top,
    handle_trends, rank::RankOptions, ui, Cli, Commands,
};
use reelscore_config::{ConfigError, ErrorFormatter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let global = cli.global;

    match cli.command {
        Commands::Rank {
            scoring,
            search,
            creators,
            min_score,
            limit,
            json,
        } => handle_rank(
            &global,
            &scoring,
            RankOptions {
                search,
                creators,
                min_score,
                limit,
                json,
            },
        ),
        Commands::Top { scoring, top } => handle_top(&global, &scoring, top),
        Commands::Descriptions => handle_descriptions(&global),
        Commands::Trends { context, output } => handle_trends(&global, context, output),
        Commands::Status => handle_status(&global),
        Commands::Tui => {
            let config = load_config(&global, None)?;
            tui::run_tui(config, global.input)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The dashboard owns the terminal; log lines would tear the screen.
    if !matches!(cli.command, Commands::Tui) {
        init_tracing();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast::<ConfigError>() {
                Ok(config_err) => eprintln!("{}", ErrorFormatter::new(config_err)),
                Err(err) => ui::print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}
