pub mod context;
pub mod descriptions;
pub mod rank;
pub mod status;
pub mod top;
pub mod trends;
pub mod ui;
pub mod utils;

pub use descriptions::handle_descriptions;
pub use rank::handle_rank;
pub use status::handle_status;
pub use top::handle_top;
pub use trends::handle_trends;

use clap::{Args, Parser, Subcommand};
use reelscore_config::Metric;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelscore")]
#[command(about = "Weighted success scores and trend summaries for short-form video datasets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to .reelscore.{toml,yml,yaml,json})
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Named dataset from the config
    #[arg(short, long, value_name = "NAME", global = true)]
    pub dataset: Option<String>,

    /// Explicit record file, bypasses the configured datasets
    #[arg(short, long, value_name = "FILE", global = true)]
    pub input: Option<PathBuf>,
}

/// Scoring overrides applied on top of the loaded config.
#[derive(Args, Debug, Clone, Default)]
pub struct ScoringArgs {
    /// Weight for likes
    #[arg(long, value_name = "W")]
    pub likes: Option<f64>,

    /// Weight for shares
    #[arg(long, value_name = "W")]
    pub shares: Option<f64>,

    /// Weight for bookmarks
    #[arg(long, value_name = "W")]
    pub bookmarks: Option<f64>,

    /// Weight for comments
    #[arg(long, value_name = "W")]
    pub comments: Option<f64>,

    /// Weight for views
    #[arg(long, value_name = "W")]
    pub views: Option<f64>,

    /// Use raw scaled values instead of column normalization
    #[arg(long)]
    pub raw: bool,

    /// Active metrics, comma separated (e.g. likes,shares,bookmarks,comments)
    #[arg(long, value_delimiter = ',', value_name = "LIST")]
    pub metrics: Option<Vec<Metric>>,
}

impl ScoringArgs {
    pub fn weight_overrides(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        [
            (Metric::Likes, self.likes),
            (Metric::Shares, self.shares),
            (Metric::Bookmarks, self.bookmarks),
            (Metric::Comments, self.comments),
            (Metric::Views, self.views),
        ]
        .into_iter()
        .filter_map(|(m, w)| w.map(|w| (m, w)))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank videos by success score
    Rank {
        #[command(flatten)]
        scoring: ScoringArgs,

        /// Case-insensitive text to look for in descriptions
        #[arg(short, long)]
        search: Option<String>,

        /// Only keep these creators (repeatable)
        #[arg(long = "creator", value_name = "NAME")]
        creators: Vec<String>,

        /// Minimum success score (0 disables)
        #[arg(long, default_value_t = 0.0)]
        min_score: f64,

        /// Show at most this many rows
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Top videos, per-metric breakdown and correlations
    Top {
        #[command(flatten)]
        scoring: ScoringArgs,

        /// Number of top videos (defaults to analysis.top_n)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },
    /// Numbered list of all video descriptions
    Descriptions,
    /// Generate an AI trend summary from the descriptions
    Trends {
        /// Extra information the analysis should take into account
        #[arg(long)]
        context: Option<String>,

        /// Also write the summary to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Show datasets, record counts and effective weights
    Status,
    /// Interactive dashboard
    Tui,
}
