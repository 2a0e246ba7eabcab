use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use reelscore_config::{Config, Metric, MetricWeights, WEIGHT_MAX};
use reelscore_core::{
    analysis::{correlations, description_listing, metric_breakdown, top_n, BreakdownRow},
    creators,
    dataset::{load_source, resolve_source, DatasetSource},
    normalize_all, rank, score, CanonicalRecord, FilterSpec, NormalizeOptions, ScoreMode,
    ScoredRecord, WeightConfig,
};
use reelscore_trends::{client_from_config, LlmClient, TrendRequest, TrendSession};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

const WEIGHT_STEP: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Ranking,
    Analysis,
    Trends,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Ranking, Tab::Analysis, Tab::Trends];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Ranking => "Ranking",
            Tab::Analysis => "Analysis",
            Tab::Trends => "Trends",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }
}

/// Text field currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Search,
    Creators,
    MinScore,
    TrendContext,
}

impl Field {
    pub fn title(self) -> &'static str {
        match self {
            Field::Search => "Search descriptions",
            Field::Creators => "Creators (comma separated, empty for all)",
            Field::MinScore => "Minimum score (0 disables)",
            Field::TrendContext => "Extra context for the trend analysis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing(Field),
}

/// Work the event loop has to do outside of key handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    GenerateTrends,
    RegenerateTrends,
}

pub struct App {
    pub config: Config,
    input_path: Option<PathBuf>,
    pub source: DatasetSource,
    pub records: Vec<CanonicalRecord>,
    pub scored: Vec<ScoredRecord>,
    pub ranked: Vec<ScoredRecord>,
    pub weights: MetricWeights,
    pub normalize: bool,
    pub selected: usize,
    pub filters: FilterSpec,
    pub tab: Tab,
    pub input_mode: InputMode,
    pub input: String,
    pub trend_context: String,
    pub trends: TrendSession,
    pub score_error: Option<String>,
    pub status_message: String,
    pub scroll: usize,
}

impl App {
    pub fn new(config: Config, input_path: Option<PathBuf>) -> Result<App> {
        let source = resolve_source(&config.dataset, None, input_path.as_deref())?;
        let mut app = App {
            weights: config.scoring.weights,
            normalize: config.scoring.normalize,
            config,
            input_path,
            source,
            records: Vec::new(),
            scored: Vec::new(),
            ranked: Vec::new(),
            selected: 0,
            filters: FilterSpec::default(),
            tab: Tab::Ranking,
            input_mode: InputMode::Normal,
            input: String::new(),
            trend_context: String::new(),
            trends: TrendSession::new(),
            score_error: None,
            status_message: String::new(),
            scroll: 0,
        };
        app.load_current()?;
        app.status_message = app.help_text().to_string();
        Ok(app)
    }

    pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    pub fn help_text(&self) -> &'static str {
        match self.input_mode {
            InputMode::Normal => {
                "↑/↓ metric  ←/→ weight  n mode  / search  c creators  m min score  d dataset  g/r/x trends  e context  Tab view  q quit"
            }
            InputMode::Editing(_) => "Enter to apply, Esc to cancel",
        }
    }

    /// Metrics that take part in scoring, in slider order.
    pub fn metrics(&self) -> &[Metric] {
        &self.config.scoring.metrics
    }

    pub fn mode(&self) -> ScoreMode {
        ScoreMode::from_normalize(self.normalize)
    }

    pub fn weight_config(&self) -> WeightConfig {
        WeightConfig::new(self.metrics().iter().map(|m| (*m, self.weights.get(*m))))
    }

    fn load_current(&mut self) -> Result<()> {
        let raws = load_source(&self.source)?;
        self.records = normalize_all(&raws, &NormalizeOptions::from_config(&self.config.dataset));
        self.scroll = 0;
        self.recompute();
        Ok(())
    }

    /// Full rescore and re-rank; runs after every change.
    pub fn recompute(&mut self) {
        match score(&self.records, &self.weight_config(), self.mode()) {
            Ok(scored) => {
                self.scored = scored;
                self.score_error = None;
            }
            Err(err) => {
                self.scored.clear();
                self.score_error = Some(err.to_string());
            }
        }
        self.ranked = rank(&self.scored, &self.filters);
        self.scroll = self.scroll.min(self.ranked.len().saturating_sub(1));
        debug!(
            records = self.records.len(),
            shown = self.ranked.len(),
            "dashboard recomputed"
        );
    }

    pub fn selected_metric(&self) -> Option<Metric> {
        self.metrics().get(self.selected).copied()
    }

    fn adjust_weight(&mut self, delta: f64) {
        let Some(metric) = self.selected_metric() else {
            return;
        };
        let current = self.weights.get(metric);
        let next = ((current + delta) * 10.0).round() / 10.0;
        // Config may set a weight below the slider minimum.
        let next = next.clamp(current.min(metric.min_weight()), WEIGHT_MAX);
        if (next - current).abs() > f64::EPSILON {
            self.weights.set(metric, next);
            self.recompute();
        }
    }

    fn cycle_dataset(&mut self) {
        if self.input_path.is_some() {
            self.status_message = "Dataset given with --input; nothing to switch".to_string();
            return;
        }
        let Some(next) = self
            .config
            .dataset
            .next_source(&self.source.name)
            .map(str::to_string)
        else {
            return;
        };

        match resolve_source(&self.config.dataset, Some(&next), None) {
            Ok(source) => {
                let previous = std::mem::replace(&mut self.source, source);
                match self.load_current() {
                    Ok(()) => {
                        self.trends = TrendSession::new();
                        self.status_message = format!(
                            "Loaded {} ({} videos)",
                            self.source.name,
                            self.records.len()
                        );
                    }
                    Err(err) => {
                        self.status_message = format!("{:#}", err);
                        self.source = previous;
                    }
                }
            }
            Err(err) => self.status_message = err.to_string(),
        }
    }

    pub fn creator_options(&self) -> Vec<String> {
        creators(&self.scored)
    }

    fn start_editing(&mut self, field: Field) {
        self.input = match field {
            Field::Search => self.filters.search.clone().unwrap_or_default(),
            Field::Creators => self
                .filters
                .creators
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            Field::MinScore => format!("{}", self.filters.min_score),
            Field::TrendContext => self.trend_context.clone(),
        };
        self.input_mode = InputMode::Editing(field);
        self.status_message = self.help_text().to_string();
    }

    fn commit_input(&mut self, field: Field) {
        let value = std::mem::take(&mut self.input);
        match field {
            Field::Search => {
                self.filters = std::mem::take(&mut self.filters).with_search(value);
            }
            Field::Creators => {
                let names: Vec<String> = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(|s| s.trim_start_matches('@').to_string())
                    .collect();
                self.filters = std::mem::take(&mut self.filters).with_creators(names);
            }
            Field::MinScore => {
                let trimmed = value.trim();
                let parsed = if trimmed.is_empty() {
                    Ok(0.0)
                } else {
                    trimmed.parse::<f64>()
                };
                match parsed {
                    Ok(v) if v.is_finite() => {
                        self.filters =
                            std::mem::take(&mut self.filters).with_min_score(v.max(0.0));
                    }
                    _ => {
                        self.status_message = format!("'{}' is not a number", trimmed);
                        self.input_mode = InputMode::Normal;
                        return;
                    }
                }
            }
            Field::TrendContext => {
                self.trend_context = value;
                self.input_mode = InputMode::Normal;
                self.status_message = "Trend context updated".to_string();
                return;
            }
        }
        self.input_mode = InputMode::Normal;
        self.recompute();
        self.status_message = format!("{} of {} videos shown", self.ranked.len(), self.records.len());
    }

    pub fn on_key(&mut self, code: KeyCode) -> Option<Action> {
        if let InputMode::Editing(field) = self.input_mode {
            match code {
                KeyCode::Enter => self.commit_input(field),
                KeyCode::Esc => {
                    self.input.clear();
                    self.input_mode = InputMode::Normal;
                    self.status_message = self.help_text().to_string();
                }
                KeyCode::Backspace => {
                    self.input.pop();
                }
                KeyCode::Char(c) => self.input.push(c),
                _ => {}
            }
            return None;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Char('1') => self.tab = Tab::Ranking,
            KeyCode::Char('2') => self.tab = Tab::Analysis,
            KeyCode::Char('3') => self.tab = Tab::Trends,
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.metrics().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust_weight(-WEIGHT_STEP),
            KeyCode::Right => self.adjust_weight(WEIGHT_STEP),
            KeyCode::Char('j') | KeyCode::PageDown => {
                if self.scroll + 1 < self.ranked.len() {
                    self.scroll += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char('n') => {
                self.normalize = !self.normalize;
                self.recompute();
                self.status_message = if self.normalize {
                    "Normalized scores (0-100)".to_string()
                } else {
                    "Raw scaled scores".to_string()
                };
            }
            KeyCode::Char('/') => self.start_editing(Field::Search),
            KeyCode::Char('c') => self.start_editing(Field::Creators),
            KeyCode::Char('m') => self.start_editing(Field::MinScore),
            KeyCode::Char('e') => self.start_editing(Field::TrendContext),
            KeyCode::Char('d') => self.cycle_dataset(),
            KeyCode::Char('g') => {
                self.tab = Tab::Trends;
                return Some(Action::GenerateTrends);
            }
            KeyCode::Char('r') => {
                self.tab = Tab::Trends;
                return Some(Action::RegenerateTrends);
            }
            KeyCode::Char('x') => {
                self.trends.reset();
                self.status_message = "Trend summary cleared".to_string();
            }
            _ => {}
        }
        None
    }

    pub fn trend_request(&self) -> TrendRequest {
        let listing = description_listing(self.records.iter().map(|r| r.description.as_str()));
        let context = Some(self.trend_context.clone());
        TrendRequest::new(listing, &self.config.llm).with_context(context)
    }

    /// Run a trend request with the configured backend. Failures end up in
    /// the status line and never touch the scores.
    pub fn run_trends(&mut self, action: Action) {
        match client_from_config(&self.config.llm) {
            Ok(client) => self.run_trends_with(client.as_ref(), action),
            Err(err) => self.status_message = format!("Trend summary unavailable: {}", err),
        }
    }

    pub fn run_trends_with(&mut self, client: &dyn LlmClient, action: Action) {
        let request = self.trend_request();
        let result = match action {
            Action::RegenerateTrends => self.trends.regenerate(client, &request),
            _ => self.trends.generate(client, &request),
        };
        self.status_message = match result {
            Ok(_) => "Trend analysis complete".to_string(),
            Err(err) => format!("Trend summary failed: {}", err),
        };
    }

    pub fn top(&self) -> Vec<ScoredRecord> {
        top_n(&self.scored, self.config.analysis.top_n)
    }

    pub fn breakdown(&self) -> Vec<BreakdownRow> {
        metric_breakdown(
            &self.top(),
            &self.weight_config(),
            self.config.analysis.breakdown_n,
        )
    }

    pub fn correlations(&self) -> Vec<(Metric, Option<f64>)> {
        correlations(&self.scored, self.metrics())
    }
}
