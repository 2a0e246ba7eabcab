use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{BarChart, Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use reelscore_config::WEIGHT_MAX;
use reelscore_core::analysis::ScoreBand;
use reelscore_trends::TrendState;

use crate::app::{App, InputMode, Tab};

const SLIDER_WIDTH: usize = 20;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Tabs
                Constraint::Min(1),    // Body
                Constraint::Length(3), // Input
                Constraint::Length(1), // Status bar
            ]
            .as_ref(),
        )
        .split(f.area());

    let titles: Vec<Line> = Tab::ALL.iter().map(|t| Line::from(t.title())).collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .block(Block::default().borders(Borders::ALL).title(format!(
            "reelscore · {} · {} videos",
            app.source.name,
            app.records.len()
        )))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::Ranking => draw_ranking(f, app, chunks[1]),
        Tab::Analysis => draw_analysis(f, app, chunks[1]),
        Tab::Trends => draw_trends(f, app, chunks[1]),
    }

    let (title, text, style) = match app.input_mode {
        InputMode::Editing(field) => (
            field.title(),
            app.input.clone(),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Normal => ("Filters", filter_summary(app), Style::default()),
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, chunks[2]);

    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_widget(status, chunks[3]);
}

fn filter_summary(app: &App) -> String {
    let mut parts = Vec::new();
    if let Some(search) = &app.filters.search {
        parts.push(format!("text \"{}\"", search));
    }
    if !app.filters.creators.is_empty() {
        let names: Vec<&str> = app.filters.creators.iter().map(String::as_str).collect();
        parts.push(format!("creators {}", names.join(", ")));
    }
    if app.filters.min_score > 0.0 {
        parts.push(format!("score ≥ {}", app.filters.min_score));
    }
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(" · ")
    }
}

fn score_style(app: &App, score: f64) -> Style {
    if !app.normalize {
        return Style::default().add_modifier(Modifier::BOLD);
    }
    let color = match ScoreBand::of(score) {
        ScoreBand::High => Color::Green,
        ScoreBand::Medium => Color::Yellow,
        ScoreBand::Low => Color::Red,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn slider(value: f64) -> String {
    let filled = ((value / WEIGHT_MAX) * SLIDER_WIDTH as f64).round() as usize;
    let filled = filled.min(SLIDER_WIDTH);
    format!("{}{}", "■".repeat(filled), "·".repeat(SLIDER_WIDTH - filled))
}

fn draw_ranking(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(20)].as_ref())
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("Mode: ", Style::default().fg(Color::Cyan)),
        Span::raw(if app.normalize {
            "normalized"
        } else {
            "raw"
        }),
    ]));
    lines.push(Line::from(""));
    for (i, metric) in app.metrics().iter().enumerate() {
        let selected = i == app.selected;
        let marker = if selected { "> " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let weight = app.weights.get(*metric);
        lines.push(Line::from(vec![
            Span::styled(format!("{}{:<10}", marker, metric.label()), style),
            Span::styled(format!("{:.1}", weight), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", slider(weight)),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let sliders = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Weights"));
    f.render_widget(sliders, columns[0]);

    if let Some(err) = &app.score_error {
        let msg = Paragraph::new(err.as_str())
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Ranking"));
        f.render_widget(msg, columns[1]);
        return;
    }

    let metrics = app.metrics();
    let mut header = vec![
        Cell::from("#"),
        Cell::from("Creator"),
        Cell::from("Score"),
    ];
    header.extend(metrics.iter().map(|m| Cell::from(m.label())));
    header.push(Cell::from("Description"));

    let rows: Vec<Row> = app
        .ranked
        .iter()
        .enumerate()
        .skip(app.scroll)
        .map(|(i, r)| {
            let mut cells = vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(format!("@{}", r.record.creator)),
                Cell::from(format!("{:.1}", r.success_score))
                    .style(score_style(app, r.success_score)),
            ];
            cells.extend(
                metrics
                    .iter()
                    .map(|m| Cell::from(format!("{}", r.record.metric(*m)))),
            );
            cells.push(Cell::from(r.record.description.clone()));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![
        Constraint::Length(4),
        Constraint::Length(18),
        Constraint::Length(8),
    ];
    widths.extend(metrics.iter().map(|_| Constraint::Length(10)));
    widths.push(Constraint::Min(20));

    let title = format!("Ranking ({} of {})", app.ranked.len(), app.records.len());
    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, columns[1]);
}

fn draw_analysis(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);
    let top_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)].as_ref())
        .split(rows[0]);

    let top = app.top();
    let labels: Vec<String> = (1..=top.len()).map(|i| i.to_string()).collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&top)
        .map(|(label, r)| (label.as_str(), r.success_score.max(0.0).round() as u64))
        .collect();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Top {} by success score", top.len())),
        )
        .data(data.as_slice())
        .bar_width(3)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    f.render_widget(chart, top_row[0]);

    let corr_lines: Vec<Line> = app
        .correlations()
        .into_iter()
        .map(|(metric, corr)| {
            let (text, color) = match corr {
                Some(c) if c >= 0.0 => (format!("{:+.3}", c), Color::Blue),
                Some(c) => (format!("{:+.3}", c), Color::Red),
                None => ("n/a".to_string(), Color::DarkGray),
            };
            Line::from(vec![
                Span::raw(format!("{:<11}", metric.label())),
                Span::styled(text, Style::default().fg(color)),
            ])
        })
        .collect();
    let corr = Paragraph::new(corr_lines)
        .block(Block::default().borders(Borders::ALL).title("Correlation with score"));
    f.render_widget(corr, top_row[1]);

    let breakdown: Vec<Line> = app
        .breakdown()
        .into_iter()
        .map(|row| {
            let bar = "█".repeat((row.normalized * SLIDER_WIDTH as f64).round() as usize);
            Line::from(vec![
                Span::styled(
                    format!("{:<22}", row.video),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:<10}", row.metric.label())),
                Span::styled(bar, Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!(" {:.2}", row.normalized),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();
    let breakdown = Paragraph::new(breakdown).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Normalized metrics of the top videos"),
    );
    f.render_widget(breakdown, rows[1]);
}

fn draw_trends(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(1)].as_ref())
        .split(area);

    let context = if app.trend_context.trim().is_empty() {
        "(none, press e to add)".to_string()
    } else {
        app.trend_context.clone()
    };
    let info = Paragraph::new(vec![
        Line::from(format!(
            "{} descriptions · model {} · g generate  r regenerate  x reset",
            app.records.len(),
            app.config.llm.model
        )),
        Line::from(vec![
            Span::styled("Context: ", Style::default().fg(Color::Cyan)),
            Span::raw(context),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Trend analysis"));
    f.render_widget(info, rows[0]);

    let body = match app.trends.state() {
        TrendState::Populated(text) => Text::raw(text.as_str()),
        TrendState::Absent => Text::styled(
            "No summary yet. Press g to analyse the descriptions.",
            Style::default().fg(Color::DarkGray),
        ),
        TrendState::Cleared => Text::styled(
            "Summary cleared. Press g to generate a new one.",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let summary = Paragraph::new(body)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Summary"));
    f.render_widget(summary, rows[1]);
}
