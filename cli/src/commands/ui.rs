use console::{pad_str, Alignment, Style};
use reelscore_core::analysis::ScoreBand;

pub fn print_header(title: &str) {
    println!("\n{}", Style::new().bold().cyan().apply_to(title));
    println!(
        "{}",
        Style::new()
            .dim()
            .apply_to("─".repeat(console::measure_text_width(title)))
    );
}

pub fn print_success(msg: &str) {
    println!("{} {}", Style::new().green().bold().apply_to("SUCCESS:"), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", Style::new().red().bold().apply_to("ERROR:"), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", Style::new().yellow().bold().apply_to("WARNING:"), msg);
}

pub fn print_panel(title: &str, content: &str, border_color: Style, content_style: Option<Style>) {
    let width: usize = 80;
    let inner = width - 4;
    let padding = width.saturating_sub(console::measure_text_width(title) + 5);

    println!(
        "{} {} {}",
        border_color.apply_to("┌─"),
        Style::new().bold().apply_to(title),
        border_color.apply_to(format!("{}┐", "─".repeat(padding)))
    );

    let content_style = content_style.unwrap_or_else(Style::new);

    for line in content.lines() {
        let display_line = pad_str(line, inner, Alignment::Left, Some("…"));
        println!(
            "{} {} {}",
            border_color.apply_to("│"),
            content_style.apply_to(display_line),
            border_color.apply_to("│")
        );
    }
    println!("{}", border_color.apply_to(format!("└{}┘", "─".repeat(width - 2))));
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "{}: {}",
        Style::new().dim().apply_to(key),
        Style::new().bold().apply_to(value)
    );
}

/// Style for a success score cell.
pub fn band_style(score: f64, normalized: bool) -> Style {
    if !normalized {
        return Style::new().bold();
    }
    match ScoreBand::of(score) {
        ScoreBand::High => Style::new().green().bold(),
        ScoreBand::Medium => Style::new().yellow().bold(),
        ScoreBand::Low => Style::new().red().bold(),
    }
}

/// Fixed-width cell, truncated with an ellipsis.
pub fn cell(text: &str, width: usize, align: Alignment) -> String {
    pad_str(text, width, align, Some("…")).into_owned()
}

/// Simple column table: header row, dim rule, rows.
pub struct Table {
    columns: Vec<(String, usize, Alignment)>,
}

impl Table {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    pub fn column(mut self, title: &str, width: usize, align: Alignment) -> Self {
        self.columns.push((title.to_string(), width, align));
        self
    }

    pub fn print_header(&self) {
        let header: Vec<String> = self
            .columns
            .iter()
            .map(|(title, width, align)| cell(title, *width, *align))
            .collect();
        println!("{}", Style::new().bold().apply_to(header.join("  ")));
        let rule: usize = self.columns.iter().map(|(_, w, _)| w + 2).sum();
        println!("{}", Style::new().dim().apply_to("─".repeat(rule.saturating_sub(2))));
    }

    /// Print one row. `styles` may be shorter than the column list.
    pub fn print_row(&self, values: &[String], styles: &[Option<Style>]) {
        let cells: Vec<String> = self
            .columns
            .iter()
            .zip(values)
            .enumerate()
            .map(|(i, ((_, width, align), value))| {
                let text = cell(value, *width, *align);
                match styles.get(i).and_then(|s| s.as_ref()) {
                    Some(style) => style.apply_to(text).to_string(),
                    None => text,
                }
            })
            .collect();
        println!("{}", cells.join("  "));
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_pads_and_truncates() {
        assert_eq!(cell("abc", 5, Alignment::Left), "abc  ");
        assert_eq!(cell("abc", 5, Alignment::Right), "  abc");
        assert_eq!(console::measure_text_width(&cell("abcdefgh", 5, Alignment::Left)), 5);
    }
}
