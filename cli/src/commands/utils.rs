use reelscore_config::Metric;
use termimad::{FmtText, MadSkin};

pub fn render_markdown_answer(text: &str) -> String {
    let skin = MadSkin::default();
    let (w, _) = termimad::terminal_size();
    let width = std::cmp::max(20, w.saturating_sub(4) as usize);
    FmtText::from(&skin, text, Some(width)).to_string()
}

/// Thousands separators: 1234567 → "1,234,567".
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_score(score: f64, normalized: bool) -> String {
    if normalized {
        format!("{:.1}/100", score)
    } else {
        format!("{:.1}", score)
    }
}

pub fn metric_list(metrics: &[Metric]) -> String {
    metrics
        .iter()
        .map(|m| m.key())
        .collect::<Vec<_>>()
        .join(", ")
}
