//! Helper functions for UI rendering
//!
//! Truncation, number formatting and keybind hint lines.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::theme::{COLOR_ACCENT, COLOR_DIM};

/// Truncate a string to at most `max_width` terminal columns, ending with
/// "..." when cut. Wide characters count as two columns.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let target = max_width.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > target {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

/// A hint line such as `enter open  / search  q quit`.
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (idx, (key, action)) in hints.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(key.to_string(), Style::default().fg(COLOR_ACCENT)));
        spans.push(Span::styled(format!(" {action}"), Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("Dune", 10), "Dune");
        assert_eq!(truncate_string("The Left Hand of Darkness", 10), "The Lef...");
    }

    #[test]
    fn test_truncate_counts_columns() {
        assert_eq!(truncate_string("ééééééé", 6), "ééé...");
        // Each CJK character is two columns wide
        assert_eq!(truncate_string("三体三体三体", 7), "三体...");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(12.5), "$12.50");
    }

    #[test]
    fn test_hint_line_text() {
        let line = hint_line(&[("q", "quit"), ("/", "search")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " q quit  / search");
    }
}
