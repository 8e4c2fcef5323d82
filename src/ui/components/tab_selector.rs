//! Tab Selector Component
//!
//! A horizontal tab row. The selected tab gets a `▶` marker.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::ui::layout::LayoutContext;
use crate::ui::theme::{COLOR_ACCENT, COLOR_DIM};

/// A single tab in the selector
#[derive(Debug, Clone)]
pub struct TabItem<'a> {
    /// Label on normal-sized terminals
    pub label: &'a str,
    /// Label on compact terminals
    pub short_label: &'a str,
}

impl<'a> TabItem<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            short_label: label,
        }
    }

    pub fn with_short_label(label: &'a str, short_label: &'a str) -> Self {
        Self { label, short_label }
    }
}

/// Render a horizontal tab selector line.
pub fn render_tab_selector(items: &[TabItem<'_>], selected: usize, ctx: &LayoutContext) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];
    let spacing = if ctx.is_extra_small() { "  " } else { "    " };

    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(spacing));
        }
        let label = if ctx.is_compact() {
            item.short_label
        } else {
            item.label
        };

        if idx == selected {
            spans.push(Span::styled(
                "\u{25B6} ",
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                label.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            let dim = Style::default().fg(COLOR_DIM);
            spans.push(Span::styled("  ", dim));
            spans.push(Span::styled(label.to_string(), dim));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_selected_tab_has_marker() {
        let items = [TabItem::new("Borrowed"), TabItem::new("Overdue")];
        let line = render_tab_selector(&items, 1, &LayoutContext::new(120, 40));
        assert_eq!(text(&line), "   Borrowed    \u{25B6} Overdue");
    }

    #[test]
    fn test_compact_uses_short_labels() {
        let items = [
            TabItem::with_short_label("Currently Borrowed", "Current"),
            TabItem::new("Returned"),
        ];
        let line = render_tab_selector(&items, 0, &LayoutContext::new(70, 20));
        assert!(text(&line).contains("Current"));
        assert!(!text(&line).contains("Currently"));
    }
}
