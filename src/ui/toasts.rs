//! Toast stack in the bottom-right corner, newest at the bottom.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::feedback::ToastQueue;

use super::helpers::truncate_string;
use super::theme::{toast_style, COLOR_DIALOG_BG};

const TOAST_HEIGHT: u16 = 3;
const TOAST_MAX_WIDTH: u16 = 48;

pub fn render_toasts(frame: &mut Frame, area: Rect, toasts: &ToastQueue) {
    let width = TOAST_MAX_WIDTH.min(area.width.saturating_sub(2));
    if width < 8 {
        return;
    }
    let x = area.right().saturating_sub(width + 1);
    let mut bottom = area.bottom().saturating_sub(1);

    let visible: Vec<_> = toasts.iter().collect();
    for toast in visible.iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        let rect = Rect {
            x,
            y: bottom - TOAST_HEIGHT,
            width,
            height: TOAST_HEIGHT,
        };
        bottom -= TOAST_HEIGHT;

        let (color, glyph) = toast_style(toast.kind);
        let text = truncate_string(&toast.text, width.saturating_sub(6) as usize);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(COLOR_DIALOG_BG));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{glyph} "), Style::default().fg(color)),
                Span::raw(text),
            ]))
            .block(block),
            rect,
        );
    }
}
