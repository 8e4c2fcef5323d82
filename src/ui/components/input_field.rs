//! Input Field Component
//!
//! A labelled text input with focus handling and password masking.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::Field;
use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG};

/// Rows taken by one field: label plus a bordered input line.
pub const INPUT_FIELD_HEIGHT: u16 = 4;

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    pub label: &'a str,
    pub value: &'a str,
    pub focused: bool,
    /// Show bullets instead of the value
    pub is_password: bool,
    /// Shown dimmed while the value is empty
    pub placeholder: Option<&'a str>,
}

impl<'a> InputFieldConfig<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            is_password: false,
            placeholder: None,
        }
    }

    /// Configuration for a form field.
    pub fn from_field(field: &'a Field, focused: bool) -> Self {
        Self::new(field.label, &field.value)
            .focused(focused)
            .password(field.masked)
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn password(mut self, is_password: bool) -> Self {
        self.is_password = is_password;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Text shown inside the box, without the cursor.
    fn display_value(&self) -> (String, bool) {
        match self.placeholder {
            Some(placeholder) if self.value.is_empty() => (placeholder.to_string(), true),
            _ if self.is_password => ("\u{2022}".repeat(self.value.chars().count()), false),
            _ => (self.value.to_string(), false),
        }
    }
}

/// Render an input field. Returns the rows consumed.
pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) -> u16 {
    if area.height < INPUT_FIELD_HEIGHT {
        return 0;
    }
    let label_style = if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let label_area = Rect {
        x: area.x + 2,
        y: area.y,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(config.label, label_style))),
        label_area,
    );

    let input_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: 3,
    };
    let border_color = if config.focused {
        Color::White
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let (mut content, is_placeholder) = config.display_value();
    let text_style = if is_placeholder || !config.focused {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default().fg(Color::White)
    };
    if config.focused {
        if is_placeholder {
            content.clear();
        }
        content.push('\u{2588}'); // Block cursor
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(content, text_style))).block(block),
        input_area,
    );
    INPUT_FIELD_HEIGHT
}
