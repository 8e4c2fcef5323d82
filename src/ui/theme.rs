//! Color theme constants for the libdesk UI
//!
//! Minimal dark palette shared by every screen.

use ratatui::style::Color;

use crate::feedback::ToastKind;

// ============================================================================
// Minimal Dark Color Theme
// ============================================================================

/// Primary border color - dark gray for minimal aesthetic
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Accent color - white for highlights and important elements
pub const COLOR_ACCENT: Color = Color::White;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for less important info
pub const COLOR_DIM: Color = Color::DarkGray;

/// Background for input areas
pub const COLOR_INPUT_BG: Color = Color::Rgb(20, 20, 30);

/// Background of the selected table row
pub const COLOR_SELECTED_BG: Color = Color::Rgb(40, 40, 55);

/// Background color for popups
pub const COLOR_DIALOG_BG: Color = Color::Rgb(10, 15, 35);

// ============================================================================
// Status Colors
// ============================================================================

pub const COLOR_SUCCESS: Color = Color::Rgb(4, 181, 117); // green #04B575

pub const COLOR_ERROR: Color = Color::Red;

pub const COLOR_WARNING: Color = Color::Yellow;

pub const COLOR_INFO: Color = Color::Rgb(0, 122, 204); // blue #007ACC

/// Color and glyph of a toast kind.
pub fn toast_style(kind: ToastKind) -> (Color, &'static str) {
    match kind {
        ToastKind::Success => (COLOR_SUCCESS, "\u{2713}"),
        ToastKind::Error => (COLOR_ERROR, "\u{2717}"),
        ToastKind::Warning => (COLOR_WARNING, "!"),
        ToastKind::Info => (COLOR_INFO, "i"),
    }
}
