//! Responsive Layout System
//!
//! `LayoutContext` wraps the terminal dimensions and answers the sizing
//! questions the screens ask: how wide the sidebar is, whether labels
//! should be shortened, how many table rows fit.

use ratatui::layout::Rect;

// ============================================================================
// Screen Size Breakpoints
// ============================================================================

/// Terminal size breakpoints for responsive layouts
pub mod breakpoints {
    /// Extra small terminal (< 60 columns)
    pub const XS_WIDTH: u16 = 60;
    /// Small terminal (< 80 columns)
    pub const SM_WIDTH: u16 = 80;
    /// Medium terminal (< 120 columns)
    pub const MD_WIDTH: u16 = 120;

    /// Extra small terminal height (< 16 rows)
    pub const XS_HEIGHT: u16 = 16;
    /// Small terminal height (< 24 rows)
    pub const SM_HEIGHT: u16 = 24;
}

/// Size category for responsive design decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCategory {
    ExtraSmall,
    Small,
    Medium,
    Large,
}

// ============================================================================
// Layout Context
// ============================================================================

/// Terminal dimensions for responsive calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn from_rect(area: Rect) -> Self {
        Self::new(area.width, area.height)
    }

    /// A width as a percentage of the terminal width, minimum 1.
    pub fn percent_width(&self, percentage: u16) -> u16 {
        ((self.width as u32 * percentage as u32) / 100).max(1) as u16
    }

    /// Proportional width clamped to `min..=max`.
    pub fn bounded_width(&self, percentage: u16, min: u16, max: u16) -> u16 {
        self.percent_width(percentage).clamp(min, max)
    }

    pub fn width_category(&self) -> SizeCategory {
        if self.width < breakpoints::XS_WIDTH {
            SizeCategory::ExtraSmall
        } else if self.width < breakpoints::SM_WIDTH {
            SizeCategory::Small
        } else if self.width < breakpoints::MD_WIDTH {
            SizeCategory::Medium
        } else {
            SizeCategory::Large
        }
    }

    /// Less than 80 columns.
    pub fn is_narrow(&self) -> bool {
        self.width < breakpoints::SM_WIDTH
    }

    /// Less than 24 rows.
    pub fn is_short(&self) -> bool {
        self.height < breakpoints::SM_HEIGHT
    }

    /// Narrow or short; labels should be condensed.
    pub fn is_compact(&self) -> bool {
        self.is_narrow() || self.is_short()
    }

    pub fn is_extra_small(&self) -> bool {
        self.width < breakpoints::XS_WIDTH || self.height < breakpoints::XS_HEIGHT
    }

    /// Below 60 columns the sidebar becomes a one-line section bar.
    pub fn should_collapse_sidebar(&self) -> bool {
        self.width < breakpoints::XS_WIDTH
    }

    /// Width of the home sidebar.
    pub fn sidebar_width(&self) -> u16 {
        if self.should_collapse_sidebar() {
            0
        } else {
            self.bounded_width(22, 20, 28)
        }
    }

    /// Longest title shown in a table cell before truncation.
    pub fn max_title_length(&self) -> usize {
        match self.width_category() {
            SizeCategory::ExtraSmall => 16,
            SizeCategory::Small => 24,
            SizeCategory::Medium => 36,
            SizeCategory::Large => 60,
        }
    }
}

impl Default for LayoutContext {
    /// Standard 80x24 terminal.
    fn default() -> Self {
        Self {
            width: 80,
            height: 24,
        }
    }
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let ctx = LayoutContext::default();
        assert_eq!(ctx.width, 80);
        assert_eq!(ctx.height, 24);
    }

    #[test]
    fn test_percent_width() {
        let ctx = LayoutContext::new(100, 40);
        assert_eq!(ctx.percent_width(50), 50);
        assert_eq!(ctx.percent_width(0), 1); // Minimum of 1
    }

    #[test]
    fn test_bounded_width() {
        let ctx = LayoutContext::new(200, 40);
        assert_eq!(ctx.bounded_width(30, 20, 50), 50);
        let ctx = LayoutContext::new(40, 40);
        assert_eq!(ctx.bounded_width(30, 20, 50), 20);
    }

    #[test]
    fn test_size_states() {
        assert!(LayoutContext::new(79, 30).is_narrow());
        assert!(LayoutContext::new(100, 20).is_short());
        assert!(LayoutContext::new(100, 20).is_compact());
        assert!(!LayoutContext::new(100, 30).is_compact());
        assert!(LayoutContext::new(50, 30).is_extra_small());
        assert_eq!(
            LayoutContext::new(130, 40).width_category(),
            SizeCategory::Large
        );
    }

    #[test]
    fn test_sidebar_width() {
        assert_eq!(LayoutContext::new(50, 30).sidebar_width(), 0);
        assert_eq!(LayoutContext::new(80, 30).sidebar_width(), 20);
        assert_eq!(LayoutContext::new(200, 30).sidebar_width(), 28);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered(area, 40, 10), Rect::new(30, 15, 40, 10));
        assert_eq!(centered(area, 200, 80), area);
    }
}
