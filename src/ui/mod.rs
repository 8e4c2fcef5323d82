//! UI rendering for libdesk
//!
//! Everything here is a pure function of `&App`: screens read the state
//! through selectors and never mutate it.
//!
//! ## Responsive Layout
//!
//! Render functions receive a [`LayoutContext`] built from the frame size.
//! Below 60 columns the home sidebar collapses to a one-line section bar;
//! on compact terminals tab labels are shortened.

mod auth;
pub mod components;
mod helpers;
mod home;
pub mod layout;
mod popups;
mod sections;
pub mod theme;
mod toasts;

pub use helpers::{format_price, truncate_string};
pub use layout::{breakpoints, LayoutContext, SizeCategory};

use ratatui::{layout::Alignment, style::Style, widgets::Paragraph, Frame};

use crate::app::App;

/// Smallest terminal the screens are laid out for.
const MIN_WIDTH: u16 = 40;
const MIN_HEIGHT: u16 = 12;

/// Render the current route, the open popup and the toasts.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        frame.render_widget(
            Paragraph::new("Terminal too small")
                .alignment(Alignment::Center)
                .style(Style::default().fg(theme::COLOR_DIM)),
            area,
        );
        return;
    }
    let ctx = LayoutContext::from_rect(area);

    if app.route.is_protected() {
        home::render_home(frame, area, app, &ctx);
        popups::render_popup(frame, area, app, &ctx);
    } else {
        auth::render_auth_screen(frame, area, app, &ctx);
    }

    toasts::render_toasts(frame, area, &app.toasts);
}
