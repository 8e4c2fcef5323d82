//! Sign-in, sign-up, OTP and password screens.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, Route};
use crate::state::SliceId;

use super::components::{
    render_dialog_frame, render_input_field, DialogFrameConfig, InputFieldConfig,
    INPUT_FIELD_HEIGHT,
};
use super::helpers::hint_line;
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM};

fn subtitle(route: &Route) -> String {
    match route {
        Route::Login => "Welcome back! Please sign in to continue".to_string(),
        Route::Register => "Create your library account".to_string(),
        Route::OtpVerification { email } => format!("Enter the code sent to {email}"),
        Route::ForgotPassword => "We will email you a reset link".to_string(),
        Route::ResetPassword { .. } => "Choose a new password".to_string(),
        Route::Home { .. } => String::new(),
    }
}

fn hints(route: &Route) -> Line<'static> {
    match route {
        Route::Login => hint_line(&[
            ("enter", "sign in"),
            ("^r", "sign up"),
            ("^f", "forgot password"),
            ("esc", "quit"),
        ]),
        _ => hint_line(&[("enter", "submit"), ("tab", "next"), ("esc", "back")]),
    }
}

pub fn render_auth_screen(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let fields = app.form.fields();
    // subtitle, blank, fields, status, hints
    let content_height = 2 + fields.len() as u16 * INPUT_FIELD_HEIGHT + 2;
    let title = app.route.title();
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new(title, content_height).min_width(44),
    );

    let mut y = inner.y;
    frame.render_widget(
        Paragraph::new(subtitle(&app.route))
            .alignment(Alignment::Center)
            .style(Style::default().fg(COLOR_DIM)),
        Rect { y, height: 1, ..inner },
    );
    y += 2;

    for (idx, field) in fields.iter().enumerate() {
        let remaining = inner.bottom().saturating_sub(y);
        let field_area = Rect {
            y,
            height: remaining.min(INPUT_FIELD_HEIGHT),
            ..inner
        };
        let config = InputFieldConfig::from_field(field, idx == app.form.focus());
        y += render_input_field(frame, field_area, &config);
    }

    if app.store.state().is_loading(SliceId::Auth) && y < inner.bottom() {
        frame.render_widget(
            Paragraph::new("Please wait...")
                .alignment(Alignment::Center)
                .style(
                    Style::default()
                        .fg(COLOR_ACCENT)
                        .add_modifier(Modifier::ITALIC),
                ),
            Rect { y, height: 1, ..inner },
        );
    }

    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(hints(&app.route)),
            Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            },
        );
    }
}
