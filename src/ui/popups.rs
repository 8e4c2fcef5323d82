//! Modal popups. Only the topmost open popup is drawn.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::api::Book;
use crate::app::App;
use crate::state::{PopupKind, SliceId};

use super::components::{
    render_dialog_frame, render_input_field, DialogFrameConfig, InputFieldConfig,
    INPUT_FIELD_HEIGHT,
};
use super::helpers::{format_price, hint_line};
use super::layout::LayoutContext;
use super::theme::{COLOR_ACCENT, COLOR_DIM};

fn slice_of(kind: PopupKind) -> Option<SliceId> {
    match kind {
        PopupKind::Settings => Some(SliceId::Auth),
        PopupKind::AddBook => Some(SliceId::Book),
        PopupKind::Record | PopupKind::ReturnBook => Some(SliceId::Borrow),
        PopupKind::AddNewAdmin => Some(SliceId::User),
        PopupKind::ReadBook => None,
    }
}

pub fn render_popup(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let Some(kind) = app.store.state().popup.topmost() else {
        return;
    };
    match kind {
        PopupKind::ReadBook => render_read_book(frame, area, app, ctx),
        PopupKind::ReturnBook => render_return_book(frame, area, app, ctx),
        _ => render_form_popup(frame, area, app, ctx, kind),
    }
}

fn selected_book<'a>(app: &'a App) -> Option<&'a Book> {
    let id = app.view.book_id.as_deref()?;
    app.store.state().book.find(id)
}

fn render_form_popup(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    ctx: &LayoutContext,
    kind: PopupKind,
) {
    let fields = app.popup_form.fields();
    let context = match kind {
        PopupKind::Record => selected_book(app).map(|b| format!(" Book: {}", b.title)),
        _ => None,
    };
    let context_rows = u16::from(context.is_some());
    let content_height = context_rows + fields.len() as u16 * INPUT_FIELD_HEIGHT + 2;
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new(kind.title(), content_height),
    );

    let mut y = inner.y;
    if let Some(context) = context {
        frame.render_widget(
            Paragraph::new(context).style(Style::default().fg(COLOR_DIM)),
            Rect { y, height: 1, ..inner },
        );
        y += 1;
    }
    for (idx, field) in fields.iter().enumerate() {
        let field_area = Rect {
            y,
            height: inner.bottom().saturating_sub(y).min(INPUT_FIELD_HEIGHT),
            ..inner
        };
        let config = InputFieldConfig::from_field(field, idx == app.popup_form.focus());
        let config = if field.label == "Avatar Path" {
            config.placeholder("path/to/avatar.png")
        } else {
            config
        };
        y += render_input_field(frame, field_area, &config);
    }

    let loading = slice_of(kind).is_some_and(|slice| app.store.state().is_loading(slice));
    if loading && y < inner.bottom() {
        frame.render_widget(
            Paragraph::new(" Please wait...").style(
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::ITALIC),
            ),
            Rect { y, height: 1, ..inner },
        );
    }
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(hint_line(&[("enter", "submit"), ("tab", "next"), ("esc", "close")])),
            Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            },
        );
    }
}

fn detail(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {label}: "), Style::default().fg(COLOR_DIM)),
        Span::styled(value, Style::default().fg(COLOR_ACCENT)),
    ])
}

fn render_read_book(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let lines = match selected_book(app) {
        Some(book) => vec![
            detail("Title", book.title.clone()),
            detail("Author", book.author.clone()),
            detail("Price", format_price(book.price)),
            detail("Quantity", book.quantity.to_string()),
            Line::default(),
            Line::from(Span::raw(format!(" {}", book.description))),
        ],
        None => vec![Line::from(Span::styled(
            " Book not found",
            Style::default().fg(COLOR_DIM),
        ))],
    };
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new(PopupKind::ReadBook.title(), 10),
    );
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }),
        Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        },
    );
    if inner.height > 0 {
        frame.render_widget(
            Paragraph::new(hint_line(&[("esc", "close")])),
            Rect {
                y: inner.bottom() - 1,
                height: 1,
                ..inner
            },
        );
    }
}

fn render_return_book(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let email = app
        .view
        .return_target
        .as_ref()
        .map(|t| t.email.clone())
        .unwrap_or_default();
    let inner = render_dialog_frame(
        frame,
        area,
        ctx,
        &DialogFrameConfig::new(PopupKind::ReturnBook.title(), 4),
    );
    let mut lines = vec![
        detail("User", email),
        Line::default(),
    ];
    if app.store.state().is_loading(SliceId::Borrow) {
        lines.push(Line::from(Span::styled(
            " Please wait...",
            Style::default().fg(COLOR_ACCENT),
        )));
    } else {
        lines.push(Line::default());
    }
    lines.push(hint_line(&[("enter", "confirm return"), ("esc", "cancel")]));
    frame.render_widget(Paragraph::new(lines), inner);
}
