//! Signed-in layout: sidebar, section header and footer hints.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Section};
use crate::state::SliceId;

use super::helpers::hint_line;
use super::layout::LayoutContext;
use super::sections;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};

fn section_slices(section: Section) -> &'static [SliceId] {
    match section {
        Section::Dashboard => &[SliceId::Auth, SliceId::User],
        Section::Books => &[SliceId::Book],
        Section::Catalog | Section::MyBorrowedBooks => &[SliceId::Borrow],
        Section::Users => &[SliceId::User],
    }
}

fn section_hints(app: &App, section: Section) -> Line<'static> {
    let admin = app.is_admin();
    match section {
        Section::Books if app.view.searching => {
            hint_line(&[("enter", "done"), ("esc", "clear search")])
        }
        Section::Books if admin => hint_line(&[
            ("enter", "view"),
            ("/", "search"),
            ("a", "add"),
            ("r", "record"),
            ("d", "delete"),
        ]),
        Section::Books => hint_line(&[("enter", "view"), ("/", "search")]),
        Section::Catalog => hint_line(&[("\u{2190}\u{2192}", "tab"), ("enter", "return book")]),
        Section::MyBorrowedBooks => hint_line(&[("\u{2190}\u{2192}", "tab")]),
        Section::Users => hint_line(&[("\u{2190}\u{2192}", "page")]),
        Section::Dashboard => hint_line(&[("tab", "next section")]),
    }
}

pub fn render_home(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let section = app.route.section().unwrap_or_default();
    let content = if ctx.should_collapse_sidebar() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);
        render_section_bar(frame, rows[0], app, section);
        rows[1]
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(ctx.sidebar_width()), Constraint::Min(0)])
            .split(area);
        render_sidebar(frame, cols[0], app, section);
        cols[1]
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(content);

    let loading = section_slices(section)
        .iter()
        .any(|slice| app.store.state().is_loading(*slice));
    let mut header = vec![Span::styled(
        format!(" {}", section.title()),
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )];
    if loading {
        header.push(Span::styled("  loading...", Style::default().fg(COLOR_DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(header)), rows[0]);

    match section {
        Section::Dashboard => sections::render_dashboard(frame, rows[1], app),
        Section::Books => sections::render_books(frame, rows[1], app, ctx),
        Section::Catalog => sections::render_catalog(frame, rows[1], app, ctx),
        Section::Users => sections::render_users(frame, rows[1], app, ctx),
        Section::MyBorrowedBooks => sections::render_my_borrowed(frame, rows[1], app, ctx),
    }

    frame.render_widget(Paragraph::new(section_hints(app, section)), rows[2]);
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App, current: Section) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![
        Line::from(Span::styled(
            " LIBDESK",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];
    if let Some(user) = &app.store.state().auth.user {
        lines.push(Line::from(Span::styled(
            format!(" {}", user.name),
            Style::default().fg(COLOR_ACCENT),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {}", user.role.as_str()),
            Style::default().fg(COLOR_DIM),
        )));
        lines.push(Line::default());
    }

    for (idx, section) in Section::visible_to(app.role()).iter().enumerate() {
        let selected = *section == current;
        let marker = if selected { "\u{25B6}" } else { " " };
        let style = if selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_DIM)
        };
        lines.push(Line::from(Span::styled(
            format!(" {marker} {} {}", idx + 1, section.title()),
            style,
        )));
    }

    lines.push(Line::default());
    if app.is_admin() {
        lines.push(hint_line(&[("n", "add admin")]));
    }
    lines.push(hint_line(&[("s", "settings")]));
    lines.push(hint_line(&[("x", "log out")]));
    lines.push(hint_line(&[("q", "quit")]));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// One-line replacement for the sidebar on very narrow terminals.
fn render_section_bar(frame: &mut Frame, area: Rect, app: &App, current: Section) {
    let spans: Vec<Span> = Section::visible_to(app.role())
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let style = if *section == current {
                Style::default()
                    .fg(COLOR_ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(COLOR_DIM)
            };
            Span::styled(format!(" {}", idx + 1), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
