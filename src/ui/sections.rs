//! Content of each home section.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::api::display_date;
use crate::app::{App, Tab};
use crate::state::selectors::{
    books_matching, dashboard_stats, my_borrowings, user_page_count, users_page,
};

use super::components::{render_tab_selector, TabItem};
use super::helpers::{format_price, truncate_string};
use super::layout::LayoutContext;
use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER, COLOR_SELECTED_BG,
    COLOR_SUCCESS,
};

fn header_row(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|t| Cell::from(*t))).style(
        Style::default()
            .fg(COLOR_HEADER)
            .add_modifier(Modifier::BOLD),
    )
}

fn render_table(
    frame: &mut Frame,
    area: Rect,
    header: Row<'static>,
    rows: Vec<Row<'static>>,
    widths: &[Constraint],
    selected: usize,
    empty: &str,
) {
    if rows.is_empty() {
        frame.render_widget(
            Paragraph::new(format!(" {empty}")).style(Style::default().fg(COLOR_DIM)),
            area,
        );
        return;
    }
    let selected = selected.min(rows.len() - 1);
    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(COLOR_BORDER)),
        )
        .row_highlight_style(Style::default().bg(COLOR_SELECTED_BG))
        .highlight_symbol("\u{25B6} ");
    let mut state = TableState::default().with_selected(Some(selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn stat_card(frame: &mut Frame, area: Rect, label: &str, value: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    let lines = vec![
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(label.to_string(), Style::default().fg(COLOR_DIM))),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.store.state();
    let stats = dashboard_stats(state);
    let cards: Vec<(&str, usize)> = if app.is_admin() {
        vec![
            ("Total Users", stats.total_users),
            ("Total Books", stats.total_books),
            ("Borrowed (all users)", stats.borrowed_all_users),
            ("My Active Borrowings", stats.my_active_borrowings),
        ]
    } else {
        vec![
            ("Total Books", stats.total_books),
            ("My Active Borrowings", stats.my_active_borrowings),
            ("Returned", my_borrowings(state, true).len()),
        ]
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(4), Constraint::Min(0)])
        .split(area);

    let greeting = state
        .auth
        .user
        .as_ref()
        .map(|u| format!(" Welcome back, {}", u.name))
        .unwrap_or_default();
    frame.render_widget(
        Paragraph::new(greeting).style(Style::default().fg(COLOR_DIM)),
        rows[0],
    );

    let count = cards.len() as u32;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); cards.len()])
        .split(rows[1]);
    for ((label, value), col) in cards.into_iter().zip(cols.iter()) {
        stat_card(frame, *col, label, value);
    }
}

pub fn render_books(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let search_style = if app.view.searching {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let cursor = if app.view.searching { "\u{2588}" } else { "" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" Search: ", Style::default().fg(COLOR_DIM)),
            Span::styled(format!("{}{cursor}", app.view.search), search_style),
        ])),
        rows[0],
    );

    let max = ctx.max_title_length();
    let books = books_matching(app.store.state(), &app.view.search);
    let table_rows = books
        .iter()
        .map(|book| {
            let availability = if book.availability {
                Span::styled("Available", Style::default().fg(COLOR_SUCCESS))
            } else {
                Span::styled("Unavailable", Style::default().fg(COLOR_ERROR))
            };
            Row::new(vec![
                Cell::from(truncate_string(&book.title, max)),
                Cell::from(truncate_string(&book.author, max)),
                Cell::from(format_price(book.price)),
                Cell::from(book.quantity.to_string()),
                Cell::from(availability),
            ])
        })
        .collect();
    render_table(
        frame,
        rows[1],
        header_row(&["Title", "Author", "Price", "Qty", "Status"]),
        table_rows,
        &[
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Length(12),
        ],
        app.view.selected,
        "No books found",
    );
}

pub fn render_catalog(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let tabs = [
        TabItem::with_short_label("Borrowed Books", "Borrowed"),
        TabItem::with_short_label("Overdue Borrowers", "Overdue"),
    ];
    frame.render_widget(
        Paragraph::new(render_tab_selector(&tabs, app.view.tab.index(), ctx)),
        rows[0],
    );

    let now = chrono::Utc::now();
    let records = app.catalog_rows();
    let table_rows = records
        .iter()
        .map(|record| {
            let due_style = if record.is_overdue(now) {
                Style::default().fg(COLOR_ERROR)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(record.user.name.clone()),
                Cell::from(record.user.email.clone()),
                Cell::from(format_price(record.price)),
                Cell::from(Span::styled(display_date(&record.due_date), due_style)),
                Cell::from(display_date(&record.borrow_date)),
            ])
        })
        .collect();
    let empty = match app.view.tab {
        Tab::First => "No borrowed books",
        Tab::Second => "No overdue borrowers",
    };
    render_table(
        frame,
        rows[1],
        header_row(&["User", "Email", "Price", "Due Date", "Borrowed On"]),
        table_rows,
        &[
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
        app.view.selected,
        empty,
    );
}

pub fn render_users(frame: &mut Frame, area: Rect, app: &App, _ctx: &LayoutContext) {
    let state = app.store.state();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let table_rows = users_page(state, app.view.page)
        .iter()
        .map(|user| {
            Row::new(vec![
                Cell::from(user.name.clone()),
                Cell::from(user.email.clone()),
                Cell::from(user.role.as_str()),
                Cell::from(user.borrowed_books.len().to_string()),
                Cell::from(display_date(&user.created_at)),
            ])
        })
        .collect();
    render_table(
        frame,
        rows[0],
        header_row(&["Name", "Email", "Role", "Books", "Registered On"]),
        table_rows,
        &[
            Constraint::Percentage(25),
            Constraint::Percentage(35),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(14),
        ],
        app.view.selected,
        "No users found",
    );

    frame.render_widget(
        Paragraph::new(format!(
            " Page {} of {}",
            app.view.page + 1,
            user_page_count(state)
        ))
        .style(Style::default().fg(COLOR_DIM)),
        rows[1],
    );
}

pub fn render_my_borrowed(frame: &mut Frame, area: Rect, app: &App, ctx: &LayoutContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    let tabs = [
        TabItem::with_short_label("Currently Borrowed", "Current"),
        TabItem::new("Returned"),
    ];
    frame.render_widget(
        Paragraph::new(render_tab_selector(&tabs, app.view.tab.index(), ctx)),
        rows[0],
    );

    let returned = app.view.tab == Tab::Second;
    let max = ctx.max_title_length();
    let table_rows = my_borrowings(app.store.state(), returned)
        .iter()
        .map(|book| {
            let status = if book.returned {
                Span::styled("Returned", Style::default().fg(COLOR_SUCCESS))
            } else {
                Span::styled("Borrowed", Style::default().fg(COLOR_ACCENT))
            };
            Row::new(vec![
                Cell::from(truncate_string(&book.book_title, max)),
                Cell::from(display_date(&book.borrowed_date)),
                Cell::from(display_date(&book.due_date)),
                Cell::from(status),
            ])
        })
        .collect();
    let empty = if returned {
        "No returned books"
    } else {
        "No books borrowed"
    };
    render_table(
        frame,
        rows[1],
        header_row(&["Title", "Borrowed On", "Due Date", "Status"]),
        table_rows,
        &[
            Constraint::Percentage(40),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
        app.view.selected,
        empty,
    );
}
