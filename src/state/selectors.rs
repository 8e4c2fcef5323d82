//! Derived views over [`AppState`].
//!
//! Pure functions so that views and tests read state the same way.

use chrono::{DateTime, Utc};

use super::AppState;
use crate::api::{Book, BorrowRecord, UserBorrowedBook, UserItem};

/// Rows per page in the users table.
pub const USERS_PER_PAGE: usize = 10;

/// Figures shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_books: usize,
    pub borrowed_all_users: usize,
    pub my_active_borrowings: usize,
}

pub fn dashboard_stats(state: &AppState) -> DashboardStats {
    DashboardStats {
        total_users: state.user.users.len(),
        total_books: state.book.books.len(),
        borrowed_all_users: state.borrow.all_borrowed_books.len(),
        my_active_borrowings: state
            .borrow
            .user_borrowed_books
            .iter()
            .filter(|b| !b.returned)
            .count(),
    }
}

/// Books whose title contains `query`, ignoring case. An empty query
/// matches everything.
pub fn books_matching<'a>(state: &'a AppState, query: &str) -> Vec<&'a Book> {
    let needle = query.trim().to_lowercase();
    state
        .book
        .books
        .iter()
        .filter(|b| needle.is_empty() || b.title.to_lowercase().contains(&needle))
        .collect()
}

/// Records not yet returned.
pub fn outstanding_borrows(state: &AppState) -> Vec<&BorrowRecord> {
    state
        .borrow
        .all_borrowed_books
        .iter()
        .filter(|r| !r.is_returned())
        .collect()
}

/// Records not yet returned whose due date has passed.
pub fn overdue_borrows(state: &AppState, now: DateTime<Utc>) -> Vec<&BorrowRecord> {
    state
        .borrow
        .all_borrowed_books
        .iter()
        .filter(|r| r.is_overdue(now))
        .collect()
}

/// The signed-in user's borrowings, split by whether they were returned.
pub fn my_borrowings(state: &AppState, returned: bool) -> Vec<&UserBorrowedBook> {
    state
        .borrow
        .user_borrowed_books
        .iter()
        .filter(|b| b.returned == returned)
        .collect()
}

/// Number of user pages; at least one so that an empty table still has a page.
pub fn user_page_count(state: &AppState) -> usize {
    state.user.users.len().div_ceil(USERS_PER_PAGE).max(1)
}

/// Users on the zero-based `page`.
pub fn users_page(state: &AppState, page: usize) -> &[UserItem] {
    let users = &state.user.users;
    let start = (page * USERS_PER_PAGE).min(users.len());
    let end = (start + USERS_PER_PAGE).min(users.len());
    &users[start..end]
}
