//! Application state: one typed slice per domain.
//!
//! Slices are only written through their reducers (see
//! [`crate::store::Store::apply`]); everything else reads them by reference.

pub mod auth;
pub mod book;
pub mod borrow;
pub mod popup;
pub mod selectors;
pub mod status;
pub mod user;

pub use auth::{AuthOp, AuthPayload, AuthState};
pub use book::{BookOp, BookPayload, BookState};
pub use borrow::{BorrowOp, BorrowPayload, BorrowState};
pub use popup::{PopupAction, PopupKind, PopupState};
pub use status::{
    AsyncSlice, Feedback, FeedbackKind, Lifecycle, SlicePayload, StalePolicy, Status,
};
pub use user::{UserOp, UserPayload, UserState};

/// The whole client-side state tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub auth: AuthState,
    pub book: BookState,
    pub borrow: BorrowState,
    pub user: UserState,
    pub popup: PopupState,
}

/// Identifies one of the async slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceId {
    Auth,
    Book,
    Borrow,
    User,
}

impl AppState {
    /// Whether the slice has a request in flight.
    pub fn is_loading(&self, slice: SliceId) -> bool {
        match slice {
            SliceId::Auth => self.auth.status.loading,
            SliceId::Book => self.book.status.loading,
            SliceId::Borrow => self.borrow.status.loading,
            SliceId::User => self.user.status.loading,
        }
    }
}
