//! Actions and the reducer that applies them to [`AppState`].

use crate::state::*;

/// Everything that can change [`AppState`].
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Auth(Lifecycle<AuthOp, AuthPayload>),
    Book(Lifecycle<BookOp, BookPayload>),
    Borrow(Lifecycle<BorrowOp, BorrowPayload>),
    User(Lifecycle<UserOp, UserPayload>),
    /// Clear loading and feedback of one slice, keeping its data.
    Reset(SliceId),
    /// Return the auth slice to its initial state.
    ClearSession,
    Popup(PopupAction),
}

/// Apply one action. Returns whether the state changed.
pub fn reduce(state: &mut AppState, action: Action, policy: StalePolicy) -> bool {
    match action {
        Action::Auth(event) => state.auth.settle(event, policy),
        Action::Book(event) => state.book.settle(event, policy),
        Action::Borrow(event) => state.borrow.settle(event, policy),
        Action::User(event) => state.user.settle(event, policy),
        Action::Reset(SliceId::Auth) => state.auth.reset(),
        Action::Reset(SliceId::Book) => state.book.reset(),
        Action::Reset(SliceId::Borrow) => state.borrow.reset(),
        Action::Reset(SliceId::User) => state.user.reset(),
        Action::ClearSession => state.auth.clear_session(),
        Action::Popup(action) => state.popup.reduce(action),
    }
}
