//! Turns slice feedback into toasts, redirects and follow-up requests.
//!
//! [`reconcile`] is a pure function of the state and the current route. It
//! returns the [`Effect`]s the app must run; every slice it reports on is
//! reset in the same pass, so each outcome is surfaced exactly once.
//!
//! | Route | Watched slices |
//! |-------|----------------|
//! | auth screens | Auth |
//! | Dashboard, Users | Auth, User |
//! | Books | Auth, Book, Borrow |
//! | Catalog, My Borrowed Books | Auth, Borrow |
//!
//! An open popup adds the slice its form submits to. On home routes success
//! messages mentioning "fetch" are not toasted.

pub mod toast;

pub use toast::{Toast, ToastKind, ToastQueue, DEFAULT_TOAST_TTL};

use crate::app::{Route, Section};
use crate::state::*;
use crate::store::{Action, OpKind, Operation};

/// Where a follow-up sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// OTP entry for the email that just registered.
    OtpVerification,
    Login,
    Home,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Toast(ToastKind, String),
    Apply(Action),
    Dispatch(Operation),
    Navigate(Target),
}

fn popup_slice(kind: PopupKind) -> Option<SliceId> {
    match kind {
        PopupKind::Settings => Some(SliceId::Auth),
        PopupKind::AddBook => Some(SliceId::Book),
        PopupKind::Record | PopupKind::ReturnBook => Some(SliceId::Borrow),
        PopupKind::AddNewAdmin => Some(SliceId::User),
        PopupKind::ReadBook => None,
    }
}

/// Slices whose feedback is surfaced on `route`.
pub fn watched_slices(route: &Route, popups: &PopupState) -> Vec<SliceId> {
    let mut slices = match route.section() {
        None => vec![SliceId::Auth],
        Some(Section::Dashboard) | Some(Section::Users) => vec![SliceId::Auth, SliceId::User],
        Some(Section::Books) => vec![SliceId::Auth, SliceId::Book, SliceId::Borrow],
        Some(Section::Catalog) | Some(Section::MyBorrowedBooks) => {
            vec![SliceId::Auth, SliceId::Borrow]
        }
    };
    if route.is_protected() {
        for kind in PopupKind::ALL {
            if let Some(slice) = popups.is_open(kind).then(|| popup_slice(kind)).flatten() {
                if !slices.contains(&slice) {
                    slices.push(slice);
                }
            }
        }
    }
    slices
}

/// Whether "fetch" success messages stay silent on `route`.
pub fn suppresses_fetch(route: &Route) -> bool {
    route.is_protected()
}

fn is_fetch_message(text: &str) -> bool {
    text.to_lowercase().contains("fetch")
}

fn slice_feedback(state: &AppState, slice: SliceId) -> Option<(FeedbackKind, &str, OpKind)> {
    match slice {
        SliceId::Auth => state
            .auth
            .status
            .feedback
            .as_ref()
            .map(|f| (f.kind, f.text.as_str(), OpKind::Auth(f.op))),
        SliceId::Book => state
            .book
            .status
            .feedback
            .as_ref()
            .map(|f| (f.kind, f.text.as_str(), OpKind::Book(f.op))),
        SliceId::Borrow => state
            .borrow
            .status
            .feedback
            .as_ref()
            .map(|f| (f.kind, f.text.as_str(), OpKind::Borrow(f.op))),
        SliceId::User => state
            .user
            .status
            .feedback
            .as_ref()
            .map(|f| (f.kind, f.text.as_str(), OpKind::User(f.op))),
    }
}

fn close(kind: PopupKind) -> Effect {
    Effect::Apply(Action::Popup(PopupAction::Set(kind, false)))
}

/// What a successful fire-and-forget operation triggers.
fn follow_ups(kind: OpKind) -> Vec<Effect> {
    match kind {
        OpKind::Auth(AuthOp::Register) => vec![Effect::Navigate(Target::OtpVerification)],
        OpKind::Auth(AuthOp::VerifyOtp) => vec![Effect::Navigate(Target::Home)],
        OpKind::Auth(AuthOp::ForgotPassword) | OpKind::Auth(AuthOp::ResetPassword) => {
            vec![Effect::Navigate(Target::Login)]
        }
        OpKind::Auth(AuthOp::UpdatePassword) => vec![close(PopupKind::Settings)],
        OpKind::Book(BookOp::Add) => vec![
            close(PopupKind::AddBook),
            Effect::Dispatch(Operation::GetAllBooks),
        ],
        OpKind::Borrow(BorrowOp::Record) => vec![
            close(PopupKind::Record),
            Effect::Dispatch(Operation::GetAllBooks),
        ],
        OpKind::Borrow(BorrowOp::Return) => vec![
            close(PopupKind::ReturnBook),
            Effect::Dispatch(Operation::AllBorrowedBooks),
        ],
        _ => Vec::new(),
    }
}

/// Effects for one pass over the watched slices.
///
/// Resets come before follow-up dispatches so that a re-fetch started by
/// the pass keeps its loading flag.
pub fn reconcile(state: &AppState, route: &Route) -> Vec<Effect> {
    reconcile_watching(state, route, &[])
}

/// Like [`reconcile`], also surfacing the `extra` slices whatever the route.
///
/// The app passes the slices of requests the user started and that have not
/// been surfaced yet, so their outcome is shown even after the user moved to
/// a screen that does not watch them.
pub fn reconcile_watching(state: &AppState, route: &Route, extra: &[SliceId]) -> Vec<Effect> {
    let mut effects = Vec::new();
    let mut follow = Vec::new();
    let suppress = suppresses_fetch(route);

    let mut slices = watched_slices(route, &state.popup);
    for slice in extra {
        if !slices.contains(slice) {
            slices.push(*slice);
        }
    }

    for slice in slices {
        let Some((kind, text, op)) = slice_feedback(state, slice) else {
            continue;
        };
        match kind {
            FeedbackKind::Error => {
                effects.push(Effect::Toast(ToastKind::Error, text.to_string()));
            }
            FeedbackKind::Success => {
                if !text.is_empty() && !(suppress && is_fetch_message(text)) {
                    effects.push(Effect::Toast(ToastKind::Success, text.to_string()));
                }
                follow.extend(follow_ups(op));
            }
        }
        effects.push(Effect::Apply(Action::Reset(slice)));
    }

    effects.extend(follow);
    effects
}

/// Redirect required by the session, if any.
///
/// Protected routes bounce to login once no auth request is pending and
/// nobody is signed in; auth screens bounce home when signed in.
pub fn session_redirect(state: &AppState, route: &Route) -> Option<Target> {
    let auth = &state.auth;
    if route.is_protected() {
        (!auth.status.loading && !auth.is_authenticated).then_some(Target::Login)
    } else {
        auth.is_authenticated.then_some(Target::Home)
    }
}
