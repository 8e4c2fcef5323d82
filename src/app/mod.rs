//! Application shell around the [`Store`].
//!
//! `App` holds what the views need besides the state tree: the current
//! route, form contents, selection and the toast queue. After every key
//! press and every applied settlement the event loop calls [`App::sync`],
//! which runs the feedback layer, enforces the session redirect and
//! finishes awaited flows, in that order.

pub mod forms;
mod handlers;
mod route;

pub use forms::{Field, Form};
pub use route::{Route, Section};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::api::{Avatar, BorrowRecord, BorrowRequest, NewAdmin, Role};
use crate::feedback::{reconcile_watching, session_redirect, Effect, Target, ToastQueue};
use crate::state::selectors::{
    books_matching, my_borrowings, outstanding_borrows, overdue_borrows, users_page,
};
use crate::state::{PopupAction, PopupKind, SliceId};
use crate::store::{Action, Operation, Settlement, Store, Subscription};

/// Upper bound on reconcile passes per sync; each pass resets what it
/// reports, so two are normally enough.
const MAX_SYNC_PASSES: usize = 4;

/// Operations whose outcome the app handles itself, beyond toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Go home once signed in.
    Login,
    /// Drop the session and go to the login screen.
    Logout,
    /// Close the add-admin popup.
    AddAdmin,
}

/// Catalog and My Borrowed Books tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    First,
    Second,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Tab::First => Tab::Second,
            Tab::Second => Tab::First,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::First => 0,
            Tab::Second => 1,
        }
    }
}

/// Per-screen view state, reset on navigation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub selected: usize,
    pub tab: Tab,
    /// Zero-based users page.
    pub page: usize,
    pub search: String,
    pub searching: bool,
    /// Book shown by the read popup or borrowed by the record popup.
    pub book_id: Option<String>,
    pub return_target: Option<BorrowRequest>,
}

pub struct App {
    pub store: Store,
    pub route: Route,
    pub toasts: ToastQueue,
    /// Fields of the current auth screen.
    pub form: Form,
    /// Fields of the open popup.
    pub popup_form: Form,
    pub view: ViewState,
    flows: Vec<(Flow, Settlement)>,
    /// Requests the user started whose outcome has not been surfaced yet.
    tracked: Vec<Settlement>,
    registered_email: Option<String>,
    users_requested: bool,
    /// Set by the store subscription on every state change.
    dirty: Arc<AtomicBool>,
    _subscription: Subscription,
    pub needs_redraw: bool,
    pub should_quit: bool,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("view", &self.view)
            .field("flows", &self.flows.len())
            .field("tracked", &self.tracked.len())
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(store: Store, toast_ttl: Duration, route: Route) -> Self {
        let dirty = Arc::new(AtomicBool::new(true));
        let flag = dirty.clone();
        let subscription = store.subscribe(move |_| flag.store(true, Ordering::Release));
        Self {
            store,
            form: Form::for_route(&route),
            route,
            toasts: ToastQueue::new(toast_ttl),
            popup_form: Form::default(),
            view: ViewState::default(),
            flows: Vec::new(),
            tracked: Vec::new(),
            registered_email: None,
            users_requested: false,
            dirty,
            _subscription: subscription,
            needs_redraw: true,
            should_quit: false,
        }
    }

    /// Run the entry requests of the initial route.
    pub fn start(&mut self) {
        info!(route = ?self.route, "starting");
        self.enter(None);
        self.sync();
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether a redraw is due; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        let from_store = self.dirty.swap(false, Ordering::AcqRel);
        std::mem::take(&mut self.needs_redraw) || from_store
    }

    pub fn role(&self) -> Role {
        self.store
            .state()
            .auth
            .user
            .as_ref()
            .map(|u| u.role)
            .unwrap_or_default()
    }

    pub fn is_admin(&self) -> bool {
        self.store.state().auth.is_admin()
    }

    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        debug!(from = ?self.route, to = ?route, "navigate");
        let previous = std::mem::replace(&mut self.route, route);
        self.form = Form::for_route(&self.route);
        self.view = ViewState::default();
        self.popup_form = Form::default();
        self.store.apply(Action::Popup(PopupAction::CloseAll));
        self.enter(Some(&previous));
        self.mark_dirty();
    }

    pub fn select_section(&mut self, section: Section) {
        if section.allowed_for(self.role()) {
            self.navigate(Route::Home { section });
        }
    }

    /// Requests made when a route is entered.
    fn enter(&mut self, previous: Option<&Route>) {
        let Some(section) = self.route.section() else {
            return;
        };
        let from_home = previous.is_some_and(Route::is_protected);
        if !from_home {
            self.users_requested = false;
            self.store.dispatch(Operation::GetUser);
            self.store.dispatch(Operation::GetAllBooks);
        }
        match section {
            Section::Catalog => {
                self.store.dispatch(Operation::AllBorrowedBooks);
            }
            Section::MyBorrowedBooks => {
                self.store.dispatch(Operation::BorrowedBooksByUser);
            }
            Section::Users => {
                self.store.dispatch(Operation::GetAllUsers);
                self.users_requested = true;
            }
            Section::Dashboard | Section::Books => {}
        }
    }

    pub fn open_popup(&mut self, kind: PopupKind) {
        self.popup_form = Form::for_popup(kind);
        self.store.apply(Action::Popup(PopupAction::Set(kind, true)));
        self.mark_dirty();
    }

    pub fn close_popup(&mut self, kind: PopupKind) {
        self.store.apply(Action::Popup(PopupAction::Set(kind, false)));
        self.mark_dirty();
    }

    /// Dispatch on behalf of the user.
    ///
    /// The slice of the request stays watched until it settles, so its
    /// toast shows even if the user has moved to another screen.
    pub fn dispatch(&mut self, operation: Operation) {
        self.tracked.push(self.store.dispatch_unwrap(operation));
    }

    /// Dispatch and keep the settlement so the flow can finish in [`sync`].
    ///
    /// [`sync`]: App::sync
    pub fn start_flow(&mut self, flow: Flow, operation: Operation) {
        let settlement = self.store.dispatch_unwrap(operation);
        debug!(?flow, seq = settlement.ticket().seq, "flow started");
        self.flows.push((flow, settlement));
    }

    /// Surface feedback, enforce the session and finish flows.
    pub fn sync(&mut self) {
        for _ in 0..MAX_SYNC_PASSES {
            let mut progressed = false;

            let extra = self.pending_slices();
            let effects = reconcile_watching(self.store.state(), &self.route, &extra);
            progressed |= !effects.is_empty();
            for effect in effects {
                self.run_effect(effect);
            }

            if let Some(target) = session_redirect(self.store.state(), &self.route) {
                self.go(target);
                progressed = true;
            }

            self.request_users_for_admin();
            progressed |= self.poll_tracked();
            progressed |= self.poll_flows();

            if !progressed {
                break;
            }
            self.mark_dirty();
        }
        self.clamp_selection();
    }

    /// Wait for every request, including follow-ups, and sync after each.
    pub async fn run_until_idle(&mut self) {
        loop {
            self.sync();
            if self.store.in_flight() == 0 && self.flows.is_empty() && self.tracked.is_empty() {
                break;
            }
            self.store.next_action().await;
        }
    }

    /// Drop expired toasts.
    pub fn tick(&mut self, now: Instant) {
        if self.toasts.prune(now) {
            self.mark_dirty();
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::Toast(kind, text) => {
                self.toasts.push(kind, text);
            }
            Effect::Apply(action) => {
                self.store.apply(action);
            }
            Effect::Dispatch(operation) => {
                self.store.dispatch(operation);
            }
            Effect::Navigate(target) => self.go(target),
        }
    }

    fn go(&mut self, target: Target) {
        let route = match target {
            Target::OtpVerification => Route::OtpVerification {
                email: self.registered_email.clone().unwrap_or_default(),
            },
            Target::Login => Route::Login,
            Target::Home => Route::home(),
        };
        self.navigate(route);
    }

    /// Admins also need the user list for the dashboard.
    fn request_users_for_admin(&mut self) {
        if self.route.is_protected() && !self.users_requested && self.is_admin() {
            self.users_requested = true;
            self.store.dispatch(Operation::GetAllUsers);
        }
    }

    /// Slices of flows and user requests still waiting to be surfaced.
    fn pending_slices(&self) -> Vec<SliceId> {
        let mut slices = Vec::new();
        let pending = self.flows.iter().map(|(_, s)| s).chain(&self.tracked);
        for settlement in pending {
            let slice = settlement.ticket().kind.slice();
            if !slices.contains(&slice) {
                slices.push(slice);
            }
        }
        slices
    }

    /// Forget user requests whose outcome the last reconcile surfaced.
    fn poll_tracked(&mut self) -> bool {
        let before = self.tracked.len();
        self.tracked.retain_mut(|settlement| settlement.try_take().is_none());
        before != self.tracked.len()
    }

    /// Keep the selection on a row after the table shrank.
    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if self.view.selected >= rows {
            self.view.selected = rows.saturating_sub(1);
        }
    }

    fn poll_flows(&mut self) -> bool {
        let mut finished = Vec::new();
        self.flows.retain_mut(|(flow, settlement)| match settlement.try_take() {
            Some(outcome) => {
                finished.push((*flow, outcome.is_ok()));
                false
            }
            None => true,
        });
        let any = !finished.is_empty();
        for (flow, ok) in finished {
            debug!(?flow, ok, "flow finished");
            if ok {
                self.finish_flow(flow);
            }
        }
        any
    }

    fn finish_flow(&mut self, flow: Flow) {
        match flow {
            Flow::Login => self.navigate(Route::home()),
            Flow::Logout => {
                self.store.apply(Action::ClearSession);
                self.users_requested = false;
                self.navigate(Route::Login);
            }
            Flow::AddAdmin => self.close_popup(PopupKind::AddNewAdmin),
        }
    }

    /// Build an add-admin request, reading the avatar from disk.
    pub(crate) fn new_admin(&mut self, avatar_path: &str) -> Option<NewAdmin> {
        let avatar = match Avatar::from_path(std::path::Path::new(avatar_path)) {
            Ok(avatar) => avatar,
            Err(err) => {
                tracing::warn!(path = avatar_path, error = %err, "avatar unreadable");
                self.toasts.error(format!("Could not read avatar: {err}"));
                return None;
            }
        };
        Some(NewAdmin {
            name: self.popup_form.value(0).trim().to_string(),
            email: self.popup_form.value(1).trim().to_string(),
            password: self.popup_form.value(2).to_string(),
            avatar,
        })
    }

    /// Rows in the table of the current section.
    pub fn row_count(&self) -> usize {
        let state = self.store.state();
        match self.route.section() {
            Some(Section::Books) => books_matching(state, &self.view.search).len(),
            Some(Section::Catalog) => self.catalog_rows().len(),
            Some(Section::Users) => users_page(state, self.view.page).len(),
            Some(Section::MyBorrowedBooks) => {
                my_borrowings(state, self.view.tab == Tab::Second).len()
            }
            Some(Section::Dashboard) | None => 0,
        }
    }

    /// Borrow records shown by the current catalog tab.
    pub fn catalog_rows(&self) -> Vec<&BorrowRecord> {
        let state = self.store.state();
        match self.view.tab {
            Tab::First => outstanding_borrows(state),
            Tab::Second => overdue_borrows(state, chrono::Utc::now()),
        }
    }

    pub fn selected_book_id(&self) -> Option<String> {
        books_matching(self.store.state(), &self.view.search)
            .get(self.view.selected)
            .map(|b| b.id.clone())
    }

    pub fn selected_record(&self) -> Option<&BorrowRecord> {
        self.catalog_rows().get(self.view.selected).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::api::LibraryApi;
    use crate::feedback::ToastKind;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use serde_json::json;

    const BASE: &str = "http://api.test/api/v1";

    fn app(route: Route) -> (App, MockHttpClient) {
        let mock = MockHttpClient::new();
        let api = LibraryApi::new(Arc::new(mock.clone()), BASE);
        let app = App::new(Store::new(api), Duration::from_secs(5), route);
        (app, mock)
    }

    fn url(path: &str) -> String {
        format!("{BASE}{path}")
    }

    fn toasts(app: &App) -> Vec<(ToastKind, String)> {
        app.toasts.iter().map(|t| (t.kind, t.text.clone())).collect()
    }

    fn user(role: &str) -> serde_json::Value {
        json!({"_id": "u1", "name": "Ada", "email": "ada@x.io", "role": role})
    }

    #[tokio::test]
    async fn test_unauthenticated_home_redirects_to_login() {
        let (mut app, mock) = app(Route::home());
        mock.set_response(
            &url("/auth/me"),
            MockResponse::json(401, json!({"message": "User not authenticated"})),
        );
        mock.set_response(
            &url("/book/all"),
            MockResponse::json(401, json!({"message": "User not authenticated"})),
        );

        app.start();
        assert_eq!(app.route, Route::home());
        app.run_until_idle().await;

        assert_eq!(app.route, Route::Login);
    }

    #[tokio::test]
    async fn test_login_flow_toasts_once_and_goes_home() {
        let (mut app, mock) = app(Route::Login);
        mock.set_response(
            &url("/auth/login"),
            MockResponse::json(200, json!({"message": "Logged in", "user": user("User")})),
        );
        mock.set_response(
            &url("/auth/me"),
            MockResponse::json(200, json!({"data": user("User")})),
        );
        mock.set_response(
            &url("/book/all"),
            MockResponse::json(200, json!({"message": "Books fetched", "data": []})),
        );

        app.start();
        app.form.set_value(0, "ada@x.io");
        app.form.set_value(1, "secret");
        app.submit_form();
        app.run_until_idle().await;

        assert_eq!(app.route, Route::home());
        assert_eq!(toasts(&app), vec![(ToastKind::Success, "Logged in".to_string())]);
    }

    #[tokio::test]
    async fn test_login_rejection_shows_server_message() {
        let (mut app, mock) = app(Route::Login);
        mock.set_response(
            &url("/auth/login"),
            MockResponse::json(401, json!({"message": "Invalid credentials"})),
        );

        app.start();
        app.form.set_value(0, "ada@x.io");
        app.form.set_value(1, "wrong");
        app.submit_form();
        app.run_until_idle().await;

        assert_eq!(app.route, Route::Login);
        assert_eq!(
            toasts(&app),
            vec![(ToastKind::Error, "Invalid credentials".to_string())]
        );
        assert!(app.store.state().auth.status.feedback.is_none());
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_request() {
        let (mut app, mock) = app(Route::Login);
        app.start();
        app.submit_form();

        assert!(mock.get_requests().is_empty());
        assert_eq!(
            toasts(&app),
            vec![(ToastKind::Error, "Email and password are required".to_string())]
        );
    }

    #[tokio::test]
    async fn test_register_redirects_to_otp_with_email() {
        let (mut app, mock) = app(Route::Register);
        mock.set_response(
            &url("/auth/register"),
            MockResponse::json(200, json!({"message": "Verification code sent"})),
        );

        app.start();
        app.form.set_value(0, "Ada");
        app.form.set_value(1, "Ada@X.io");
        app.form.set_value(2, "longenough");
        app.form.set_value(3, "longenough");
        app.submit_form();
        app.run_until_idle().await;

        assert_eq!(
            app.route,
            Route::OtpVerification {
                email: "ada@x.io".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_logout_clears_session_and_keeps_toast() {
        let (mut app, mock) = app(Route::home());
        mock.set_response(
            &url("/auth/me"),
            MockResponse::json(200, json!({"data": user("User")})),
        );
        mock.set_response(
            &url("/book/all"),
            MockResponse::json(200, json!({"message": "Books fetched", "data": []})),
        );
        mock.set_response(
            &url("/auth/logout"),
            MockResponse::json(200, json!({"message": "Logged out successfully"})),
        );

        app.start();
        app.run_until_idle().await;
        assert!(app.store.state().auth.is_authenticated);

        app.start_flow(Flow::Logout, Operation::Logout);
        app.run_until_idle().await;

        assert_eq!(app.route, Route::Login);
        assert_eq!(app.store.state().auth.user, None);
        assert_eq!(
            toasts(&app),
            vec![(ToastKind::Success, "Logged out successfully".to_string())]
        );
    }

    #[tokio::test]
    async fn test_admin_bootstraps_user_list_once() {
        let (mut app, mock) = app(Route::home());
        mock.set_response(
            &url("/auth/me"),
            MockResponse::json(200, json!({"data": user("Admin")})),
        );
        mock.set_response(
            &url("/book/all"),
            MockResponse::json(200, json!({"message": "Books fetched", "data": []})),
        );
        mock.set_response(
            &url("/user/all"),
            MockResponse::json(200, json!({"message": "Users fetched", "gotAllUser": []})),
        );

        app.start();
        app.run_until_idle().await;
        app.select_section(Section::Books);
        app.run_until_idle().await;

        let user_calls = mock
            .get_requests()
            .iter()
            .filter(|r| r.url.ends_with("/user/all"))
            .count();
        assert_eq!(user_calls, 1);
        assert!(app.toasts.is_empty());
    }

    fn book(id: &str, title: &str) -> serde_json::Value {
        json!({"_id": id, "title": title, "author": "Anon", "description": "",
               "price": 10.0, "quantity": 1, "availability": true})
    }

    fn press(app: &mut App, c: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        app.sync();
    }

    /// Signed-in admin on `section` with Dune and Emma in the catalogue.
    async fn admin_on(section: Section) -> (App, MockHttpClient) {
        let (mut app, mock) = app(Route::Home { section });
        mock.set_response(
            &url("/auth/me"),
            MockResponse::json(200, json!({"data": user("Admin")})),
        );
        mock.set_response(
            &url("/book/all"),
            MockResponse::json(
                200,
                json!({"message": "Books fetched", "data": [book("b1", "Dune"), book("b2", "Emma")]}),
            ),
        );
        mock.set_response(
            &url("/user/all"),
            MockResponse::json(200, json!({"message": "Users fetched", "gotAllUser": []})),
        );
        mock.set_response(
            &url("/borrow/borrowed-books-by-users"),
            MockResponse::json(200, json!({"message": "Borrowed books fetched", "data": []})),
        );
        app.start();
        app.run_until_idle().await;
        (app, mock)
    }

    #[tokio::test]
    async fn test_selection_moves_up_when_last_row_is_deleted() {
        let (mut app, mock) = admin_on(Section::Books).await;
        mock.set_response(
            &url("/book/delete/b2"),
            MockResponse::json(200, json!({"message": "Book deleted", "data": book("b2", "Emma")})),
        );
        mock.set_response(
            &url("/book/delete/b1"),
            MockResponse::json(200, json!({"message": "Book deleted", "data": book("b1", "Dune")})),
        );

        press(&mut app, 'j');
        assert_eq!(app.selected_book_id().as_deref(), Some("b2"));
        press(&mut app, 'd');
        app.run_until_idle().await;

        assert_eq!(app.view.selected, 0);
        assert_eq!(app.selected_book_id().as_deref(), Some("b1"));

        press(&mut app, 'd');
        app.run_until_idle().await;
        let deleted: Vec<String> = mock
            .requests_with_method("DELETE")
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert_eq!(deleted, vec![url("/book/delete/b2"), url("/book/delete/b1")]);
        assert_eq!(app.row_count(), 0);
        assert_eq!(app.view.selected, 0);
    }

    #[tokio::test]
    async fn test_add_admin_error_shows_after_popup_closed() {
        let (mut app, mock) = admin_on(Section::Books).await;
        mock.set_response(
            &url("/user/add/new-admin"),
            MockResponse::json(400, json!({"message": "User already exists"})),
        );

        app.open_popup(PopupKind::AddNewAdmin);
        let admin = NewAdmin {
            name: "Grace".to_string(),
            email: "grace@x.io".to_string(),
            password: "longenough".to_string(),
            avatar: Avatar {
                file_name: "grace.png".to_string(),
                mime: "image/png".to_string(),
                bytes: bytes::Bytes::from_static(b"png"),
            },
        };
        app.start_flow(Flow::AddAdmin, Operation::AddNewAdmin(admin));
        app.close_popup(PopupKind::AddNewAdmin);
        app.run_until_idle().await;

        let expected = vec![(ToastKind::Error, "User already exists".to_string())];
        assert_eq!(toasts(&app), expected);
        assert!(app.store.state().user.status.feedback.is_none());

        app.select_section(Section::Dashboard);
        app.run_until_idle().await;
        assert_eq!(toasts(&app), expected);
    }

    #[tokio::test]
    async fn test_delete_error_shows_after_leaving_books() {
        let (mut app, mock) = admin_on(Section::Books).await;
        mock.set_response(
            &url("/book/delete/b1"),
            MockResponse::json(404, json!({"message": "Book not found"})),
        );

        press(&mut app, 'd');
        app.select_section(Section::Catalog);
        app.run_until_idle().await;

        assert_eq!(
            toasts(&app),
            vec![(ToastKind::Error, "Book not found".to_string())]
        );
        assert!(app.store.state().book.status.feedback.is_none());
    }

    #[tokio::test]
    async fn test_sections_are_gated_by_role() {
        let (mut app, _mock) = app(Route::home());
        app.select_section(Section::Users);
        assert_eq!(app.route, Route::home());
    }
}
