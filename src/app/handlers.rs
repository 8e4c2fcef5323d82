//! Keyboard handling for the App.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::api::BorrowRequest;
use crate::state::selectors::user_page_count;
use crate::state::PopupKind;
use crate::store::Operation;

use super::forms;
use super::{App, Flow, Route, Section};

impl App {
    /// Handle a key press. Releases and repeats from enhanced keyboards are
    /// ignored.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.mark_dirty();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(kind) = self.store.state().popup.topmost() {
            self.handle_popup_key(kind, key);
        } else if self.route.is_protected() {
            self.handle_home_key(key);
        } else {
            self.handle_auth_key(key);
        }
    }

    /// Insert pasted text into whichever input has focus. Newlines are
    /// dropped since every field is a single line.
    pub fn handle_paste(&mut self, text: &str) {
        self.mark_dirty();
        let chars = text.chars().filter(|c| !c.is_control());
        if self.store.state().popup.topmost().is_some() {
            chars.for_each(|c| self.popup_form.insert(c));
        } else if self.route.is_protected() {
            if self.view.searching {
                self.view.search.extend(chars);
                self.view.selected = 0;
            }
        } else {
            chars.for_each(|c| self.form.insert(c));
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('r') if ctrl && self.route == Route::Login => {
                self.navigate(Route::Register);
            }
            KeyCode::Char('f') if ctrl && self.route == Route::Login => {
                self.navigate(Route::ForgotPassword);
            }
            KeyCode::Esc => {
                if self.route == Route::Login {
                    self.should_quit = true;
                } else {
                    self.navigate(Route::Login);
                }
            }
            KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
            KeyCode::Enter => {
                if self.form.on_last() {
                    self.submit_form();
                } else {
                    self.form.focus_next();
                }
            }
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Char(c) if !ctrl => self.form.insert(c),
            _ => {}
        }
    }

    /// Validate the auth screen's form and send it.
    pub fn submit_form(&mut self) {
        let form = &self.form;
        let result = match &self.route {
            Route::Login => forms::login(form.value(0), form.value(1))
                .map(|request| (Some(Flow::Login), Operation::Login(request))),
            Route::Register => {
                forms::register(form.value(0), form.value(1), form.value(2), form.value(3)).map(
                    |request| {
                        self.registered_email = Some(request.email.clone());
                        (None, Operation::Register(request))
                    },
                )
            }
            Route::OtpVerification { email } => forms::verify_otp(email, form.value(0))
                .map(|request| (None, Operation::VerifyOtp(request))),
            Route::ForgotPassword => forms::forgot_password(form.value(0))
                .map(|request| (None, Operation::ForgotPassword(request))),
            Route::ResetPassword { token } => {
                forms::reset_password(token, form.value(0), form.value(1))
                    .map(|request| (None, Operation::ResetPassword(request)))
            }
            Route::Home { .. } => return,
        };
        match result {
            Ok((Some(flow), operation)) => self.start_flow(flow, operation),
            Ok((None, operation)) => self.dispatch(operation),
            Err(err) => {
                self.toasts.error(err.to_string());
            }
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        if self.view.searching {
            self.handle_search_key(key);
            return;
        }
        let section = self.route.section().unwrap_or_default();
        let admin = self.is_admin();

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.cycle_section(1),
            KeyCode::BackTab => self.cycle_section(-1),
            KeyCode::Char(c @ '1'..='9') => {
                let idx = c as usize - '1' as usize;
                if let Some(section) = Section::visible_to(self.role()).get(idx).copied() {
                    self.select_section(section);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.selected = self.view.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let rows = self.row_count();
                if self.view.selected + 1 < rows {
                    self.view.selected += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.page_or_tab(-1),
            KeyCode::Right | KeyCode::Char('l') => self.page_or_tab(1),
            KeyCode::Char('s') => self.open_popup(PopupKind::Settings),
            KeyCode::Char('x') => self.start_flow(Flow::Logout, Operation::Logout),
            KeyCode::Char('n') if admin => self.open_popup(PopupKind::AddNewAdmin),
            KeyCode::Char('/') if section == Section::Books => {
                self.view.searching = true;
            }
            KeyCode::Enter if section == Section::Books => {
                if let Some(id) = self.selected_book_id() {
                    self.view.book_id = Some(id);
                    self.open_popup(PopupKind::ReadBook);
                }
            }
            KeyCode::Char('a') if admin && section == Section::Books => {
                self.open_popup(PopupKind::AddBook);
            }
            KeyCode::Char('r') if admin && section == Section::Books => {
                if let Some(id) = self.selected_book_id() {
                    self.view.book_id = Some(id);
                    self.open_popup(PopupKind::Record);
                }
            }
            KeyCode::Char('d') if admin && section == Section::Books => {
                if let Some(id) = self.selected_book_id() {
                    self.dispatch(Operation::DeleteBook(id));
                }
            }
            KeyCode::Enter if admin && section == Section::Catalog => {
                let target = self.selected_record().map(|record| BorrowRequest {
                    id: record.book.clone(),
                    email: record.user.email.clone(),
                });
                if let Some(target) = target {
                    self.view.return_target = Some(target);
                    self.open_popup(PopupKind::ReturnBook);
                }
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.search.clear();
                self.view.searching = false;
            }
            KeyCode::Enter => self.view.searching = false,
            KeyCode::Backspace => {
                self.view.search.pop();
            }
            KeyCode::Char(c) => self.view.search.push(c),
            _ => return,
        }
        self.view.selected = 0;
    }

    fn cycle_section(&mut self, step: isize) {
        let visible = Section::visible_to(self.role());
        let current = self.route.section().unwrap_or_default();
        let idx = visible.iter().position(|s| *s == current).unwrap_or(0) as isize;
        let len = visible.len() as isize;
        let next = (idx + step).rem_euclid(len) as usize;
        if let Some(section) = visible.get(next).copied() {
            self.select_section(section);
        }
    }

    /// Left/right switch pages on Users and tabs on the tabbed sections.
    fn page_or_tab(&mut self, step: isize) {
        match self.route.section() {
            Some(Section::Users) => {
                let pages = user_page_count(self.store.state());
                let page = self.view.page as isize + step;
                if (0..pages as isize).contains(&page) {
                    self.view.page = page as usize;
                    self.view.selected = 0;
                }
            }
            Some(Section::Catalog) | Some(Section::MyBorrowedBooks) => {
                self.view.tab = self.view.tab.toggle();
                self.view.selected = 0;
            }
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, kind: PopupKind, key: KeyEvent) {
        match kind {
            PopupKind::ReadBook => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
                    self.close_popup(kind);
                }
                return;
            }
            PopupKind::ReturnBook => {
                match key.code {
                    KeyCode::Esc => self.close_popup(kind),
                    KeyCode::Enter => self.submit_popup(kind),
                    _ => {}
                }
                return;
            }
            _ => {}
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.close_popup(kind),
            KeyCode::Tab | KeyCode::Down => self.popup_form.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.popup_form.focus_prev(),
            KeyCode::Enter => {
                if self.popup_form.on_last() {
                    self.submit_popup(kind);
                } else {
                    self.popup_form.focus_next();
                }
            }
            KeyCode::Backspace => self.popup_form.backspace(),
            KeyCode::Char(c) if !ctrl => self.popup_form.insert(c),
            _ => {}
        }
    }

    /// Validate a popup's form and send it.
    pub fn submit_popup(&mut self, kind: PopupKind) {
        let form = &self.popup_form;
        let result = match kind {
            PopupKind::Settings => {
                forms::update_password(form.value(0), form.value(1), form.value(2))
                    .map(Operation::UpdatePassword)
            }
            PopupKind::AddBook => forms::new_book(
                form.value(0),
                form.value(1),
                form.value(2),
                form.value(3),
                form.value(4),
            )
            .map(Operation::AddBook),
            PopupKind::Record => {
                let id = self.view.book_id.clone().unwrap_or_default();
                forms::borrow(&id, form.value(0)).map(Operation::RecordBorrowedBook)
            }
            PopupKind::ReturnBook => match self.view.return_target.clone() {
                Some(target) => Ok(Operation::ReturnBorrowedBook(target)),
                None => return,
            },
            PopupKind::AddNewAdmin => {
                let path = match forms::avatar_path(form.value(3)) {
                    Ok(path) => path.to_string(),
                    Err(err) => {
                        self.toasts.error(err.to_string());
                        return;
                    }
                };
                if let Some(admin) = self.new_admin(&path) {
                    self.start_flow(Flow::AddAdmin, Operation::AddNewAdmin(admin));
                }
                return;
            }
            PopupKind::ReadBook => return,
        };
        match result {
            Ok(operation) => self.dispatch(operation),
            Err(err) => {
                self.toasts.error(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockHttpClient;
    use crate::api::LibraryApi;
    use crate::store::Store;
    use crossterm::event::KeyEventState;
    use std::sync::Arc;
    use std::time::Duration;

    fn app(route: Route) -> (App, MockHttpClient) {
        let mock = MockHttpClient::new();
        let api = LibraryApi::new(Arc::new(mock.clone()), "http://api.test/api/v1");
        (App::new(Store::new(api), Duration::from_secs(5), route), mock)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[tokio::test]
    async fn test_typing_fills_focused_field() {
        let (mut app, _mock) = app(Route::Login);
        type_text(&mut app, "ada@x.io");
        app.handle_key(press(KeyCode::Tab));
        type_text(&mut app, "pw");
        assert_eq!(app.form.value(0), "ada@x.io");
        assert_eq!(app.form.value(1), "pw");
    }

    #[tokio::test]
    async fn test_enter_on_last_field_submits() {
        let (mut app, mock) = app(Route::Login);
        mock.set_default_response(crate::adapters::mock::MockResponse::json(
            401,
            serde_json::json!({"message": "Invalid credentials"}),
        ));
        type_text(&mut app, "ada@x.io");
        app.handle_key(press(KeyCode::Enter));
        assert!(mock.get_requests().is_empty());
        type_text(&mut app, "pw");
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.store.in_flight(), 1);
    }

    #[tokio::test]
    async fn test_paste_fills_field_without_newlines() {
        let (mut app, _mock) = app(Route::Login);
        app.handle_paste("ada@x.io\n");
        assert_eq!(app.form.value(0), "ada@x.io");

        let (mut app, _mock) = self::app(Route::Home {
            section: Section::Books,
        });
        app.handle_paste("dune");
        assert_eq!(app.view.search, "");
        app.handle_key(press(KeyCode::Char('/')));
        app.handle_paste("dune");
        assert_eq!(app.view.search, "dune");
    }

    #[tokio::test]
    async fn test_release_events_are_ignored() {
        let (mut app, _mock) = app(Route::Login);
        let release = KeyEvent {
            code: KeyCode::Char('a'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        app.handle_key(release);
        assert_eq!(app.form.value(0), "");
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_and_esc_leaves_register() {
        let (mut app, _mock) = app(Route::Register);
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.route, Route::Login);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_popup_escape_closes_it() {
        let (mut app, _mock) = app(Route::home());
        app.handle_key(press(KeyCode::Char('s')));
        assert!(app.store.state().popup.settings);
        type_text(&mut app, "old");
        assert_eq!(app.popup_form.value(0), "old");
        app.handle_key(press(KeyCode::Esc));
        assert!(!app.store.state().popup.settings);
    }

    #[tokio::test]
    async fn test_settings_mismatch_toasts_without_request() {
        let (mut app, mock) = app(Route::home());
        mock.clear_requests();
        app.open_popup(PopupKind::Settings);
        app.popup_form.set_value(0, "old");
        app.popup_form.set_value(1, "new-one");
        app.popup_form.set_value(2, "new-two");
        app.submit_popup(PopupKind::Settings);

        assert!(mock.get_requests().is_empty());
        let texts: Vec<_> = app.toasts.iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["New passwords do not match".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_avatar_is_a_validation_error() {
        let (mut app, _mock) = app(Route::home());
        app.open_popup(PopupKind::AddNewAdmin);
        app.submit_popup(PopupKind::AddNewAdmin);
        let texts: Vec<_> = app.toasts.iter().map(|t| t.text.clone()).collect();
        assert_eq!(texts, vec!["Avatar file is required".to_string()]);
        assert_eq!(app.store.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_avatar_only_toasts() {
        let (mut app, _mock) = app(Route::home());
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        app.open_popup(PopupKind::AddNewAdmin);
        app.popup_form.set_value(3, missing.to_string_lossy());
        let before = app.store.state().clone();
        app.submit_popup(PopupKind::AddNewAdmin);

        assert_eq!(app.store.in_flight(), 0);
        assert_eq!(app.store.state(), &before);
        assert_eq!(app.toasts.len(), 1);
    }
}
