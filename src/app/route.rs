//! Screens the user can be on.

use crate::api::Role;

/// Sections of the signed-in home screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Section {
    #[default]
    Dashboard,
    Books,
    Catalog,
    Users,
    MyBorrowedBooks,
}

impl Section {
    pub fn title(self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::Books => "Books",
            Section::Catalog => "Catalog",
            Section::Users => "Users",
            Section::MyBorrowedBooks => "My Borrowed Books",
        }
    }

    /// Sections shown in the sidebar for a role, in order.
    pub fn visible_to(role: Role) -> &'static [Section] {
        match role {
            Role::Admin => &[
                Section::Dashboard,
                Section::Books,
                Section::Catalog,
                Section::Users,
                Section::MyBorrowedBooks,
            ],
            Role::User => &[
                Section::Dashboard,
                Section::Books,
                Section::MyBorrowedBooks,
            ],
        }
    }

    pub fn allowed_for(self, role: Role) -> bool {
        Section::visible_to(role).contains(&self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    OtpVerification { email: String },
    ForgotPassword,
    ResetPassword { token: String },
    Home { section: Section },
}

impl Default for Route {
    fn default() -> Self {
        Route::Home {
            section: Section::default(),
        }
    }
}

impl Route {
    pub fn home() -> Self {
        Route::default()
    }

    /// Routes that need a signed-in user.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Home { .. })
    }

    pub fn section(&self) -> Option<Section> {
        match self {
            Route::Home { section } => Some(*section),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Sign In",
            Route::Register => "Sign Up",
            Route::OtpVerification { .. } => "Verify OTP",
            Route::ForgotPassword => "Forgot Password",
            Route::ResetPassword { .. } => "Reset Password",
            Route::Home { section } => section.title(),
        }
    }
}
