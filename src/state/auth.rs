//! Authentication slice.

use super::status::{AsyncSlice, SlicePayload, Status};
use crate::api::{Reply, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthOp {
    Register,
    VerifyOtp,
    Login,
    Logout,
    GetUser,
    ForgotPassword,
    ResetPassword,
    UpdatePassword,
}

/// Result of a fulfilled auth operation.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPayload {
    Registered(Reply<()>),
    OtpVerified(Reply<User>),
    LoggedIn(Reply<User>),
    LoggedOut(Reply<()>),
    UserFetched(Reply<User>),
    ResetRequested(Reply<()>),
    PasswordReset(Reply<()>),
    PasswordUpdated(Reply<()>),
}

impl SlicePayload for AuthPayload {
    type Op = AuthOp;

    fn op(&self) -> AuthOp {
        match self {
            AuthPayload::Registered(_) => AuthOp::Register,
            AuthPayload::OtpVerified(_) => AuthOp::VerifyOtp,
            AuthPayload::LoggedIn(_) => AuthOp::Login,
            AuthPayload::LoggedOut(_) => AuthOp::Logout,
            AuthPayload::UserFetched(_) => AuthOp::GetUser,
            AuthPayload::ResetRequested(_) => AuthOp::ForgotPassword,
            AuthPayload::PasswordReset(_) => AuthOp::ResetPassword,
            AuthPayload::PasswordUpdated(_) => AuthOp::UpdatePassword,
        }
    }

    fn message(&self) -> &str {
        match self {
            AuthPayload::Registered(r)
            | AuthPayload::LoggedOut(r)
            | AuthPayload::ResetRequested(r)
            | AuthPayload::PasswordReset(r)
            | AuthPayload::PasswordUpdated(r) => &r.message,
            AuthPayload::OtpVerified(r) | AuthPayload::LoggedIn(r) | AuthPayload::UserFetched(r) => {
                &r.message
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub status: Status<AuthOp>,
    pub user: Option<User>,
    pub is_authenticated: bool,
}

impl AuthState {
    /// Return to the initial state, dropping the session.
    pub fn clear_session(&mut self) -> bool {
        let changed = *self != AuthState::default();
        *self = AuthState::default();
        changed
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.role.is_admin())
    }
}

impl AsyncSlice for AuthState {
    type Op = AuthOp;
    type Payload = AuthPayload;

    fn status(&self) -> &Status<AuthOp> {
        &self.status
    }

    fn status_mut(&mut self) -> &mut Status<AuthOp> {
        &mut self.status
    }

    fn default_error(op: AuthOp) -> &'static str {
        match op {
            AuthOp::Register => "Registration failed",
            AuthOp::VerifyOtp => "OTP verification failed",
            AuthOp::Login => "Login failed",
            AuthOp::Logout => "Logout failed",
            AuthOp::GetUser => "User detail failed to fetch",
            AuthOp::ForgotPassword => "Password reset request failed",
            AuthOp::ResetPassword => "Password reset failed",
            AuthOp::UpdatePassword => "Password update failed",
        }
    }

    fn merge(&mut self, payload: AuthPayload) {
        match payload {
            AuthPayload::OtpVerified(reply)
            | AuthPayload::LoggedIn(reply)
            | AuthPayload::UserFetched(reply) => {
                self.user = Some(reply.data);
                self.is_authenticated = true;
            }
            AuthPayload::LoggedOut(_) => {
                self.user = None;
                self.is_authenticated = false;
            }
            AuthPayload::Registered(_)
            | AuthPayload::ResetRequested(_)
            | AuthPayload::PasswordReset(_)
            | AuthPayload::PasswordUpdated(_) => {}
        }
    }
}
