//! Client-side validation errors.
//!
//! Raised by form checks before an operation is dispatched. They are shown
//! as an error toast and never touch slice state.

use thiserror::Error;

/// A form failed a client-side check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Email is required")]
    MissingEmail,

    #[error("Passwords don't match")]
    RegisterPasswordMismatch,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Invalid verification link (no email provided)")]
    MissingVerificationEmail,

    #[error("Please enter the OTP code")]
    MissingOtp,

    #[error("Passwords do not match")]
    ResetPasswordMismatch,

    #[error("New passwords do not match")]
    NewPasswordMismatch,

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must be a number")]
    NotANumber(&'static str),

    #[error("Avatar file is required")]
    MissingAvatar,
}
