//! Text forms and the client-side checks run before a submit.
//!
//! Each check turns raw field text into a request type or a
//! [`ValidationError`]. A failed check is shown as an error toast and no
//! request is made.

use crate::api::{
    BorrowRequest, ForgotPasswordRequest, LoginRequest, NewBook, OtpRequest, RegisterRequest,
    ResetPasswordRequest, UpdatePasswordRequest,
};
use crate::error::ValidationError;
use crate::state::PopupKind;

use super::Route;

/// Shortest password accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A single line of text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub value: String,
    /// Render the value as bullets.
    pub masked: bool,
}

/// An ordered set of fields with one focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    fields: Vec<Field>,
    focus: usize,
}

impl Form {
    pub fn new(specs: &[(&'static str, bool)]) -> Self {
        Self {
            fields: specs
                .iter()
                .map(|&(label, masked)| Field {
                    label,
                    value: String::new(),
                    masked,
                })
                .collect(),
            focus: 0,
        }
    }

    /// The form shown on an auth screen. Home has none.
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Login => Form::new(&[("Email", false), ("Password", true)]),
            Route::Register => Form::new(&[
                ("Name", false),
                ("Email", false),
                ("Password", true),
                ("Confirm Password", true),
            ]),
            Route::OtpVerification { .. } => Form::new(&[("OTP", false)]),
            Route::ForgotPassword => Form::new(&[("Email", false)]),
            Route::ResetPassword { .. } => {
                Form::new(&[("Password", true), ("Confirm Password", true)])
            }
            Route::Home { .. } => Form::default(),
        }
    }

    /// The form inside a popup. Read-only popups have none.
    pub fn for_popup(kind: PopupKind) -> Self {
        match kind {
            PopupKind::Settings => Form::new(&[
                ("Current Password", true),
                ("New Password", true),
                ("Confirm New Password", true),
            ]),
            PopupKind::AddBook => Form::new(&[
                ("Title", false),
                ("Author", false),
                ("Description", false),
                ("Price", false),
                ("Quantity", false),
            ]),
            PopupKind::Record => Form::new(&[("User Email", false)]),
            PopupKind::AddNewAdmin => Form::new(&[
                ("Name", false),
                ("Email", false),
                ("Password", true),
                ("Avatar Path", false),
            ]),
            PopupKind::ReadBook | PopupKind::ReturnBook => Form::default(),
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value of the field at `idx`, or "" past the end.
    pub fn value(&self, idx: usize) -> &str {
        self.fields.get(idx).map(|f| f.value.as_str()).unwrap_or("")
    }

    pub fn set_value(&mut self, idx: usize, value: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(idx) {
            field.value = value.into();
        }
    }

    pub fn insert(&mut self, c: char) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.value.pop();
        }
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Whether the focus is on the last field.
    pub fn on_last(&self) -> bool {
        self.focus + 1 >= self.fields.len()
    }
}

pub fn login(email: &str, password: &str) -> Result<LoginRequest, ValidationError> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    })
}

pub fn register(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<RegisterRequest, ValidationError> {
    if password != confirm {
        return Err(ValidationError::RegisterPasswordMismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
    }
    Ok(RegisterRequest {
        name: name.trim().to_string(),
        email: email.trim().to_lowercase(),
        password: password.to_string(),
    })
}

pub fn verify_otp(email: &str, otp: &str) -> Result<OtpRequest, ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::MissingVerificationEmail);
    }
    if otp.trim().is_empty() {
        return Err(ValidationError::MissingOtp);
    }
    Ok(OtpRequest {
        email: email.trim().to_string(),
        otp: otp.trim().to_string(),
    })
}

pub fn forgot_password(email: &str) -> Result<ForgotPasswordRequest, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    Ok(ForgotPasswordRequest {
        email: email.to_string(),
    })
}

pub fn reset_password(
    token: &str,
    password: &str,
    confirm: &str,
) -> Result<ResetPasswordRequest, ValidationError> {
    if password != confirm {
        return Err(ValidationError::ResetPasswordMismatch);
    }
    Ok(ResetPasswordRequest {
        token: token.to_string(),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
    })
}

pub fn update_password(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<UpdatePasswordRequest, ValidationError> {
    if new != confirm {
        return Err(ValidationError::NewPasswordMismatch);
    }
    Ok(UpdatePasswordRequest {
        current_password: current.to_string(),
        new_password: new.to_string(),
        confirm_new_password: confirm.to_string(),
    })
}

pub fn new_book(
    title: &str,
    author: &str,
    description: &str,
    price: &str,
    quantity: &str,
) -> Result<NewBook, ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingField("Title"));
    }
    if author.trim().is_empty() {
        return Err(ValidationError::MissingField("Author"));
    }
    let price = price
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
        .ok_or(ValidationError::NotANumber("Price"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| ValidationError::NotANumber("Quantity"))?;
    Ok(NewBook {
        title: title.trim().to_string(),
        author: author.trim().to_string(),
        description: description.trim().to_string(),
        price,
        quantity,
    })
}

/// Borrow and return both address a book by id and a user by email.
pub fn borrow(book_id: &str, email: &str) -> Result<BorrowRequest, ValidationError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    Ok(BorrowRequest {
        id: book_id.to_string(),
        email: email.to_string(),
    })
}

/// The avatar path must be filled in; reading the file happens later.
pub fn avatar_path(path: &str) -> Result<&str, ValidationError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ValidationError::MissingAvatar);
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_editing_and_focus() {
        let mut form = Form::for_route(&Route::Login);
        form.insert('a');
        form.insert('b');
        form.backspace();
        form.focus_next();
        form.insert('x');
        assert_eq!(form.value(0), "a");
        assert_eq!(form.value(1), "x");
        assert!(form.on_last());

        form.focus_next();
        assert_eq!(form.focus(), 0);
        form.focus_prev();
        assert_eq!(form.focus(), 1);
        assert_eq!(form.value(9), "");
    }

    #[test]
    fn test_home_and_read_only_popups_have_no_fields() {
        assert!(Form::for_route(&Route::home()).is_empty());
        assert!(Form::for_popup(PopupKind::ReadBook).is_empty());
        assert!(Form::for_popup(PopupKind::ReturnBook).is_empty());
        assert_eq!(Form::for_popup(PopupKind::AddBook).fields().len(), 5);
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert_eq!(login("", "pw"), Err(ValidationError::MissingCredentials));
        assert_eq!(login("a@x.io", ""), Err(ValidationError::MissingCredentials));
        assert_eq!(login(" a@x.io ", "pw").unwrap().email, "a@x.io");
    }

    #[test]
    fn test_register_checks_match_before_length() {
        assert_eq!(
            register("A", "a@x.io", "short", "other"),
            Err(ValidationError::RegisterPasswordMismatch)
        );
        assert_eq!(
            register("A", "a@x.io", "short", "short"),
            Err(ValidationError::PasswordTooShort(8))
        );
        let request = register("Ada", " Ada@X.io", "longenough", "longenough").unwrap();
        assert_eq!(request.email, "ada@x.io");
    }

    #[test]
    fn test_otp_checks() {
        assert_eq!(verify_otp("", "1234"), Err(ValidationError::MissingVerificationEmail));
        assert_eq!(verify_otp("a@x.io", "  "), Err(ValidationError::MissingOtp));
        assert_eq!(verify_otp("a@x.io", " 1234 ").unwrap().otp, "1234");
    }

    #[test]
    fn test_password_mismatches_use_their_own_copy() {
        assert_eq!(
            reset_password("t", "a", "b"),
            Err(ValidationError::ResetPasswordMismatch)
        );
        assert_eq!(
            update_password("old", "a", "b"),
            Err(ValidationError::NewPasswordMismatch)
        );
        assert_eq!(reset_password("tok", "a", "a").unwrap().token, "tok");
    }

    #[test]
    fn test_new_book_parses_numbers() {
        assert_eq!(
            new_book("", "A", "", "1", "1"),
            Err(ValidationError::MissingField("Title"))
        );
        assert_eq!(
            new_book("T", "A", "", "cheap", "1"),
            Err(ValidationError::NotANumber("Price"))
        );
        assert_eq!(
            new_book("T", "A", "", "2.5", "-1"),
            Err(ValidationError::NotANumber("Quantity"))
        );
        let book = new_book("Dune", "Herbert", "", "12.5", "3").unwrap();
        assert_eq!(book.price, 12.5);
        assert_eq!(book.quantity, 3);
    }

    #[test]
    fn test_borrow_and_avatar() {
        assert_eq!(borrow("b1", " "), Err(ValidationError::MissingEmail));
        assert_eq!(borrow("b1", "u@x.io").unwrap().id, "b1");
        assert_eq!(avatar_path(""), Err(ValidationError::MissingAvatar));
        assert_eq!(avatar_path(" a.png "), Ok("a.png"));
        assert_eq!(forgot_password(""), Err(ValidationError::MissingEmail));
    }
}
