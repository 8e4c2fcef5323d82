//! Async operations the views can dispatch.

use crate::api::*;
use crate::error::ApiError;
use crate::state::*;

use super::action::Action;

/// A remote operation with its typed input.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Register(RegisterRequest),
    VerifyOtp(OtpRequest),
    Login(LoginRequest),
    Logout,
    GetUser,
    ForgotPassword(ForgotPasswordRequest),
    ResetPassword(ResetPasswordRequest),
    UpdatePassword(UpdatePasswordRequest),
    AddBook(NewBook),
    GetAllBooks,
    DeleteBook(String),
    BorrowedBooksByUser,
    AllBorrowedBooks,
    RecordBorrowedBook(BorrowRequest),
    ReturnBorrowedBook(BorrowRequest),
    GetAllUsers,
    AddNewAdmin(NewAdmin),
}

/// Which slice and operation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Auth(AuthOp),
    Book(BookOp),
    Borrow(BorrowOp),
    User(UserOp),
}

impl OpKind {
    pub fn slice(self) -> SliceId {
        match self {
            OpKind::Auth(_) => SliceId::Auth,
            OpKind::Book(_) => SliceId::Book,
            OpKind::Borrow(_) => SliceId::Borrow,
            OpKind::User(_) => SliceId::User,
        }
    }

    /// Error the slice records when a rejection carries no message.
    pub fn default_error(self) -> &'static str {
        match self {
            OpKind::Auth(op) => AuthState::default_error(op),
            OpKind::Book(op) => BookState::default_error(op),
            OpKind::Borrow(op) => BorrowState::default_error(op),
            OpKind::User(op) => UserState::default_error(op),
        }
    }

    pub(crate) fn pending(self, seq: u64) -> Action {
        match self {
            OpKind::Auth(op) => Action::Auth(Lifecycle::Pending { op, seq }),
            OpKind::Book(op) => Action::Book(Lifecycle::Pending { op, seq }),
            OpKind::Borrow(op) => Action::Borrow(Lifecycle::Pending { op, seq }),
            OpKind::User(op) => Action::User(Lifecycle::Pending { op, seq }),
        }
    }

    pub(crate) fn rejected(self, seq: u64, error: Option<String>) -> Action {
        match self {
            OpKind::Auth(op) => Action::Auth(Lifecycle::Rejected { op, seq, error }),
            OpKind::Book(op) => Action::Book(Lifecycle::Rejected { op, seq, error }),
            OpKind::Borrow(op) => Action::Borrow(Lifecycle::Rejected { op, seq, error }),
            OpKind::User(op) => Action::User(Lifecycle::Rejected { op, seq, error }),
        }
    }
}

/// Result of a fulfilled operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Auth(AuthPayload),
    Book(BookPayload),
    Borrow(BorrowPayload),
    User(UserPayload),
}

impl Payload {
    pub fn kind(&self) -> OpKind {
        match self {
            Payload::Auth(p) => OpKind::Auth(p.op()),
            Payload::Book(p) => OpKind::Book(p.op()),
            Payload::Borrow(p) => OpKind::Borrow(p.op()),
            Payload::User(p) => OpKind::User(p.op()),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Payload::Auth(p) => p.message(),
            Payload::Book(p) => p.message(),
            Payload::Borrow(p) => p.message(),
            Payload::User(p) => p.message(),
        }
    }

    pub(crate) fn fulfilled(self, seq: u64) -> Action {
        match self {
            Payload::Auth(payload) => Action::Auth(Lifecycle::Fulfilled { seq, payload }),
            Payload::Book(payload) => Action::Book(Lifecycle::Fulfilled { seq, payload }),
            Payload::Borrow(payload) => Action::Borrow(Lifecycle::Fulfilled { seq, payload }),
            Payload::User(payload) => Action::User(Lifecycle::Fulfilled { seq, payload }),
        }
    }
}

impl Operation {
    pub fn kind(&self) -> OpKind {
        match self {
            Operation::Register(_) => OpKind::Auth(AuthOp::Register),
            Operation::VerifyOtp(_) => OpKind::Auth(AuthOp::VerifyOtp),
            Operation::Login(_) => OpKind::Auth(AuthOp::Login),
            Operation::Logout => OpKind::Auth(AuthOp::Logout),
            Operation::GetUser => OpKind::Auth(AuthOp::GetUser),
            Operation::ForgotPassword(_) => OpKind::Auth(AuthOp::ForgotPassword),
            Operation::ResetPassword(_) => OpKind::Auth(AuthOp::ResetPassword),
            Operation::UpdatePassword(_) => OpKind::Auth(AuthOp::UpdatePassword),
            Operation::AddBook(_) => OpKind::Book(BookOp::Add),
            Operation::GetAllBooks => OpKind::Book(BookOp::FetchAll),
            Operation::DeleteBook(_) => OpKind::Book(BookOp::Delete),
            Operation::BorrowedBooksByUser => OpKind::Borrow(BorrowOp::FetchMine),
            Operation::AllBorrowedBooks => OpKind::Borrow(BorrowOp::FetchAll),
            Operation::RecordBorrowedBook(_) => OpKind::Borrow(BorrowOp::Record),
            Operation::ReturnBorrowedBook(_) => OpKind::Borrow(BorrowOp::Return),
            Operation::GetAllUsers => OpKind::User(UserOp::FetchAll),
            Operation::AddNewAdmin(_) => OpKind::User(UserOp::AddAdmin),
        }
    }

    /// Perform the network call.
    pub(crate) async fn run(self, api: LibraryApi) -> Result<Payload, ApiError> {
        use AuthPayload as A;
        let payload = match self {
            Operation::Register(input) => Payload::Auth(A::Registered(api.register(&input).await?)),
            Operation::VerifyOtp(input) => {
                Payload::Auth(A::OtpVerified(api.verify_otp(&input).await?))
            }
            Operation::Login(input) => Payload::Auth(A::LoggedIn(api.login(&input).await?)),
            Operation::Logout => Payload::Auth(A::LoggedOut(api.logout().await?)),
            Operation::GetUser => Payload::Auth(A::UserFetched(api.get_user().await?)),
            Operation::ForgotPassword(input) => {
                Payload::Auth(A::ResetRequested(api.forgot_password(&input).await?))
            }
            Operation::ResetPassword(input) => {
                Payload::Auth(A::PasswordReset(api.reset_password(&input).await?))
            }
            Operation::UpdatePassword(input) => {
                Payload::Auth(A::PasswordUpdated(api.update_password(&input).await?))
            }
            Operation::AddBook(input) => {
                Payload::Book(BookPayload::Added(api.add_book(&input).await?))
            }
            Operation::GetAllBooks => Payload::Book(BookPayload::Fetched(api.get_all_books().await?)),
            Operation::DeleteBook(id) => {
                Payload::Book(BookPayload::Deleted(api.delete_book(&id).await?))
            }
            Operation::BorrowedBooksByUser => Payload::Borrow(BorrowPayload::MineFetched(
                api.borrowed_books_by_user().await?,
            )),
            Operation::AllBorrowedBooks => {
                Payload::Borrow(BorrowPayload::AllFetched(api.all_borrowed_books().await?))
            }
            Operation::RecordBorrowedBook(input) => {
                Payload::Borrow(BorrowPayload::Recorded(api.record_borrowed_book(&input).await?))
            }
            Operation::ReturnBorrowedBook(input) => {
                Payload::Borrow(BorrowPayload::Returned(api.return_borrowed_book(&input).await?))
            }
            Operation::GetAllUsers => Payload::User(UserPayload::Fetched(api.get_all_users().await?)),
            Operation::AddNewAdmin(input) => {
                Payload::User(UserPayload::AdminAdded(api.add_new_admin(&input).await?))
            }
        };
        Ok(payload)
    }
}
