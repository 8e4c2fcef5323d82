//! Request and response types for the library REST service.
//!
//! Field names follow the service's JSON (`_id`, camelCase). Timestamps are
//! kept as the ISO-8601 strings the server sends; views parse them with
//! chrono when they need to compare dates.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::User => "User",
        }
    }
}

/// The signed-in user.
///
/// `/auth/me` sends the database id as `_id`; it is accepted under either name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

/// A book in the inventory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub availability: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Input for `POST /book/admin/add`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
}

/// One of the signed-in user's own borrowings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBorrowedBook {
    #[serde(rename = "_id")]
    pub id: String,
    pub book_id: String,
    #[serde(default)]
    pub book_title: String,
    #[serde(default)]
    pub returned: bool,
    #[serde(default)]
    pub borrowed_date: String,
    #[serde(default)]
    pub due_date: String,
}

/// Borrower summary embedded in a borrow record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorrowUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A borrow record as seen by an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub user: BorrowUser,
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
    #[serde(default)]
    pub fine: f64,
    #[serde(default)]
    pub notified: bool,
    #[serde(default)]
    pub borrow_date: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl BorrowRecord {
    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    /// Not returned and past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.is_returned() && parse_timestamp(&self.due_date).is_some_and(|due| due < now)
    }
}

/// A row of the admin users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserItem {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    pub email: String,
    #[serde(default)]
    pub borrowed_books: Vec<UserBorrowedBook>,
    #[serde(default)]
    pub created_at: String,
}

/// Parse an ISO-8601 timestamp from the server.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Render a server timestamp as a calendar date, or the raw text if it
/// does not parse.
pub fn display_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Input for `PUT /auth/password/reset/:token`. The token goes in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    #[serde(skip)]
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
}

/// Input for recording or returning a borrowing. The book id goes in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BorrowRequest {
    #[serde(skip)]
    pub id: String,
    pub email: String,
}

/// An avatar image ready to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl Avatar {
    /// Read an avatar from disk, guessing the MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());
        let mime = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => "image/png",
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            mime: mime.to_string(),
            bytes: Bytes::from(bytes),
        })
    }
}

/// Input for `POST /user/add/new-admin`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password: String,
    pub avatar: Avatar,
}

/// A successful API result: the server's message plus the operation's data.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T> {
    pub message: String,
    pub data: T,
}

impl<T> Reply<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

// Wire shapes of the service responses.

#[derive(Debug, Deserialize)]
pub(crate) struct MessageBody {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SessionBody {
    #[serde(default)]
    pub message: String,
    pub user: User,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MeBody {
    pub data: User,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddedBookBody {
    #[serde(default)]
    pub message: String,
    pub added_book: Book,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DataBody<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeletedBookBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<Book>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UsersBody {
    #[serde(default)]
    pub message: String,
    pub got_all_user: Vec<UserItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminBody {
    #[serde(default)]
    pub message: String,
    pub admin: UserItem,
}
