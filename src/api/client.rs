//! Typed client for the library REST service.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use super::types::*;
use crate::error::{ApiError, ApiFailure};
use crate::traits::{FilePart, Headers, HttpClient, MultipartForm};

/// Default base URL of the REST service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api/v1";

/// Message reported by [`LibraryApi::get_user`] on success.
pub const USER_FETCHED: &str = "User fetched";

/// Failure messages used when the server does not supply one.
pub mod defaults {
    pub const REGISTER: &str = "Registration failed";
    pub const VERIFY_OTP: &str = "OTP verification failed";
    pub const LOGIN: &str = "Login failed";
    pub const LOGOUT: &str = "Logout failed";
    pub const GET_USER: &str = "User detail failed to fetch";
    pub const FORGOT_PASSWORD: &str = "Request failed";
    pub const RESET_PASSWORD: &str = "Password reset failed";
    pub const UPDATE_PASSWORD: &str = "Password update failed";
    pub const ADD_BOOK: &str = "Failed to add book";
    pub const GET_ALL_BOOKS: &str = "Could not fetch all books";
    pub const DELETE_BOOK: &str = "Cannot delete the book";
    pub const MY_BORROWED: &str = "Failed to fetch borrowed books";
    pub const ALL_BORROWED: &str = "Failed to fetch all borrowed books";
    pub const RECORD_BORROW: &str = "Failed to record borrowed book";
    pub const RETURN_BORROW: &str = "Failed to return borrowed book";
    pub const GET_ALL_USERS: &str = "Failed to fetch users";
    pub const ADD_ADMIN: &str = "Failed to Add Admin";
}

enum Call {
    Get,
    Post(String),
    Put(String),
    Delete,
    Multipart(MultipartForm),
}

impl Call {
    fn method(&self) -> &'static str {
        match self {
            Call::Get => "GET",
            Call::Post(_) => "POST",
            Call::Put(_) => "PUT",
            Call::Delete => "DELETE",
            Call::Multipart(_) => "POST",
        }
    }
}

/// Client for the library REST service.
///
/// Each method performs exactly one HTTP call. Session credentials travel as
/// cookies held by the underlying [`HttpClient`]. Every failure is reduced
/// to an [`ApiError`] whose message is the server's `message` field or the
/// operation's default from [`defaults`].
#[derive(Clone)]
pub struct LibraryApi {
    http: Arc<dyn HttpClient>,
    base_url: String,
}

impl std::fmt::Debug for LibraryApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryApi")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LibraryApi {
    /// Create a client for `base_url` (trailing slashes are ignored).
    pub fn new(http: Arc<dyn HttpClient>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn encode<T: Serialize>(body: &T, default: &str) -> Result<String, ApiError> {
        serde_json::to_string(body)
            .map_err(|e| ApiError::new(default, ApiFailure::Request(e.to_string())))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        call: Call,
        default: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let method = call.method();
        let headers = Headers::new();
        debug!(method, %url, "api request");

        let result = match call {
            Call::Get => self.http.get(&url, &headers).await,
            Call::Post(body) => self.http.post(&url, &body, &headers).await,
            Call::Put(body) => self.http.put(&url, &body, &headers).await,
            Call::Delete => self.http.delete(&url, &headers).await,
            Call::Multipart(form) => self.http.post_multipart(&url, form, &headers).await,
        };

        let response = result.map_err(|e| {
            warn!(method, %url, error = %e, "api transport failure");
            ApiError::new(default, ApiFailure::Transport(e))
        })?;

        if !response.is_success() {
            let err = ApiError::from_body(response.status, &response.body, default);
            warn!(method, %url, status = response.status, message = %err.message, "api request rejected");
            return Err(err);
        }

        response.json::<T>().map_err(|e| {
            warn!(method, %url, error = %e, "api response did not decode");
            ApiError::new(default, ApiFailure::Decode(e.to_string()))
        })
    }

    /// `POST /auth/register`
    pub async fn register(&self, input: &RegisterRequest) -> Result<Reply<()>, ApiError> {
        let body = Self::encode(input, defaults::REGISTER)?;
        let reply: MessageBody = self
            .call("/auth/register", Call::Post(body), defaults::REGISTER)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `POST /auth/verify-otp`
    pub async fn verify_otp(&self, input: &OtpRequest) -> Result<Reply<User>, ApiError> {
        let body = Self::encode(input, defaults::VERIFY_OTP)?;
        let reply: SessionBody = self
            .call("/auth/verify-otp", Call::Post(body), defaults::VERIFY_OTP)
            .await?;
        Ok(Reply::new(reply.message, reply.user))
    }

    /// `POST /auth/login`
    pub async fn login(&self, input: &LoginRequest) -> Result<Reply<User>, ApiError> {
        let body = Self::encode(input, defaults::LOGIN)?;
        let reply: SessionBody = self
            .call("/auth/login", Call::Post(body), defaults::LOGIN)
            .await?;
        Ok(Reply::new(reply.message, reply.user))
    }

    /// `POST /auth/logout`
    pub async fn logout(&self) -> Result<Reply<()>, ApiError> {
        let reply: MessageBody = self
            .call("/auth/logout", Call::Post("{}".to_string()), defaults::LOGOUT)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `GET /auth/me`
    ///
    /// The server does not send a message here, so a fixed one is reported.
    pub async fn get_user(&self) -> Result<Reply<User>, ApiError> {
        let reply: MeBody = self.call("/auth/me", Call::Get, defaults::GET_USER).await?;
        Ok(Reply::new(USER_FETCHED, reply.data))
    }

    /// `POST /auth/password/forgot`
    pub async fn forgot_password(
        &self,
        input: &ForgotPasswordRequest,
    ) -> Result<Reply<()>, ApiError> {
        let body = Self::encode(input, defaults::FORGOT_PASSWORD)?;
        let reply: MessageBody = self
            .call("/auth/password/forgot", Call::Post(body), defaults::FORGOT_PASSWORD)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `PUT /auth/password/reset/:token`
    pub async fn reset_password(&self, input: &ResetPasswordRequest) -> Result<Reply<()>, ApiError> {
        let body = Self::encode(input, defaults::RESET_PASSWORD)?;
        let path = format!("/auth/password/reset/{}", urlencoding::encode(&input.token));
        let reply: MessageBody = self
            .call(&path, Call::Put(body), defaults::RESET_PASSWORD)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `PUT /auth/password/update`
    pub async fn update_password(
        &self,
        input: &UpdatePasswordRequest,
    ) -> Result<Reply<()>, ApiError> {
        let body = Self::encode(input, defaults::UPDATE_PASSWORD)?;
        let reply: MessageBody = self
            .call("/auth/password/update", Call::Put(body), defaults::UPDATE_PASSWORD)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `POST /book/admin/add`
    pub async fn add_book(&self, input: &NewBook) -> Result<Reply<Book>, ApiError> {
        let body = Self::encode(input, defaults::ADD_BOOK)?;
        let reply: AddedBookBody = self
            .call("/book/admin/add", Call::Post(body), defaults::ADD_BOOK)
            .await?;
        Ok(Reply::new(reply.message, reply.added_book))
    }

    /// `GET /book/all`
    pub async fn get_all_books(&self) -> Result<Reply<Vec<Book>>, ApiError> {
        let reply: DataBody<Vec<Book>> = self
            .call("/book/all", Call::Get, defaults::GET_ALL_BOOKS)
            .await?;
        Ok(Reply::new(reply.message, reply.data))
    }

    /// `DELETE /book/delete/:id`
    ///
    /// The server may omit the deleted book from its reply.
    pub async fn delete_book(&self, id: &str) -> Result<Reply<Option<Book>>, ApiError> {
        let path = format!("/book/delete/{}", urlencoding::encode(id));
        let reply: DeletedBookBody = self
            .call(&path, Call::Delete, defaults::DELETE_BOOK)
            .await?;
        Ok(Reply::new(reply.message, reply.data))
    }

    /// `GET /borrow/my-borrowed-books`
    pub async fn borrowed_books_by_user(&self) -> Result<Reply<Vec<UserBorrowedBook>>, ApiError> {
        let reply: DataBody<Vec<UserBorrowedBook>> = self
            .call("/borrow/my-borrowed-books", Call::Get, defaults::MY_BORROWED)
            .await?;
        Ok(Reply::new(reply.message, reply.data))
    }

    /// `GET /borrow/borrowed-books-by-users`
    pub async fn all_borrowed_books(&self) -> Result<Reply<Vec<BorrowRecord>>, ApiError> {
        let reply: DataBody<Vec<BorrowRecord>> = self
            .call("/borrow/borrowed-books-by-users", Call::Get, defaults::ALL_BORROWED)
            .await?;
        Ok(Reply::new(reply.message, reply.data))
    }

    /// `POST /borrow/record-borrow-book/:id`
    pub async fn record_borrowed_book(
        &self,
        input: &BorrowRequest,
    ) -> Result<Reply<BorrowRecord>, ApiError> {
        let body = Self::encode(input, defaults::RECORD_BORROW)?;
        let path = format!("/borrow/record-borrow-book/{}", urlencoding::encode(&input.id));
        let reply: DataBody<BorrowRecord> = self
            .call(&path, Call::Post(body), defaults::RECORD_BORROW)
            .await?;
        Ok(Reply::new(reply.message, reply.data))
    }

    /// `PUT /borrow/return-borrowed-book/:id`
    pub async fn return_borrowed_book(&self, input: &BorrowRequest) -> Result<Reply<()>, ApiError> {
        let body = Self::encode(input, defaults::RETURN_BORROW)?;
        let path = format!("/borrow/return-borrowed-book/{}", urlencoding::encode(&input.id));
        let reply: MessageBody = self
            .call(&path, Call::Put(body), defaults::RETURN_BORROW)
            .await?;
        Ok(Reply::new(reply.message, ()))
    }

    /// `GET /user/all`
    pub async fn get_all_users(&self) -> Result<Reply<Vec<UserItem>>, ApiError> {
        let reply: UsersBody = self
            .call("/user/all", Call::Get, defaults::GET_ALL_USERS)
            .await?;
        Ok(Reply::new(reply.message, reply.got_all_user))
    }

    /// `POST /user/add/new-admin` as `multipart/form-data`.
    pub async fn add_new_admin(&self, input: &NewAdmin) -> Result<Reply<UserItem>, ApiError> {
        let form = MultipartForm::new()
            .text("name", input.name.clone())
            .text("email", input.email.clone())
            .text("password", input.password.clone())
            .file(FilePart {
                field: "avatar".to_string(),
                file_name: input.avatar.file_name.clone(),
                mime: input.avatar.mime.clone(),
                bytes: input.avatar.bytes.clone(),
            });
        let reply: AdminBody = self
            .call("/user/add/new-admin", Call::Multipart(form), defaults::ADD_ADMIN)
            .await?;
        Ok(Reply::new(reply.message, reply.admin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;

    const BASE: &str = "http://api.test/api/v1";

    fn api() -> (LibraryApi, MockHttpClient) {
        let mock = MockHttpClient::new();
        (LibraryApi::new(Arc::new(mock.clone()), BASE), mock)
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = LibraryApi::new(Arc::new(MockHttpClient::new()), "http://x/api/v1/");
        assert_eq!(api.base_url(), "http://x/api/v1");
        assert_eq!(api.url("/book/all"), "http://x/api/v1/book/all");
    }

    #[tokio::test]
    async fn test_login_success() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/auth/login"),
            MockResponse::json(
                200,
                json!({"message": "Welcome", "user": {"_id": "u1", "name": "Ada", "email": "a@b.com", "role": "User"}}),
            ),
        );

        let reply = api
            .login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reply.message, "Welcome");
        assert_eq!(reply.data.id, "u1");

        let requests = mock.get_requests();
        assert_eq!(requests[0].method, "POST");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "a@b.com", "password": "pw"}));
    }

    #[tokio::test]
    async fn test_login_rejected_uses_server_message() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/auth/login"),
            MockResponse::json(401, json!({"message": "Invalid credentials"})),
        );

        let err = api
            .login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "wrongpw".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.message, "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[tokio::test]
    async fn test_transport_failure_uses_default() {
        let (api, mock) = api();
        mock.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));

        let err = api.get_all_users().await.unwrap_err();
        assert_eq!(err.message, "Failed to fetch users");
        assert!(matches!(err.cause, ApiFailure::Transport(_)));
    }

    #[tokio::test]
    async fn test_undecodable_success_body_uses_default() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/book/all"),
            MockResponse::json(200, json!({"message": "ok", "data": "nope"})),
        );

        let err = api.get_all_books().await.unwrap_err();
        assert_eq!(err.message, "Could not fetch all books");
        assert!(matches!(err.cause, ApiFailure::Decode(_)));
    }

    #[tokio::test]
    async fn test_get_user_remaps_id_and_reports_fixed_message() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/auth/me"),
            MockResponse::json(
                200,
                json!({"success": true, "data": {"_id": "u9", "name": "Root", "email": "r@x.io", "role": "Admin", "borrowedBooks": []}}),
            ),
        );

        let reply = api.get_user().await.unwrap();
        assert_eq!(reply.message, USER_FETCHED);
        assert_eq!(reply.data.id, "u9");
        assert!(reply.data.role.is_admin());
    }

    #[tokio::test]
    async fn test_delete_book_without_data() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/book/delete/id123"),
            MockResponse::json(200, json!({"message": "Deleted"})),
        );

        let reply = api.delete_book("id123").await.unwrap();
        assert_eq!(reply.message, "Deleted");
        assert!(reply.data.is_none());
        assert_eq!(mock.get_requests()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn test_reset_password_puts_token_in_path() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/auth/password/reset/tok42"),
            MockResponse::json(200, json!({"message": "Password reset"})),
        );

        let reply = api
            .reset_password(&ResetPasswordRequest {
                token: "tok42".to_string(),
                password: "secret123".to_string(),
                confirm_password: "secret123".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(reply.message, "Password reset");
        assert_eq!(mock.get_requests()[0].method, "PUT");
    }

    #[tokio::test]
    async fn test_path_segments_are_percent_encoded() {
        let (api, mock) = api();
        mock.set_default_response(MockResponse::json(200, json!({"message": "ok"})));

        api.reset_password(&ResetPasswordRequest {
            token: "a/b?c".to_string(),
            password: "secret123".to_string(),
            confirm_password: "secret123".to_string(),
        })
        .await
        .unwrap();
        api.delete_book("b 1#x").await.unwrap();
        api.return_borrowed_book(&BorrowRequest {
            id: "../b2".to_string(),
            email: "a@b.com".to_string(),
        })
        .await
        .unwrap();

        let urls: Vec<String> = mock.get_requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec![
                format!("{BASE}/auth/password/reset/a%2Fb%3Fc"),
                format!("{BASE}/book/delete/b%201%23x"),
                format!("{BASE}/borrow/return-borrowed-book/..%2Fb2"),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_new_admin_sends_multipart() {
        let (api, mock) = api();
        mock.set_response(
            &format!("{BASE}/user/add/new-admin"),
            MockResponse::json(
                201,
                json!({"message": "Admin added", "admin": {"_id": "a1", "name": "Bo", "email": "bo@x.io", "role": "Admin"}}),
            ),
        );

        let reply = api
            .add_new_admin(&NewAdmin {
                name: "Bo".to_string(),
                email: "bo@x.io".to_string(),
                password: "secret123".to_string(),
                avatar: Avatar {
                    file_name: "bo.png".to_string(),
                    mime: "image/png".to_string(),
                    bytes: bytes::Bytes::from_static(b"png"),
                },
            })
            .await
            .unwrap();
        assert_eq!(reply.data.id, "a1");

        let request = &mock.get_requests()[0];
        assert_eq!(request.method, "MULTIPART");
        assert_eq!(
            request.body.as_deref(),
            Some("name=Bo\nemail=bo@x.io\npassword=secret123\navatar@bo.png")
        );
    }
}
