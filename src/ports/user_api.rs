//! User endpoint port for registering usernames over HTTP.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Error type returned by [`UserApi`] implementations.
pub type ApiError = Box<dyn Error + Send + Sync>;

/// Boxed future type alias used by [`UserApi`] to keep the trait dyn-compatible.
pub type ApiFuture<'a> = Pin<Box<dyn Future<Output = Result<UserResponse, ApiError>> + Send + 'a>>;

/// JSON body posted to the user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// The generated username.
    pub username: String,
}

/// A fully read response from the user endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// HTTP status code. Never checked, only logged.
    pub status: u16,
    /// Raw response body text.
    pub body: String,
}

/// Sends user creation requests to the target endpoint.
pub trait UserApi: Send + Sync {
    /// Posts `request` and resolves once the whole response body has been read.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails, the request cannot be sent,
    /// or the response body cannot be read. HTTP error statuses are not errors.
    fn create_user(&self, request: &CreateUserRequest) -> ApiFuture<'_>;
}
