use serde_json::Value;
use thiserror::Error;

use crate::command::Operation;

use super::session::SessionError;

/// HTTP status the backend gateway answers with while it is not ready
pub const BAD_GATEWAY: u16 = 502;

/// One request as the dispatcher wants it sent
///
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    pub operation: Operation,

    /// Path relative to the session's base URL, or an absolute `http...` URL
    pub path: String,

    pub body: Option<Value>,
    pub query: Option<Vec<(String, String)>>,
}

impl RestRequest {
    #[must_use]
    pub fn new(operation: Operation, path: &str) -> Self {
        Self {
            operation,
            path: path.to_string(),
            body: None,
            query: None,
        }
    }
}

/// Raw HTTP response: status, reason phrase and undecoded body
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl RestResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for executing HTTP requests (Hexagonal Architecture)
///
/// Implementations return every response they receive; status checking is left to the
/// dispatcher.
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait::async_trait]
pub trait RestTransport: Send + Sync {
    /// Send `request` and wait for the full response
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the request cannot be built or sent, or no token is
    /// available for an authenticated session.
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, TransportError>;
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Failed to build HTTP client: {0}")]
    ClientInit(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },
}
