use thiserror::Error;

use crate::config::AppConfig;

/// Supplies the backend base URL and, when the backend needs it, an auth token
///
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
#[async_trait::async_trait]
pub trait SessionProvider: Send + Sync {
    /// Whether requests must carry an `X-Auth-Token` header
    ///
    fn auth_required(&self) -> bool;

    fn base_url(&self) -> String;

    /// A token valid for the next request, renewed first if it is about to expire
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if no token can be produced.
    async fn current_token(&self) -> Result<String, SessionError>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("OS_REST_URL environment variable missing")]
    MissingRestUrl,

    #[error("No auth token available")]
    TokenUnavailable,
}

/// A session with a fixed base URL and an optional fixed token
///
/// Without a token no authentication is performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSession {
    base_url: String,
    token: Option<String>,
}

impl StaticSession {
    #[must_use]
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(ToString::to_string),
        }
    }

    /// Build the session from the configured REST URL and token
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingRestUrl`] if no REST URL is configured.
    pub fn from_config(config: &AppConfig) -> Result<Self, SessionError> {
        let base_url = config.rest_url().ok_or(SessionError::MissingRestUrl)?;
        Ok(Self::new(base_url, config.token()))
    }
}

#[async_trait::async_trait]
impl SessionProvider for StaticSession {
    fn auth_required(&self) -> bool {
        self.token.is_some()
    }

    fn base_url(&self) -> String {
        self.base_url.clone()
    }

    async fn current_token(&self) -> Result<String, SessionError> {
        self.token.clone().ok_or(SessionError::TokenUnavailable)
    }
}
