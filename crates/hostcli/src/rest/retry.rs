use std::{num::NonZeroU32, time::Duration};

use tracing::warn;

use crate::config::AppConfig;

use super::port::{BAD_GATEWAY, RestRequest, RestResponse, RestTransport, TransportError};

/// How often and how far apart a request is re-sent while the gateway is unavailable
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: NonZeroU32,
    backoff: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(attempts: NonZeroU32, backoff: Duration) -> Self {
        Self { attempts, backoff }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.retry_attempts(), config.retry_backoff())
    }

    /// Total number of attempts, the first one included
    ///
    #[must_use]
    pub fn attempts(&self) -> NonZeroU32 {
        self.attempts
    }

    #[must_use]
    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(NonZeroU32::new(30).unwrap_or(NonZeroU32::MIN), Duration::from_secs(2))
    }
}

/// Re-sends requests answered with `502 Bad Gateway`
///
/// Any other response, and every transport error, is returned as is.
pub struct RetryingTransport<T> {
    inner: T,
    policy: RetryPolicy,
}

impl<T: RestTransport> RetryingTransport<T> {
    pub fn new(inner: T, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait::async_trait]
impl<T: RestTransport> RestTransport for RetryingTransport<T> {
    async fn execute(&self, request: RestRequest) -> Result<RestResponse, TransportError> {
        let attempts = self.policy.attempts.get();
        let mut attempt = 1;

        loop {
            let response = self.inner.execute(request.clone()).await?;

            if response.status != BAD_GATEWAY || attempt >= attempts {
                return Ok(response);
            }

            warn!(
                "Backend answered {} {}, retrying in {:?} (attempt {attempt} of {attempts})",
                response.status, response.reason, self.policy.backoff
            );
            tokio::time::sleep(self.policy.backoff).await;
            attempt += 1;
        }
    }
}
