pub mod loader;
pub mod validate;

pub use loader::{ApplyToConfig, ConfigLoadError, ConfigLoader, Yaml as YamlLoader};
pub use validate::ValidationResult;

use std::{
    num::{NonZeroU32, NonZeroU64},
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;

const VERBOSE_DEFAULT: bool = false;
const USE_COLORS_DEFAULT: bool = true;
const REQUEST_TIMEOUT_DEFAULT: NonZeroU64 = NonZeroU64::new(60).unwrap();
const RETRY_ATTEMPTS_DEFAULT: NonZeroU32 = NonZeroU32::new(30).unwrap();
const RETRY_BACKOFF_DEFAULT: u64 = 2;

/// Application configuration combining the config file, the environment and CLI args
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // Backend settings
    #[serde(default)]
    pub(crate) rest_url: Option<String>,

    #[serde(default)]
    pub(crate) token: Option<String>,

    /// Directory holding the command definition files
    ///
    #[serde(default)]
    pub(crate) command_directory: PathBuf,

    // Request settings
    #[serde(default = "default_request_timeout")]
    pub(crate) request_timeout: NonZeroU64,

    #[serde(default = "default_retry_attempts")]
    pub(crate) retry_attempts: NonZeroU32,

    #[serde(default = "default_retry_backoff")]
    pub(crate) retry_backoff: u64,

    // UI settings
    #[serde(default)]
    pub(crate) verbose: bool,

    #[serde(default = "default_use_colors")]
    pub(crate) use_colors: bool,
}

fn default_request_timeout() -> NonZeroU64 {
    REQUEST_TIMEOUT_DEFAULT
}
fn default_retry_attempts() -> NonZeroU32 {
    RETRY_ATTEMPTS_DEFAULT
}
fn default_retry_backoff() -> u64 {
    RETRY_BACKOFF_DEFAULT
}
fn default_use_colors() -> bool {
    USE_COLORS_DEFAULT
}

impl AppConfig {
    #[must_use]
    pub fn rest_url(&self) -> Option<&str> {
        self.rest_url.as_deref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub fn command_directory(&self) -> &PathBuf {
        &self.command_directory
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout.get())
    }

    #[must_use]
    pub fn retry_attempts(&self) -> NonZeroU32 {
        self.retry_attempts
    }

    #[must_use]
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_secs(self.retry_backoff)
    }

    #[must_use]
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    #[must_use]
    pub fn use_colors(&self) -> bool {
        self.use_colors
    }

    pub fn rest_url_mut(&mut self) -> &mut Option<String> {
        &mut self.rest_url
    }

    pub fn token_mut(&mut self) -> &mut Option<String> {
        &mut self.token
    }

    pub fn verbose_mut(&mut self) -> &mut bool {
        &mut self.verbose
    }

    pub fn use_colors_mut(&mut self) -> &mut bool {
        &mut self.use_colors
    }
}

/// Builder pattern for `AppConfig` testing
///
#[derive(Default, Debug)]
pub struct AppConfigBuilder {
    rest_url: Option<String>,
    token: Option<String>,
    command_directory: PathBuf,
    request_timeout: Option<NonZeroU64>,
    retry_attempts: Option<NonZeroU32>,
    retry_backoff: Option<u64>,
    verbose: Option<bool>,
    use_colors: Option<bool>,
}

impl AppConfigBuilder {
    #[must_use]
    pub fn rest_url(mut self, rest_url: &str) -> Self {
        self.rest_url = Some(rest_url.to_string());
        self
    }

    #[must_use]
    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    #[must_use]
    pub fn command_directory<D>(mut self, command_directory: D) -> Self
    where
        D: AsRef<std::ffi::OsStr>,
    {
        self.command_directory = PathBuf::from(command_directory.as_ref());
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: NonZeroU64) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn retry_attempts(mut self, attempts: NonZeroU32) -> Self {
        self.retry_attempts = Some(attempts);
        self
    }

    #[must_use]
    pub fn retry_backoff_secs(mut self, backoff: u64) -> Self {
        self.retry_backoff = Some(backoff);
        self
    }

    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    #[must_use]
    pub fn use_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = Some(use_colors);
        self
    }

    #[must_use]
    pub fn build(self) -> AppConfig {
        AppConfig {
            rest_url: self.rest_url,
            token: self.token,
            command_directory: self.command_directory,
            request_timeout: self.request_timeout.unwrap_or(REQUEST_TIMEOUT_DEFAULT),
            retry_attempts: self.retry_attempts.unwrap_or(RETRY_ATTEMPTS_DEFAULT),
            retry_backoff: self.retry_backoff.unwrap_or(RETRY_BACKOFF_DEFAULT),
            verbose: self.verbose.unwrap_or(VERBOSE_DEFAULT),
            use_colors: self.use_colors.unwrap_or(USE_COLORS_DEFAULT),
        }
    }
}
