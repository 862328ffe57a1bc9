//! `AppConfig` test helpers to eliminate duplication across CLI command tests.

use crate::constants::{TEST_COMMAND_DIR, TEST_REST_URL};
use hostcli::config::{AppConfig, AppConfigBuilder};
use std::path::Path;

/// Creates a standard test configuration with colors disabled.
/// This is the most commonly used config in CLI command tests.
#[must_use]
pub fn test_config() -> AppConfig {
    test_config_with_url(TEST_REST_URL)
}

/// Creates a test configuration pointing at a specific backend, e.g. a mock server.
/// Retries on 502 happen without sleeping.
#[must_use]
pub fn test_config_with_url(rest_url: &str) -> AppConfig {
    AppConfigBuilder::default()
        .rest_url(rest_url)
        .command_directory(TEST_COMMAND_DIR)
        .retry_backoff_secs(0)
        .use_colors(false)
        .build()
}

/// Creates a test configuration with a specific command directory.
/// Used primarily in integration tests with temporary directories.
#[must_use]
pub fn test_config_with_dir<P: AsRef<Path>>(command_dir: P) -> AppConfig {
    AppConfigBuilder::default()
        .rest_url(TEST_REST_URL)
        .command_directory(command_dir.as_ref())
        .use_colors(false)
        .build()
}
