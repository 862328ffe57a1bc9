//! Common test constants used across multiple test files.

/// REST URL used when no server is actually contacted
pub const TEST_REST_URL: &str = "http://localhost:61200";

/// Token used by tests that exercise authenticated sessions
pub const TEST_TOKEN: &str = "test-token";

/// Default test command directory path
pub const TEST_COMMAND_DIR: &str = "/tmp/test-commands";

/// Resource prefix of the sample alarm commands
pub const ALARM_PREFIX: &str = "fm/v1/";
