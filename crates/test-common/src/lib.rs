//! Common test utilities shared across all hostcli crates.
//!
//! This crate provides standardized test helpers to eliminate code duplication
//! while maintaining test clarity and ergonomics.

pub mod config;
pub mod constants;
pub mod fixtures;
pub mod service;
pub mod specs;
pub mod transport;

// Re-export the most commonly used items for convenience
pub use config::{test_config, test_config_with_dir, test_config_with_url};
pub use constants::*;
pub use fixtures::{
    create_command_file, create_config_dir, create_invalid_command_file, write_alarm_commands,
};
pub use service::{create_test_service, utc};
pub use specs::{alarm_clear_spec, alarm_fields, alarm_list_spec, alarm_show_spec};
pub use transport::{RecordingTransport, envelope_error, envelope_ok};

// Re-export commonly used external dependencies for convenience
pub use hostcli::{args::ParsedArguments, config::AppConfigBuilder};
pub use tempfile::TempDir;
