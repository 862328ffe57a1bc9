pub mod yaml;

pub use self::yaml::Yaml;

use std::path::PathBuf;

use thiserror::Error;

use crate::{config::AppConfig, fs::FileSystemError};

/// Port for loading configuration
///
#[cfg_attr(test, mockall::automock)]
pub trait ConfigLoader: Send + Sync {
    /// Load configuration from the config directory and the environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigLoadError`] if the config directory is unknown, more than one
    /// config file exists, or the settings cannot be parsed.
    fn load_config(&self) -> Result<AppConfig, ConfigLoadError>;

    /// Find existing configuration file paths
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError`] if the config directory cannot be determined.
    fn find_config_file_paths(&self) -> Result<Vec<PathBuf>, FileSystemError>;
}

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    FileSystemError(#[from] FileSystemError),

    #[error("Multiple configuration files found: {}", .0.join(", "))]
    MultipleFound(Vec<String>),

    #[error(transparent)]
    ConfigError(#[from] ::config::ConfigError),
}

/// Applies runtime CLI arguments on top of the configuration read from file and environment
///
pub trait ApplyToConfig {
    /// Return `config` with every argument the user passed applied over it
    ///
    fn apply_to_config(&self, config: AppConfig) -> AppConfig;
}
