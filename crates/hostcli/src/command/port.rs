//! Command repository port and error types
//!
//! The [`CommandRepository`] trait abstracts where command definitions come from, so the
//! CLI can be driven by YAML files on disk in production and by in-memory specs in tests.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use thiserror::Error;

use crate::{
    error::ConfigurationError,
    validation::{ValidationErrorCategory, ValidationIssue},
};

use super::CommandSpec;

/// Port for loading command definitions (Hexagonal Architecture)
///
#[cfg_attr(any(test, feature = "with_mocks"), mockall::automock)]
pub trait CommandRepository: Send + Sync {
    /// Load every command definition the repository knows about
    ///
    /// Files that fail to parse or build are reported alongside the valid commands so
    /// one broken file does not hide the rest.
    ///
    /// # Errors
    ///
    /// Returns [`CommandListError`] if the command directory is missing or unreadable.
    fn load_commands(&self) -> Result<LoadCommandsOutput, CommandListError>;
}

/// Errors that prevent listing command definitions at all
///
#[derive(Error, Debug, Clone)]
pub enum CommandListError {
    #[error("IO error reading command definitions: {0}")]
    IoError(#[from] Arc<std::io::Error>),

    #[error("Command directory does not exist: {}", _0.display())]
    CommandDirectoryNotFound(PathBuf),
}

/// A single definition file that could not be turned into command specs
///
#[derive(Error, Debug, Clone)]
pub enum DefinitionError {
    #[error("YAML parsing error reading command file `{}`: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: Arc<serde_yaml::Error>,
    },

    #[error("File system error reading command file `{}`: {source_message}", path.display())]
    FileSystemError { path: PathBuf, source_message: String },

    #[error("Invalid command definition in `{}`: {source}", path.display())]
    Configuration {
        path: PathBuf,
        #[source]
        source: ConfigurationError,
    },
}

impl DefinitionError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::YamlParse { path, .. }
            | Self::FileSystemError { path, .. }
            | Self::Configuration { path, .. } => path,
        }
    }

    /// Describe this failure as a validation issue for `config validate`
    ///
    #[must_use]
    pub fn to_issue(&self) -> ValidationIssue {
        let (message, suggestion) = match self {
            Self::YamlParse { source, .. } => (
                source.to_string(),
                "Check that the file is valid YAML with `fields` and `commands` sections",
            ),
            Self::FileSystemError { source_message, .. } => (
                source_message.clone(),
                "Check that the file exists and is readable",
            ),
            Self::Configuration { source, .. } => (
                source.to_string(),
                "Declare every referenced field under `fields` and keep command names unique",
            ),
        };

        ValidationIssue::error(
            ValidationErrorCategory::Definition,
            &self.path().display().to_string(),
            &message,
            Some(suggestion),
        )
    }
}

/// Result of loading all command definitions
///
#[derive(Debug, Clone, Default)]
pub struct LoadCommandsOutput {
    pub(crate) commands: Vec<CommandSpec>,
    pub(crate) invalid: Vec<DefinitionError>,
}

impl LoadCommandsOutput {
    #[must_use]
    pub fn new(commands: Vec<CommandSpec>, invalid: Vec<DefinitionError>) -> Self {
        Self { commands, invalid }
    }

    #[must_use]
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    #[must_use]
    pub fn into_commands(self) -> Vec<CommandSpec> {
        self.commands
    }

    #[must_use]
    pub fn invalid(&self) -> &[DefinitionError] {
        &self.invalid
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name() == name)
    }
}
