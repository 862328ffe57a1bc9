//! Error taxonomy shared by the command pipeline
//!
//! Each stage of an invocation fails with its own error type so callers can tell a broken
//! command definition apart from bad user input or a failed backend call. [`CommandError`]
//! is the umbrella the [`crate::service::CommandService`] returns.

use thiserror::Error;

use crate::{message::MessageError, project::ProjectionError, rest::DispatchError};

/// Problems in command or field metadata, detected when specs are built
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Field `{key}` referenced by `{command}` has no descriptor")]
    MissingField { command: String, key: String },

    #[error("Display name `{display}` is used by both `{first}` and `{second}`")]
    DuplicateDisplayName {
        display: String,
        first: String,
        second: String,
    },

    #[error(
        "Command `{command}` declares {count} positional argument(s) but has only {available} argument(s)"
    )]
    PositionalCountExceeded {
        command: String,
        count: usize,
        available: usize,
    },

    #[error("Field `{key}` of `{command}` cannot be a positional argument")]
    InvalidPositional { command: String, key: String },

    #[error("Field `{key}` of `{command}` clashes with the built-in `--{flag}` flag")]
    ReservedArgument {
        command: String,
        key: String,
        flag: String,
    },

    #[error("Command name must contain at least one word")]
    EmptyCommandName,

    #[error("Command `{0}` is defined more than once")]
    DuplicateCommand(String),

    #[error("Command `{0}` overlaps with command `{1}`")]
    OverlappingCommand(String, String),

    #[error("Command `{0}` collides with a built-in command")]
    ReservedCommand(String),
}

/// Problems with user-supplied arguments, raised before any request is sent
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{value} is not supported by {field} argument")]
    UnsupportedValue { value: String, field: String },

    #[error("Datetime format ({0}) is not supported")]
    DatetimeFormat(String),

    #[error("Datetime ({0}) does not exist in the local timezone")]
    NonexistentLocalTime(String),

    #[error("No column named {0}")]
    UnknownColumn(String),

    #[error("Sort direction ({direction}) of {column} is not supported, use asc or desc")]
    InvalidSortDirection { column: String, direction: String },
}

/// A response record lacks something the command needs to display it
///
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Record `{record}` has no field `{field}`")]
    MissingField { record: String, field: String },

    #[error("Record `{0}` is not an object")]
    NotARecord(String),

    #[error("No records returned")]
    NoRecords,
}

/// Everything that can fail while executing one command invocation
///
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Message(#[from] MessageError),
}

impl From<ProjectionError> for CommandError {
    fn from(error: ProjectionError) -> Self {
        match error {
            ProjectionError::Validation(e) => Self::Validation(e),
            ProjectionError::Lookup(e) => Self::Lookup(e),
        }
    }
}
