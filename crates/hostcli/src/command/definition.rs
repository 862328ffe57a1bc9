//! On-disk shape of command definition files
//!
//! Each YAML file is a command group: a field map shared by a list of commands.
//!
//! ```yaml
//! resource_prefix: "fm/v1/"
//! fields:
//!   name: { display: Name, help: Alarm name }
//!   severity: { display: Severity, help: Alarm severity, values: [critical, major] }
//!   detailed: { help: Show all details }
//! commands:
//!   - name: alarm list
//!     mode: list
//!     operation: get
//!     endpoint: alarms
//!     arguments: [name, severity, detailed]
//!     columns: [name, severity]
//! ```

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    field::{FieldDescriptor, FieldMap},
};

use super::{CommandSpec, DefaultSort, DisplayMode, Operation};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommandGroupDefinition {
    #[serde(default)]
    pub resource_prefix: String,

    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,

    #[serde(default)]
    pub commands: Vec<CommandDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandDefinition {
    pub name: String,

    #[serde(default)]
    pub help: Option<String>,

    #[serde(default = "default_mode")]
    pub mode: DisplayMode,

    #[serde(default = "default_operation")]
    pub operation: Operation,

    pub endpoint: String,

    #[serde(default)]
    pub arguments: Vec<String>,

    #[serde(default)]
    pub positional_count: Option<usize>,

    #[serde(default)]
    pub mandatory_positional: bool,

    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub detailed_columns: Vec<String>,

    #[serde(default)]
    pub use_body: bool,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub default_sort: Option<DefaultSort>,
}

fn default_mode() -> DisplayMode {
    DisplayMode::List
}

fn default_operation() -> Operation {
    Operation::Get
}

impl CommandGroupDefinition {
    /// Build the field map and every command spec of this group
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found in the field map or any command.
    pub fn into_specs(self) -> Result<Vec<CommandSpec>, ConfigurationError> {
        let fields = Arc::new(FieldMap::new(self.fields.into_iter().map(
            |(key, mut descriptor)| {
                descriptor.key = key;
                descriptor
            },
        ))?);

        self.commands
            .into_iter()
            .map(|command| {
                CommandSpec::builder(&command.name, Arc::clone(&fields))
                    .maybe_help(command.help)
                    .mode(command.mode)
                    .operation(command.operation)
                    .endpoint(&command.endpoint)
                    .resource_prefix(&self.resource_prefix)
                    .arguments(command.arguments)
                    .maybe_positional_count(command.positional_count)
                    .mandatory_positional(command.mandatory_positional)
                    .columns(command.columns)
                    .detailed_columns(command.detailed_columns)
                    .use_body(command.use_body)
                    .maybe_message(command.message)
                    .maybe_default_sort(command.default_sort)
                    .build()
            })
            .collect()
    }
}
