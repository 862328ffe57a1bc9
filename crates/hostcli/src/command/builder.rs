use std::sync::Arc;

use crate::{
    argspec::RESERVED_FLAGS,
    error::ConfigurationError,
    field::{COLUMNS, DETAILED, FIELDS, FieldMap, SORT, UTC},
};

use super::{CommandSpec, DefaultSort, DisplayMode, Operation, SortDirection};

/// Fluent constructor for [`CommandSpec`]
///
/// [`CommandSpecBuilder::build`] is the single place where command metadata is checked
/// against its field map, so a spec that exists is always consistent.
#[derive(Debug, Clone)]
pub struct CommandSpecBuilder {
    name: String,
    help: Option<String>,
    mode: DisplayMode,
    operation: Operation,
    endpoint: String,
    resource_prefix: String,
    arguments: Vec<String>,
    positional_count: Option<usize>,
    mandatory_positional: bool,
    columns: Vec<String>,
    detailed_columns: Vec<String>,
    use_body: bool,
    message: Option<String>,
    default_sort: Option<DefaultSort>,
    fields: Arc<FieldMap>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: ToString,
{
    items.into_iter().map(|s| s.to_string()).collect()
}

impl CommandSpecBuilder {
    #[must_use]
    pub fn new(name: &str, fields: Arc<FieldMap>) -> Self {
        Self {
            name: name.to_string(),
            help: None,
            mode: DisplayMode::List,
            operation: Operation::Get,
            endpoint: String::new(),
            resource_prefix: String::new(),
            arguments: Vec::new(),
            positional_count: None,
            mandatory_positional: false,
            columns: Vec::new(),
            detailed_columns: Vec::new(),
            use_body: false,
            message: None,
            default_sort: None,
            fields,
        }
    }

    #[must_use]
    pub fn help(mut self, help: &str) -> Self {
        self.help = Some(help.to_string());
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    #[must_use]
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    #[must_use]
    pub fn resource_prefix(mut self, prefix: &str) -> Self {
        self.resource_prefix = prefix.to_string();
        self
    }

    #[must_use]
    pub fn arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.arguments = owned(arguments);
        self
    }

    /// Number of leading arguments that are positional
    ///
    /// Defaults to one when the command has arguments, zero otherwise.
    #[must_use]
    pub fn positional_count(mut self, count: usize) -> Self {
        self.positional_count = Some(count);
        self
    }

    #[must_use]
    pub fn mandatory_positional(mut self, mandatory: bool) -> Self {
        self.mandatory_positional = mandatory;
        self
    }

    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.columns = owned(columns);
        self
    }

    #[must_use]
    pub fn detailed_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.detailed_columns = owned(columns);
        self
    }

    #[must_use]
    pub fn use_body(mut self, use_body: bool) -> Self {
        self.use_body = use_body;
        self
    }

    #[must_use]
    pub fn message(mut self, message: &str) -> Self {
        self.message = Some(message.to_string());
        self
    }

    #[must_use]
    pub fn default_sort(mut self, field: &str, direction: SortDirection) -> Self {
        self.default_sort = Some(DefaultSort {
            field: field.to_string(),
            direction,
        });
        self
    }

    pub(crate) fn maybe_default_sort(mut self, default_sort: Option<DefaultSort>) -> Self {
        self.default_sort = default_sort;
        self
    }

    pub(crate) fn maybe_positional_count(mut self, count: Option<usize>) -> Self {
        self.positional_count = count;
        self
    }

    pub(crate) fn maybe_help(mut self, help: Option<String>) -> Self {
        self.help = help;
        self
    }

    pub(crate) fn maybe_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    /// Check the metadata and produce the immutable spec
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when:
    /// - the name has no words
    /// - an argument, column, detail column or the default sort field has no descriptor
    /// - more positional arguments are declared than there are arguments
    /// - a switch, sort or filter field is declared positional
    /// - an argument key clashes with a global CLI flag or the column filter
    pub fn build(self) -> Result<CommandSpec, ConfigurationError> {
        let name: Vec<String> = self.name.split_whitespace().map(String::from).collect();
        if name.is_empty() {
            return Err(ConfigurationError::EmptyCommandName);
        }
        let command = name.join(" ");

        for key in self
            .arguments
            .iter()
            .chain(&self.columns)
            .chain(&self.detailed_columns)
        {
            self.fields.require(&command, key)?;
        }

        if let Some(default_sort) = &self.default_sort {
            self.fields.require(&command, &default_sort.field)?;
        }

        for key in &self.arguments {
            if key == COLUMNS || key == FIELDS {
                return Err(ConfigurationError::ReservedArgument {
                    command,
                    key: key.clone(),
                    flag: "column".to_string(),
                });
            }
            let flag_name = key.replace('_', "-");
            if let Some(flag) = RESERVED_FLAGS.iter().find(|flag| **flag == flag_name) {
                return Err(ConfigurationError::ReservedArgument {
                    command,
                    key: key.clone(),
                    flag: (*flag).to_string(),
                });
            }
        }

        let positional_count = self
            .positional_count
            .unwrap_or_else(|| self.arguments.len().min(1));

        if positional_count > self.arguments.len() {
            return Err(ConfigurationError::PositionalCountExceeded {
                command,
                count: positional_count,
                available: self.arguments.len(),
            });
        }

        if let Some(key) = self.arguments[..positional_count]
            .iter()
            .find(|key| [DETAILED, UTC, SORT].contains(&key.as_str()))
        {
            return Err(ConfigurationError::InvalidPositional {
                command,
                key: key.clone(),
            });
        }

        Ok(CommandSpec {
            name,
            help: self.help,
            mode: self.mode,
            operation: self.operation,
            endpoint: self.endpoint,
            resource_prefix: self.resource_prefix,
            arguments: self.arguments,
            positional_count,
            mandatory_positional: self.mandatory_positional,
            columns: self.columns,
            detailed_columns: self.detailed_columns,
            use_body: self.use_body,
            message: self.message,
            default_sort: self.default_sort,
            fields: self.fields,
        })
    }
}
