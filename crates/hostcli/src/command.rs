//! Command specifications
//!
//! A [`CommandSpec`] is the immutable description of one CLI sub-command: which REST
//! operation it performs, which fields it takes as arguments, which columns it shows and
//! how its output is displayed. Specs are built once when command definitions are loaded
//! and are never mutated while a command runs.

pub mod builder;
pub mod definition;
pub mod port;
pub mod repository;

pub use builder::CommandSpecBuilder;
pub use definition::{CommandDefinition, CommandGroupDefinition};
pub use port::{CommandListError, CommandRepository, DefinitionError, LoadCommandsOutput};
pub use repository::YamlCommandRepository;

use std::{fmt, str::FromStr, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    error::ValidationError,
    field::{COLUMNS, FieldMap, SORT},
};

/// HTTP operations a command can perform
///
/// Unknown operation names are rejected when definitions are parsed, never at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("get"),
            Self::Post => f.write_str("post"),
            Self::Put => f.write_str("put"),
            Self::Patch => f.write_str("patch"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// How a command presents the backend response
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// A table with one row per record
    List,

    /// One structured record (the last of the selected ones)
    #[serde(rename = "show")]
    ShowOne,

    /// No records; an optional success message built from the response
    Action,
}

impl DisplayMode {
    /// List and show-one commands accept the column filter
    ///
    #[must_use]
    pub fn shows_records(self) -> bool {
        matches!(self, Self::List | Self::ShowOne)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Sort applied when the user does not give one
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultSort {
    pub field: String,
    #[serde(default = "default_sort_direction")]
    pub direction: SortDirection,
}

fn default_sort_direction() -> SortDirection {
    SortDirection::Asc
}

/// Immutable description of one sub-command
///
#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub(crate) name: Vec<String>,
    pub(crate) help: Option<String>,
    pub(crate) mode: DisplayMode,
    pub(crate) operation: Operation,
    pub(crate) endpoint: String,
    pub(crate) resource_prefix: String,
    pub(crate) arguments: Vec<String>,
    pub(crate) positional_count: usize,
    pub(crate) mandatory_positional: bool,
    pub(crate) columns: Vec<String>,
    pub(crate) detailed_columns: Vec<String>,
    pub(crate) use_body: bool,
    pub(crate) message: Option<String>,
    pub(crate) default_sort: Option<DefaultSort>,
    pub(crate) fields: Arc<FieldMap>,
}

impl CommandSpec {
    #[must_use]
    pub fn builder(name: &str, fields: Arc<FieldMap>) -> CommandSpecBuilder {
        CommandSpecBuilder::new(name, fields)
    }

    /// The command name as typed on the command line, e.g. `alarm list`
    ///
    #[must_use]
    pub fn name(&self) -> String {
        self.name.join(" ")
    }

    #[must_use]
    pub fn name_words(&self) -> &[String] {
        &self.name
    }

    #[must_use]
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[must_use]
    pub fn resource_prefix(&self) -> &str {
        &self.resource_prefix
    }

    /// Request path: resource prefix followed by the endpoint
    ///
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}{}", self.resource_prefix, self.endpoint)
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    #[must_use]
    pub fn has_argument(&self, key: &str) -> bool {
        self.arguments.iter().any(|a| a == key)
    }

    #[must_use]
    pub fn positional_arguments(&self) -> &[String] {
        &self.arguments[..self.positional_count]
    }

    #[must_use]
    pub fn named_arguments(&self) -> &[String] {
        &self.arguments[self.positional_count..]
    }

    #[must_use]
    pub fn mandatory_positional(&self) -> bool {
        self.mandatory_positional
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn detailed_columns(&self) -> &[String] {
        &self.detailed_columns
    }

    #[must_use]
    pub fn use_body(&self) -> bool {
        self.use_body
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn default_sort(&self) -> Option<&DefaultSort> {
        self.default_sort.as_ref()
    }

    #[must_use]
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    #[must_use]
    pub fn accepts_column_filter(&self) -> bool {
        self.mode.shows_records()
    }

    #[must_use]
    pub fn accepts_sort(&self) -> bool {
        self.has_argument(SORT)
    }

    /// Parse a sort expression into `(field key, direction)` pairs, most significant first
    ///
    /// The expression is a comma-separated list of `<display name>[:asc|:desc]` tokens.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownColumn`] for display names without a field and
    /// [`ValidationError::InvalidSortDirection`] for directions other than asc/desc.
    pub fn parse_sort_expression(
        &self,
        expression: &str,
    ) -> Result<Vec<(String, SortDirection)>, ValidationError> {
        expression
            .split(',')
            .map(|token| {
                let (display, direction) = match token.split_once(':') {
                    Some((display, direction)) => (display, Some(direction)),
                    None => (token, None),
                };

                let key = self
                    .fields
                    .key_by_display(display)
                    .ok_or_else(|| ValidationError::UnknownColumn(display.to_string()))?;

                let direction = match direction {
                    None => SortDirection::Asc,
                    Some(direction) => direction.parse().map_err(|()| {
                        ValidationError::InvalidSortDirection {
                            column: display.to_string(),
                            direction: direction.to_string(),
                        }
                    })?,
                };

                Ok((key.to_string(), direction))
            })
            .collect()
    }

    /// Resolve a display name from the column filter to its field key
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownColumn`] if no field has that display name.
    pub fn column_key(&self, display: &str) -> Result<&str, ValidationError> {
        self.fields
            .key_by_display(display)
            .ok_or_else(|| ValidationError::UnknownColumn(display.to_string()))
    }

    /// Key under which the raw column filter is parsed, if the command has one
    ///
    #[must_use]
    pub fn column_filter_key(&self) -> Option<&'static str> {
        self.accepts_column_filter().then_some(COLUMNS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, TIME};

    fn sortable_spec() -> CommandSpec {
        let fields = FieldMap::new([
            FieldDescriptor::new("name", "Name", "Alarm name"),
            FieldDescriptor::new(TIME, "Time", "Alarm time"),
            FieldDescriptor::new(SORT, "Sort", "Sort expression"),
        ])
        .unwrap();

        CommandSpec::builder("alarm list", Arc::new(fields))
            .arguments([SORT])
            .positional_count(0)
            .columns(["name", TIME])
            .build()
            .unwrap()
    }

    #[test]
    fn test_parse_sort_expression_defaults_to_ascending() {
        let spec = sortable_spec();

        let keys = spec.parse_sort_expression("Time,Name:desc").unwrap();

        assert_eq!(
            keys,
            vec![
                (TIME.to_string(), SortDirection::Asc),
                ("name".to_string(), SortDirection::Desc),
            ]
        );
    }

    #[test]
    fn test_parse_sort_expression_accepts_any_case() {
        let spec = sortable_spec();

        let keys = spec.parse_sort_expression("Name:DESC").unwrap();

        assert_eq!(keys, vec![("name".to_string(), SortDirection::Desc)]);
    }

    #[test]
    fn test_parse_sort_expression_rejects_unknown_column() {
        let spec = sortable_spec();

        let err = spec.parse_sort_expression("Severity").unwrap_err();

        assert_eq!(err, ValidationError::UnknownColumn("Severity".to_string()));
        assert_eq!(err.to_string(), "No column named Severity");
    }

    #[test]
    fn test_parse_sort_expression_rejects_bad_direction() {
        let spec = sortable_spec();

        let err = spec.parse_sort_expression("Name:sideways").unwrap_err();

        assert!(matches!(err, ValidationError::InvalidSortDirection { .. }));
    }

    #[test]
    fn test_path_joins_prefix_and_endpoint() {
        let spec = CommandSpec::builder("node list", Arc::new(FieldMap::default()))
            .resource_prefix("has/v1/")
            .endpoint("nodes")
            .build()
            .unwrap();

        assert_eq!(spec.path(), "has/v1/nodes");
        assert_eq!(spec.name(), "node list");
        assert_eq!(spec.name_words(), ["node", "list"]);
    }

    #[test]
    fn test_operation_deserializes_lowercase_only_known_names() {
        let op: Operation = serde_yaml::from_str("patch").unwrap();
        assert_eq!(op, Operation::Patch);

        assert!(serde_yaml::from_str::<Operation>("options").is_err());
    }
}
