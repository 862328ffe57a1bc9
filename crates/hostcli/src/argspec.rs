//! Parameter schemas derived from command specifications
//!
//! An [`ArgumentSchema`] is the parser-agnostic description of a command's command-line
//! surface. The CLI maps each [`ParamSpec`] onto a clap argument; the library never depends
//! on the parsing framework itself.

use crate::{
    command::CommandSpec,
    error::ConfigurationError,
    field::{COLUMNS, DETAILED, SORT, UTC},
};

/// Flags the CLI defines itself, which command fields must not shadow
pub const RESERVED_FLAGS: &[&str] = &[
    "help",
    "version",
    "verbose",
    "no-color",
    "format",
    "rest-url",
    "token",
    "column",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A positional parameter, optional unless `required`
    Positional { required: bool },

    /// A named `--key VALUE` parameter
    Option,

    /// A named `--key` flag without a value
    Switch,

    /// The repeatable `-c/--column` display-name filter
    ColumnFilter,
}

/// One parameter of a command's schema
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub(crate) key: String,
    pub(crate) kind: ParamKind,
    pub(crate) value_name: String,
    pub(crate) help: String,
    pub(crate) default: Option<String>,
    pub(crate) choices: Option<Vec<String>>,
}

impl ParamSpec {
    /// The field key the parsed value is stored under
    ///
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    #[must_use]
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    #[must_use]
    pub fn default(&self) -> Option<&str> {
        self.default.as_deref()
    }

    /// Single-value choices the parser itself may enforce
    ///
    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }
}

/// Ordered parameter list for one command: positionals first, then named parameters
///
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentSchema {
    params: Vec<ParamSpec>,
}

impl ArgumentSchema {
    /// Derive the schema of `spec`
    ///
    /// Multi-value hints (`values`) only go into the help text; membership is checked by
    /// [`crate::validate::ParameterValidator`], since comma-joined combinations are valid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingField`] if a referenced field has no descriptor.
    pub fn build(spec: &CommandSpec) -> Result<Self, ConfigurationError> {
        let command = spec.name();
        let fields = spec.fields();
        let mut params = Vec::with_capacity(spec.arguments().len() + 1);

        for key in spec.positional_arguments() {
            let descriptor = fields.require(&command, key)?;
            let required = spec.mandatory_positional();

            params.push(ParamSpec {
                key: key.clone(),
                kind: ParamKind::Positional { required },
                value_name: key.to_uppercase(),
                help: descriptor.help().to_string(),
                default: (!required).then(|| descriptor.default_value().to_string()),
                choices: None,
            });
        }

        for key in spec.named_arguments() {
            let descriptor = fields.require(&command, key)?;

            if key == DETAILED || key == UTC {
                params.push(ParamSpec {
                    key: key.clone(),
                    kind: ParamKind::Switch,
                    value_name: String::new(),
                    help: descriptor.help().to_string(),
                    default: None,
                    choices: None,
                });
                continue;
            }

            let mut default = descriptor.default_value().to_string();
            let hint = if key == SORT {
                if let Some(default_sort) = spec.default_sort() {
                    default = format!(
                        "{}:{}",
                        fields.display(&default_sort.field),
                        default_sort.direction
                    );
                }
                let sortable: Vec<&str> = spec
                    .columns()
                    .iter()
                    .map(|column| fields.display(column))
                    .collect();
                format!(" [{}]", sortable.join(","))
            } else if let Some(values) = descriptor.values() {
                format!(" [{}]", values.join(","))
            } else {
                String::new()
            };

            params.push(ParamSpec {
                key: key.clone(),
                kind: ParamKind::Option,
                value_name: key.to_uppercase(),
                help: format!("{}{hint}", descriptor.help()),
                default: Some(default),
                choices: descriptor.choices().map(<[String]>::to_vec),
            });
        }

        if let Some(key) = spec.column_filter_key() {
            params.push(ParamSpec {
                key: key.to_string(),
                kind: ParamKind::ColumnFilter,
                value_name: "COLUMN".to_string(),
                help: "Columns to show, by display name (repeatable, comma-separated)"
                    .to_string(),
                default: None,
                choices: None,
            });
        }

        Ok(Self { params })
    }

    #[must_use]
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params.iter()
    }

    /// Whether the schema carries the column filter parameter
    ///
    #[must_use]
    pub fn has_column_filter(&self) -> bool {
        self.get(COLUMNS).is_some()
    }
}
