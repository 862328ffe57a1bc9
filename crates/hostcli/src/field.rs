//! Field metadata
//!
//! A [`FieldDescriptor`] describes one attribute a command can accept as an argument or show
//! as a column: how it is displayed, its help text, its default and which values it accepts.
//! A [`FieldMap`] is the immutable set of descriptors a group of commands shares.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Sentinel meaning "no filter, no explicit choice"
pub const ALL: &str = "all";

/// Switch that adds the detail-only columns to the output
pub const DETAILED: &str = "detailed";

/// Switch that keeps time values in UTC instead of converting them to local time
pub const UTC: &str = "utc";

/// Sort-expression argument
pub const SORT: &str = "sort";

/// Raw column-filter argument (display names, possibly repeated and comma-separated)
pub const COLUMNS: &str = "columns";

/// Resolved column filter (field keys joined with commas)
pub const FIELDS: &str = "fields";

/// Column holding record timestamps
pub const TIME: &str = "time";

/// Start of a time-range filter
pub const STARTTIME: &str = "starttime";

/// End of a time-range filter
pub const ENDTIME: &str = "endtime";

/// Metadata for a single displayable or filterable attribute
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(skip)]
    pub(crate) key: String,

    /// Column header and the name users refer to in sort and column expressions
    ///
    #[serde(default)]
    pub(crate) display: Option<String>,

    pub(crate) help: String,

    #[serde(default)]
    pub(crate) default: Option<String>,

    /// Allowed values, where a comma-separated combination of them is also accepted
    ///
    #[serde(default)]
    pub(crate) values: Option<Vec<String>>,

    /// Allowed values for single-valued arguments
    ///
    #[serde(default)]
    pub(crate) choices: Option<Vec<String>>,

    #[serde(default)]
    pub(crate) detail: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(key: &str, display: &str, help: &str) -> Self {
        Self {
            key: key.to_string(),
            display: Some(display.to_string()),
            help: help.to_string(),
            default: None,
            values: None,
            choices: None,
            detail: false,
        }
    }

    /// A descriptor without a display name, as used by switch fields
    ///
    #[must_use]
    pub fn switch(key: &str, help: &str) -> Self {
        Self {
            display: None,
            ..Self::new(key, "", help)
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }

    #[must_use]
    pub fn with_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.values = Some(values.into_iter().map(|v| v.to_string()).collect());
        self
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.choices = Some(choices.into_iter().map(|c| c.to_string()).collect());
        self
    }

    #[must_use]
    pub fn detail(mut self) -> Self {
        self.detail = true;
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display name, falling back to the key for fields that declare none
    ///
    #[must_use]
    pub fn display(&self) -> &str {
        self.display.as_deref().unwrap_or(&self.key)
    }

    #[must_use]
    pub fn help(&self) -> &str {
        &self.help
    }

    /// The default value, or the [`ALL`] sentinel
    ///
    #[must_use]
    pub fn default_value(&self) -> &str {
        self.default.as_deref().unwrap_or(ALL)
    }

    #[must_use]
    pub fn values(&self) -> Option<&[String]> {
        self.values.as_deref()
    }

    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    #[must_use]
    pub fn is_detail(&self) -> bool {
        self.detail
    }
}

/// The immutable set of field descriptors a command group shares
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl FieldMap {
    /// Build a field map, rejecting display names used by more than one field
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::DuplicateDisplayName`] when two descriptors share a
    /// display name, since reverse lookups by display name would be ambiguous.
    pub fn new<I>(descriptors: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = FieldDescriptor>,
    {
        let mut fields = BTreeMap::new();
        let mut displays: BTreeMap<String, String> = BTreeMap::new();

        for descriptor in descriptors {
            if let Some(display) = descriptor.display.as_ref() {
                if let Some(first) = displays.get(display) {
                    return Err(ConfigurationError::DuplicateDisplayName {
                        display: display.clone(),
                        first: first.clone(),
                        second: descriptor.key.clone(),
                    });
                }
                displays.insert(display.clone(), descriptor.key.clone());
            }
            fields.insert(descriptor.key.clone(), descriptor);
        }

        Ok(Self { fields })
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Look up a descriptor that `command` depends on
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingField`] if `key` has no descriptor.
    pub fn require(&self, command: &str, key: &str) -> Result<&FieldDescriptor, ConfigurationError> {
        self.fields
            .get(key)
            .ok_or_else(|| ConfigurationError::MissingField {
                command: command.to_string(),
                key: key.to_string(),
            })
    }

    /// Display name of `key`, or the key itself when it has no descriptor
    ///
    #[must_use]
    pub fn display<'a>(&'a self, key: &'a str) -> &'a str {
        self.fields.get(key).map_or(key, FieldDescriptor::display)
    }

    /// Resolve a display name back to its field key
    ///
    #[must_use]
    pub fn key_by_display(&self, display: &str) -> Option<&str> {
        self.fields
            .values()
            .find(|descriptor| descriptor.display.as_deref() == Some(display))
            .map(FieldDescriptor::key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> FieldMap {
        FieldMap::new([
            FieldDescriptor::new("name", "Name", "Node name"),
            FieldDescriptor::new("severity", "Severity", "Alarm severity")
                .with_values(["critical", "major", "minor"]),
            FieldDescriptor::switch(DETAILED, "Show all details"),
        ])
        .unwrap()
    }

    #[test]
    fn test_key_by_display_resolves_known_names() {
        let fields = sample_fields();

        assert_eq!(fields.key_by_display("Name"), Some("name"));
        assert_eq!(fields.key_by_display("Severity"), Some("severity"));
        assert_eq!(fields.key_by_display("Missing"), None);
    }

    #[test]
    fn test_switch_fields_are_not_resolvable_by_key() {
        let fields = sample_fields();

        assert_eq!(fields.key_by_display(DETAILED), None);
        assert_eq!(fields.display(DETAILED), DETAILED);
    }

    #[test]
    fn test_default_value_falls_back_to_all() {
        let fields = sample_fields();
        let name = fields.get("name").unwrap();

        assert_eq!(name.default_value(), ALL);
        assert_eq!(
            name.clone().with_default("node-1").default_value(),
            "node-1"
        );
    }

    #[test]
    fn test_require_reports_command_and_key() {
        let fields = sample_fields();

        let err = fields.require("alarm list", "missing").unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingField {
                command: "alarm list".to_string(),
                key: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_display_names_are_rejected() {
        let result = FieldMap::new([
            FieldDescriptor::new("name", "Name", "first"),
            FieldDescriptor::new("hostname", "Name", "second"),
        ]);

        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateDisplayName { ref display, .. }) if display == "Name"
        ));
    }
}
