//! Parsed argument values for one command invocation

use std::collections::{BTreeMap, btree_map};

use crate::field::ALL;

/// A single parsed argument value
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// A single string value (possibly the [`ALL`] sentinel)
    Text(String),

    /// Repeated values, as collected for the column filter
    List(Vec<String>),

    /// A boolean switch
    Switch(bool),
}

impl ArgValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Whether the value carries information beyond its default
    ///
    /// The [`ALL`] sentinel, an unset switch and an empty list are all "no information".
    #[must_use]
    pub fn is_effective(&self) -> bool {
        match self {
            Self::Text(text) => text != ALL,
            Self::List(values) => !values.is_empty(),
            Self::Switch(on) => *on,
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Switch(value)
    }
}

impl From<Vec<String>> for ArgValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

/// Field key to value mapping produced by the argument parser
///
/// Normalized in place by [`crate::validate::ParameterValidator`] before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArguments(BTreeMap<String, ArgValue>);

impl ParsedArguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    ///
    #[must_use]
    pub fn with<V: Into<ArgValue>>(mut self, key: &str, value: V) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert<V: Into<ArgValue>>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ArgValue> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(ArgValue::as_text)
    }

    /// State of a switch; missing or non-switch values count as off
    ///
    #[must_use]
    pub fn switch(&self, key: &str) -> bool {
        matches!(self.0.get(key), Some(ArgValue::Switch(true)))
    }

    /// All raw values of `key`, whatever its shape
    ///
    #[must_use]
    pub fn values(&self, key: &str) -> Vec<&str> {
        match self.0.get(key) {
            Some(ArgValue::Text(text)) => vec![text.as_str()],
            Some(ArgValue::List(values)) => values.iter().map(String::as_str).collect(),
            Some(ArgValue::Switch(_)) | None => Vec::new(),
        }
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, ArgValue> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a ParsedArguments {
    type Item = (&'a String, &'a ArgValue);
    type IntoIter = btree_map::Iter<'a, String, ArgValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
