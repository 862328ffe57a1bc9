//! Shaping response records into displayable rows
//!
//! [`ResultProjector`] selects the columns to show, orders the records and materializes one
//! [`ProjectedRow`] per record. Show-one commands turn the result into a
//! [`RecordProjection`], which keeps only the last record as the final value.

use std::cmp::Ordering;

use chrono::{Local, TimeZone};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    args::ParsedArguments,
    command::{CommandSpec, SortDirection},
    error::{LookupError, ValidationError},
    field::{ALL, DETAILED, FIELDS, SORT, TIME, UTC},
    timezone,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// One record's values, in column order
///
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRow {
    pub key: String,
    pub values: Vec<Value>,
}

/// Header and ordered rows for a list
///
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Projection {
    pub(crate) header: Vec<String>,
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<ProjectedRow>,
}

impl Projection {
    /// Display names of the selected columns
    ///
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Field keys of the selected columns
    ///
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[ProjectedRow] {
        &self.rows
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Record keys in display order
    ///
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.key.as_str()).collect()
    }

    /// Convert into show-one form: every row but the last is an intermediate block
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NoRecords`] if there are no rows.
    pub fn into_record(mut self) -> Result<RecordProjection, LookupError> {
        let last = self.rows.pop().ok_or(LookupError::NoRecords)?;

        Ok(RecordProjection {
            header: self.header,
            intermediate: self.rows,
            last,
        })
    }

    /// Rows as JSON objects keyed by display name
    ///
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(
            self.rows
                .iter()
                .map(|row| row_to_json(&self.header, row))
                .collect(),
        )
    }
}

/// Show-one result
///
#[derive(Debug, Clone, PartialEq)]
pub struct RecordProjection {
    pub(crate) header: Vec<String>,
    pub(crate) intermediate: Vec<ProjectedRow>,
    pub(crate) last: ProjectedRow,
}

impl RecordProjection {
    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Records shown before the final one, in display order
    ///
    #[must_use]
    pub fn intermediate(&self) -> &[ProjectedRow] {
        &self.intermediate
    }

    /// The record returned as the command's result
    ///
    #[must_use]
    pub fn last(&self) -> &ProjectedRow {
        &self.last
    }

    /// The final record as a JSON object keyed by display name
    ///
    #[must_use]
    pub fn to_json(&self) -> Value {
        row_to_json(&self.header, &self.last)
    }

    #[must_use]
    pub fn intermediate_json(&self) -> Vec<Value> {
        self.intermediate
            .iter()
            .map(|row| row_to_json(&self.header, row))
            .collect()
    }
}

fn row_to_json(header: &[String], row: &ProjectedRow) -> Value {
    Value::Object(
        header
            .iter()
            .cloned()
            .zip(row.values.iter().cloned())
            .collect(),
    )
}

/// Text shown for a raw value: strings verbatim, null as empty, others as JSON
///
#[must_use]
pub fn display_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over JSON values used for sorting records
///
#[must_use]
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.total_cmp(&b)
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => {
            a.to_string().cmp(&b.to_string())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn record<'d>(data: &'d Map<String, Value>, key: &str) -> Result<&'d Map<String, Value>, LookupError> {
    data.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| LookupError::NotARecord(key.to_string()))
}

fn field<'d>(record: &'d Map<String, Value>, key: &str, field: &str) -> Result<&'d Value, LookupError> {
    record.get(field).ok_or_else(|| LookupError::MissingField {
        record: key.to_string(),
        field: field.to_string(),
    })
}

/// Shapes the `data` of a response for display
///
pub struct ResultProjector<'a, Tz = Local> {
    spec: &'a CommandSpec,
    tz: Tz,
}

impl<'a> ResultProjector<'a, Local> {
    #[must_use]
    pub fn new(spec: &'a CommandSpec) -> Self {
        Self { spec, tz: Local }
    }
}

impl<'a, Tz> ResultProjector<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    #[must_use]
    pub fn with_timezone(spec: &'a CommandSpec, tz: Tz) -> Self {
        Self { spec, tz }
    }

    /// Columns to show: the defaults, the detail columns under `--detailed`, narrowed by the
    /// resolved column filter
    ///
    /// The filter check is a substring test against the comma-joined filter string.
    #[must_use]
    pub fn select_columns(&self, args: &ParsedArguments) -> Vec<String> {
        let mut columns = self.spec.columns().to_vec();
        if args.switch(DETAILED) {
            columns.extend_from_slice(self.spec.detailed_columns());
        }

        let filter = args.text(FIELDS).unwrap_or(ALL);
        if filter != ALL {
            columns.retain(|column| filter.contains(column.as_str()));
        }

        columns
    }

    /// Record keys in display order
    ///
    /// Without a sort expression (or with [`ALL`]) the order of `data` is kept. Otherwise
    /// one stable sort pass is applied per sort key, least significant first.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] for a bad sort expression or a record that lacks a sort
    /// field.
    pub fn sorted_keys<'d>(
        &self,
        args: &ParsedArguments,
        data: &'d Map<String, Value>,
    ) -> Result<Vec<&'d str>, ProjectionError> {
        let mut keys: Vec<&str> = data.keys().map(String::as_str).collect();

        if !self.spec.accepts_sort() {
            return Ok(keys);
        }
        let expression = args.text(SORT).unwrap_or(ALL);
        if expression == ALL {
            return Ok(keys);
        }

        let sort_keys = self.spec.parse_sort_expression(expression)?;

        for (sort_field, direction) in sort_keys.iter().rev() {
            let mut decorated = keys
                .iter()
                .map(|key| {
                    let value = field(record(data, key)?, key, sort_field)?;
                    Ok((*key, value))
                })
                .collect::<Result<Vec<(&str, &Value)>, LookupError>>()?;

            decorated.sort_by(|(_, a), (_, b)| match direction {
                SortDirection::Asc => compare_values(a, b),
                SortDirection::Desc => compare_values(b, a),
            });

            keys = decorated.into_iter().map(|(key, _)| key).collect();
        }

        Ok(keys)
    }

    /// Produce the header and ordered rows for `data`
    ///
    /// # Errors
    ///
    /// Returns [`ProjectionError`] if sorting fails, a record lacks a selected column, or a
    /// time value cannot be converted.
    pub fn project(
        &self,
        args: &ParsedArguments,
        data: &Map<String, Value>,
    ) -> Result<Projection, ProjectionError> {
        let columns = self.select_columns(args);
        let header = columns
            .iter()
            .map(|column| self.spec.fields().display(column).to_string())
            .collect();
        let keep_utc = args.switch(UTC);

        let rows = self
            .sorted_keys(args, data)?
            .into_iter()
            .map(|key| {
                let record = record(data, key)?;
                let values = columns
                    .iter()
                    .map(|column| {
                        let value = field(record, key, column)?;
                        self.render(column, value, keep_utc)
                    })
                    .collect::<Result<Vec<_>, ProjectionError>>()?;

                Ok(ProjectedRow {
                    key: key.to_string(),
                    values,
                })
            })
            .collect::<Result<Vec<_>, ProjectionError>>()?;

        Ok(Projection {
            header,
            columns,
            rows,
        })
    }

    fn render(&self, column: &str, value: &Value, keep_utc: bool) -> Result<Value, ProjectionError> {
        match value {
            Value::String(text) if column == TIME && !keep_utc => Ok(Value::String(
                timezone::utc_to_local_in(text, &self.tz)?,
            )),
            other => Ok(other.clone()),
        }
    }
}
