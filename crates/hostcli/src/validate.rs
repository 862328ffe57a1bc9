//! Normalization and validation of parsed arguments before dispatch

use std::collections::BTreeSet;

use chrono::{Local, TimeZone};
use tracing::debug;

use crate::{
    args::ParsedArguments,
    command::CommandSpec,
    error::ValidationError,
    field::{ALL, COLUMNS, ENDTIME, FIELDS, SORT, STARTTIME},
    timezone,
};

/// Normalizes one invocation's arguments in place
///
/// Runs, in order: local-to-UTC conversion of the time-range fields, column-filter
/// resolution into the canonical [`FIELDS`] string, the sort expression check and the
/// allowed-value check.
pub struct ParameterValidator<'a, Tz = Local> {
    spec: &'a CommandSpec,
    tz: Tz,
}

impl<'a> ParameterValidator<'a, Local> {
    #[must_use]
    pub fn new(spec: &'a CommandSpec) -> Self {
        Self { spec, tz: Local }
    }
}

impl<'a, Tz: TimeZone> ParameterValidator<'a, Tz> {
    #[must_use]
    pub fn with_timezone(spec: &'a CommandSpec, tz: Tz) -> Self {
        Self { spec, tz }
    }

    /// Normalize `args` in place
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found; `args` may be partially normalized then.
    pub fn validate(&self, args: &mut ParsedArguments) -> Result<(), ValidationError> {
        self.convert_time_range(args)?;
        self.resolve_column_filter(args)?;
        self.check_sort_expression(args)?;
        self.check_allowed_values(args)?;

        debug!("Validated arguments for `{}`: {:?}", self.spec.name(), args);
        Ok(())
    }

    fn convert_time_range(&self, args: &mut ParsedArguments) -> Result<(), ValidationError> {
        for key in [STARTTIME, ENDTIME] {
            if !self.spec.has_argument(key) {
                continue;
            }
            if let Some(value) = args.text(key) {
                let converted = timezone::local_to_utc_in(value, &self.tz)?;
                args.insert(key, converted);
            }
        }
        Ok(())
    }

    fn resolve_column_filter(&self, args: &mut ParsedArguments) -> Result<(), ValidationError> {
        let fields = {
            let selected: BTreeSet<&str> = args
                .values(COLUMNS)
                .into_iter()
                .flat_map(|raw| raw.split(','))
                .map(str::trim)
                .filter(|display| !display.is_empty())
                .collect();

            if selected.is_empty() {
                ALL.to_string()
            } else {
                let keys = selected
                    .into_iter()
                    .map(|display| self.spec.column_key(display))
                    .collect::<Result<BTreeSet<&str>, _>>()?;
                keys.into_iter().collect::<Vec<_>>().join(",")
            }
        };

        args.insert(FIELDS, fields);
        Ok(())
    }

    fn check_sort_expression(&self, args: &ParsedArguments) -> Result<(), ValidationError> {
        if !self.spec.accepts_sort() {
            return Ok(());
        }
        match args.text(SORT) {
            Some(expression) if expression != ALL => {
                self.spec.parse_sort_expression(expression).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn check_allowed_values(&self, args: &ParsedArguments) -> Result<(), ValidationError> {
        for key in self.spec.arguments() {
            let Some(value) = args.text(key) else {
                continue;
            };
            if value == ALL {
                continue;
            }
            let Some(allowed) = self.spec.fields().get(key).and_then(|d| d.values()) else {
                continue;
            };

            if let Some(token) = value.split(',').find(|token| !allowed.iter().any(|a| a == token)) {
                return Err(ValidationError::UnsupportedValue {
                    value: token.to_string(),
                    field: key.clone(),
                });
            }
        }
        Ok(())
    }
}
