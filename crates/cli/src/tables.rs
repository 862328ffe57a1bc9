use comfy_table::{
    Cell, ContentArrangement, Row, Table, modifiers::UTF8_ROUND_CORNERS,
    presets::UTF8_FULL_CONDENSED,
};
use hostcli::validation::ValidationIssue;
use serde_json::Value;

use crate::{
    formatters::{format_key, format_value},
    terminal_reporter::TerminalReporter,
};

fn styled_table(header: Vec<Cell>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub(crate) struct ValidationTableReporter {
    table: Table,
}

impl ValidationTableReporter {
    pub(crate) fn new() -> Self {
        Self {
            table: styled_table(
                ["Category", "Field", "Message", "Suggestion"]
                    .into_iter()
                    .map(Cell::new)
                    .collect(),
            ),
        }
    }

    pub(crate) fn add_validation_errors(
        &mut self,
        error_issues: &[&ValidationIssue],
        reporter: TerminalReporter,
    ) -> &mut Self {
        for error in error_issues {
            self.add_issue(reporter.format_error(error.category()), error);
        }

        self
    }

    pub(crate) fn add_validation_warnings(
        &mut self,
        warning_issues: &[&ValidationIssue],
        reporter: TerminalReporter,
    ) -> &mut Self {
        for warning in warning_issues {
            self.add_issue(reporter.format_warning(warning.category()), warning);
        }

        self
    }

    fn add_issue(&mut self, category: String, issue: &ValidationIssue) {
        self.table.add_row(vec![
            category,
            issue.field().to_string(),
            issue.message().to_string(),
            issue
                .suggestion()
                .map(ToString::to_string)
                .unwrap_or_default(),
        ]);
    }

    pub(crate) fn print(&self) {
        eprintln!("{}", &self.table);
    }
}

/// Table of remote records: one header row of display names, then one row per record
///
pub(crate) struct RecordTableReporter {
    table: Table,
    use_colors: bool,
}

impl RecordTableReporter {
    pub(crate) fn new<S: AsRef<str>>(header: &[S], use_colors: bool) -> Self {
        Self {
            table: styled_table(
                header
                    .iter()
                    .map(|name| Cell::new(format_key(name.as_ref(), use_colors)))
                    .collect(),
            ),
            use_colors,
        }
    }

    /// A two-column table used to show a single record field by field
    ///
    pub(crate) fn field_value(use_colors: bool) -> Self {
        Self::new(&["Field", "Value"], use_colors)
    }

    pub(crate) fn add_values(&mut self, values: &[Value]) -> &mut Self {
        self.table
            .add_row(Row::from(values.iter().map(format_value).collect::<Vec<_>>()));
        self
    }

    pub(crate) fn add_field(&mut self, field: &str, value: &Value) -> &mut Self {
        self.table
            .add_row(vec![format_key(field, self.use_colors), format_value(value)]);
        self
    }

    pub(crate) fn print(&self) {
        println!("{}", &self.table);
    }
}
