use hostcli::{
    config::AppConfig,
    validation::{ValidationErrorCategory, ValidationIssue},
};
use tracing::info;

use crate::{
    commands::LoadedCommands, tables::ValidationTableReporter,
    terminal_reporter::TerminalReporter,
};

/// Issues found while loading the command directory
///
fn command_issues(loaded: &LoadedCommands) -> Vec<ValidationIssue> {
    match loaded {
        Ok(output) => output.invalid().iter().map(|e| e.to_issue()).collect(),
        Err(e) => vec![ValidationIssue::error(
            ValidationErrorCategory::PathFormat,
            "command_directory",
            &e.to_string(),
            Some("Create the directory or point `command_directory` at an existing one"),
        )],
    }
}

pub(crate) fn handle_validate(
    original_config: &AppConfig,
    loaded: &LoadedCommands,
    reporter: TerminalReporter,
) -> i32 {
    info!("Validating configuration");

    let mut result = original_config.validate();
    result.extend(command_issues(loaded));

    if result.issues().has_errors() {
        reporter.report_error("Validation failed.");

        ValidationTableReporter::new()
            .add_validation_errors(&result.issues().errors(), reporter)
            .add_validation_warnings(&result.issues().warnings(), reporter)
            .print();
        1
    } else if result.issues().has_warnings() {
        ValidationTableReporter::new()
            .add_validation_warnings(&result.issues().warnings(), reporter)
            .print();
        0
    } else {
        reporter.report_success("Configuration is valid.");

        0
    }
}
