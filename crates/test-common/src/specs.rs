//! Sample field maps and command specs modelled on an alarm-management backend.

use std::sync::Arc;

use crate::constants::ALARM_PREFIX;
use hostcli::{
    command::{CommandSpec, DisplayMode, Operation},
    field::{DETAILED, ENDTIME, FieldDescriptor, FieldMap, SORT, STARTTIME, TIME, UTC},
};

/// The field map shared by every sample alarm command.
#[must_use]
pub fn alarm_fields() -> Arc<FieldMap> {
    Arc::new(
        FieldMap::new([
            FieldDescriptor::new("name", "Name", "Alarm name"),
            FieldDescriptor::new("id", "Id", "Alarm id"),
            FieldDescriptor::new(TIME, "Time", "Time the alarm was raised"),
            FieldDescriptor::new("severity", "Severity", "Alarm severity")
                .with_values(["critical", "major", "minor"]),
            FieldDescriptor::new("text", "Text", "Alarm text").detail(),
            FieldDescriptor::new(STARTTIME, "Start", "Only alarms raised after this time"),
            FieldDescriptor::new(ENDTIME, "End", "Only alarms raised before this time"),
            FieldDescriptor::switch(DETAILED, "Show all details"),
            FieldDescriptor::switch(UTC, "Show times in UTC"),
            FieldDescriptor::new(SORT, "Sort", "Sort order"),
        ])
        .unwrap(),
    )
}

/// `alarm list`: query-string filters, time range, sort and detail columns.
#[must_use]
pub fn alarm_list_spec() -> CommandSpec {
    CommandSpec::builder("alarm list", alarm_fields())
        .help("List alarms")
        .mode(DisplayMode::List)
        .operation(Operation::Get)
        .resource_prefix(ALARM_PREFIX)
        .endpoint("alarms")
        .arguments(["severity", STARTTIME, ENDTIME, DETAILED, UTC, SORT])
        .positional_count(0)
        .columns(["name", TIME, "severity"])
        .detailed_columns(["text"])
        .build()
        .unwrap()
}

/// `alarm show NAME`: show-one mode with an optional positional.
#[must_use]
pub fn alarm_show_spec() -> CommandSpec {
    CommandSpec::builder("alarm show", alarm_fields())
        .help("Show one alarm")
        .mode(DisplayMode::ShowOne)
        .resource_prefix(ALARM_PREFIX)
        .endpoint("alarm")
        .arguments(["name", UTC])
        .columns(["name", TIME, "severity", "text"])
        .build()
        .unwrap()
}

/// `alarm clear NAME`: an action sent as a JSON body with a templated message.
#[must_use]
pub fn alarm_clear_spec() -> CommandSpec {
    CommandSpec::builder("alarm clear", alarm_fields())
        .help("Clear an alarm")
        .mode(DisplayMode::Action)
        .operation(Operation::Delete)
        .resource_prefix(ALARM_PREFIX)
        .endpoint("alarms")
        .arguments(["name"])
        .mandatory_positional(true)
        .use_body(true)
        .message("Cleared ##name")
        .build()
        .unwrap()
}
