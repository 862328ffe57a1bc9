use hostcli::{
    command::Operation,
    error::{CommandError, LookupError, ValidationError},
    field::{ALL, COLUMNS, DETAILED, ENDTIME, SORT, STARTTIME, UTC},
    rest::DispatchError,
    service::CommandOutcome,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_common::{
    ParsedArguments, RecordingTransport, alarm_clear_spec, alarm_list_spec, alarm_show_spec,
    create_test_service, envelope_error, envelope_ok,
};

/// Arguments as the command line produces them when no flag is given.
fn list_defaults() -> ParsedArguments {
    ParsedArguments::new()
        .with("severity", ALL)
        .with(STARTTIME, ALL)
        .with(ENDTIME, ALL)
        .with(DETAILED, false)
        .with(UTC, false)
        .with(SORT, ALL)
        .with(COLUMNS, Vec::<String>::new())
}

#[tokio::test]
async fn test_start_time_is_sent_as_utc() {
    let transport = RecordingTransport::new().with_envelope(envelope_ok(json!({})));
    let service = create_test_service(transport.clone());

    service
        .execute(
            &alarm_list_spec(),
            list_defaults().with(STARTTIME, "2024-01-01T00:00"),
        )
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].operation, Operation::Get);
    assert_eq!(requests[0].path, "fm/v1/alarms");
    assert_eq!(
        requests[0].query,
        Some(vec![(
            STARTTIME.to_string(),
            "2024-01-01T00:00:00.000Z".to_string()
        )])
    );
}

#[tokio::test]
async fn test_application_error_is_reported_with_description() {
    let transport = RecordingTransport::new().with_envelope(envelope_error(1, "bad request"));
    let service = create_test_service(transport);

    let err = service
        .execute(&alarm_list_spec(), list_defaults())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CommandError::Dispatch(DispatchError::Application(_))
    ));
    assert_eq!(err.to_string(), "bad request");
}

#[tokio::test]
async fn test_rows_are_sorted_by_time() {
    let transport = RecordingTransport::new().with_envelope(envelope_ok(json!({
        "a": {"name": "disk", "time": "2024-01-02T00:00:00.000Z", "severity": "major"},
        "b": {"name": "fan", "time": "2024-01-01T00:00:00.000Z", "severity": "minor"},
    })));
    let service = create_test_service(transport.clone());

    let outcome = service
        .execute(&alarm_list_spec(), list_defaults().with(SORT, "Time:asc"))
        .await
        .unwrap();

    let CommandOutcome::List { projection, .. } = outcome else {
        panic!("expected a list outcome");
    };
    assert_eq!(projection.keys(), vec!["b", "a"]);
    assert_eq!(projection.header(), ["Name", "Time", "Severity"]);
    assert_eq!(projection.rows()[0].values[1], json!("2024-01-01 00:00:00.000"));

    assert_eq!(
        transport.requests()[0].query,
        Some(vec![(SORT.to_string(), "Time:asc".to_string())])
    );
}

#[tokio::test]
async fn test_detailed_and_column_filter_shape_the_table() {
    let transport = RecordingTransport::new().with_envelope(envelope_ok(json!({
        "a": {"name": "disk", "time": "2024-01-02T00:00:00.000Z", "severity": "major", "text": "Disk full"},
    })));
    let service = create_test_service(transport.clone());

    let outcome = service
        .execute(
            &alarm_list_spec(),
            list_defaults()
                .with(DETAILED, true)
                .with(UTC, true)
                .with(COLUMNS, vec!["Text,Time".to_string(), "Name".to_string()]),
        )
        .await
        .unwrap();

    let CommandOutcome::List { projection, .. } = outcome else {
        panic!("expected a list outcome");
    };
    assert_eq!(projection.columns(), ["name", "time", "text"]);
    assert_eq!(
        projection.to_json(),
        json!([{"Name": "disk", "Time": "2024-01-02T00:00:00.000Z", "Text": "Disk full"}])
    );
    assert_eq!(
        transport.requests()[0].query,
        Some(vec![
            ("detailed".to_string(), "true".to_string()),
            ("fields".to_string(), "name,text,time".to_string()),
            ("utc".to_string(), "true".to_string()),
        ])
    );
}

#[tokio::test]
async fn test_unknown_sort_column_never_reaches_the_backend() {
    let transport = RecordingTransport::new();
    let service = create_test_service(transport.clone());

    let err = service
        .execute(&alarm_list_spec(), list_defaults().with(SORT, "Bogus"))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "No column named Bogus");
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_unknown_severity_never_reaches_the_backend() {
    let transport = RecordingTransport::new();
    let service = create_test_service(transport.clone());

    let err = service
        .execute(&alarm_list_spec(), list_defaults().with("severity", "mild"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        ValidationError::UnsupportedValue {
            value: "mild".to_string(),
            field: "severity".to_string(),
        }
        .to_string()
    );
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_show_returns_last_record() {
    let transport = RecordingTransport::new().with_envelope(envelope_ok(json!({
        "first": {"name": "disk", "time": "2024-01-02T00:00:00.000Z", "severity": "major", "text": "Disk full"},
        "second": {"name": "fan", "time": "2024-01-01T00:00:00.000Z", "severity": "minor", "text": "Fan slow"},
    })));
    let service = create_test_service(transport);

    let outcome = service
        .execute(
            &alarm_show_spec(),
            ParsedArguments::new()
                .with("name", ALL)
                .with(UTC, false)
                .with(COLUMNS, Vec::<String>::new()),
        )
        .await
        .unwrap();

    let CommandOutcome::Record { record, .. } = outcome else {
        panic!("expected a record outcome");
    };
    assert_eq!(record.last().key, "second");
    assert_eq!(record.intermediate().len(), 1);
    assert_eq!(record.to_json()["Text"], json!("Fan slow"));
}

#[tokio::test]
async fn test_show_without_records_fails() {
    let transport = RecordingTransport::new().with_envelope(envelope_ok(json!(null)));
    let service = create_test_service(transport);

    let err = service
        .execute(&alarm_show_spec(), ParsedArguments::new().with("name", "disk"))
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::Lookup(LookupError::NoRecords)));
}

#[tokio::test]
async fn test_action_message_reads_top_level_data_only() {
    let transport = RecordingTransport::new()
        .with_envelope(envelope_ok(json!({"name": "disk", "rec1": {"name": "nested"}})));
    let service = create_test_service(transport.clone());

    let outcome = service
        .execute(&alarm_clear_spec(), ParsedArguments::new().with("name", "disk"))
        .await
        .unwrap();

    assert_eq!(
        outcome,
        CommandOutcome::Message(Some("Cleared disk\n".to_string()))
    );

    let requests = transport.requests();
    assert_eq!(requests[0].operation, Operation::Delete);
    assert_eq!(requests[0].body, Some(json!({"name": "disk"})));
    assert_eq!(requests[0].query, None);
}

#[tokio::test]
async fn test_action_message_with_nested_value_only_fails() {
    let transport =
        RecordingTransport::new().with_envelope(envelope_ok(json!({"rec1": {"name": "disk"}})));
    let service = create_test_service(transport);

    let err = service
        .execute(&alarm_clear_spec(), ParsedArguments::new().with("name", "disk"))
        .await
        .unwrap_err();

    assert!(matches!(err, CommandError::Message(_)));
}

#[tokio::test]
async fn test_http_failure_reports_reason() {
    let transport = RecordingTransport::new().with_response(404, "Not Found", "");
    let service = create_test_service(transport);

    let err = service
        .execute(&alarm_list_spec(), list_defaults())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Request response is not OK (Not Found)");
}
