//! Service creation helpers to eliminate service setup duplication in tests.

use chrono::FixedOffset;
use hostcli::service::CommandService;

use crate::transport::RecordingTransport;

/// The UTC offset as a fixed time zone, so time conversions are deterministic.
#[must_use]
pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Creates a command service over `transport` that renders times in UTC.
#[must_use]
pub fn create_test_service(
    transport: RecordingTransport,
) -> CommandService<RecordingTransport, FixedOffset> {
    CommandService::with_timezone(transport, utc())
}
