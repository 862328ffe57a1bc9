//! Conversion between local wall-clock strings and canonical UTC timestamps
//!
//! Canonical UTC is ISO-8601 with millisecond precision and a trailing `Z`
//! (`2022-01-01T10:00:00.000Z`). Local display drops the offset and uses a space
//! separator (`2022-01-01 12:00:00.000`). Both directions are generic over the time zone
//! so they can be exercised against fixed offsets.

use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::{error::ValidationError, field::ALL};

const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Accepted timestamp patterns, most precise first
const DATETIME_PATTERNS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];
const DATE_PATTERN: &str = "%Y-%m-%d";

/// Longest input that still fits microsecond precision
const MAX_INPUT_LEN: usize = 26;

fn truncate(value: &str) -> &str {
    value
        .char_indices()
        .nth(MAX_INPUT_LEN)
        .map_or(value, |(end, _)| &value[..end])
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    DATETIME_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(value, pattern).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, DATE_PATTERN)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Convert a local wall-clock string in the system time zone to canonical UTC
///
/// # Errors
///
/// See [`local_to_utc_in`].
pub fn local_to_utc(value: &str) -> Result<String, ValidationError> {
    local_to_utc_in(value, &Local)
}

/// Convert a wall-clock string in `tz` to canonical UTC
///
/// The [`ALL`] sentinel and values ending in `Z` are returned unchanged. A space between
/// date and time is accepted in place of `T`. Ambiguous local times resolve to the earlier
/// instant.
///
/// # Errors
///
/// Returns [`ValidationError::DatetimeFormat`] if no pattern matches and
/// [`ValidationError::NonexistentLocalTime`] for wall-clock times skipped by a transition.
pub fn local_to_utc_in<Tz: TimeZone>(value: &str, tz: &Tz) -> Result<String, ValidationError> {
    if value == ALL || value.ends_with('Z') {
        return Ok(value.to_string());
    }

    let normalized = value.replace(' ', "T");
    let naive = parse_naive(truncate(&normalized))
        .ok_or_else(|| ValidationError::DatetimeFormat(value.to_string()))?;

    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| ValidationError::NonexistentLocalTime(value.to_string()))?;

    Ok(local.with_timezone(&Utc).format(UTC_FORMAT).to_string())
}

/// Convert a UTC timestamp to a wall-clock string in the system time zone
///
/// # Errors
///
/// See [`utc_to_local_in`].
pub fn utc_to_local(value: &str) -> Result<String, ValidationError> {
    utc_to_local_in(value, &Local)
}

/// Convert a UTC timestamp (with or without the trailing `Z`) to a wall-clock string in `tz`
///
/// # Errors
///
/// Returns [`ValidationError::DatetimeFormat`] if the value matches no accepted pattern.
pub fn utc_to_local_in<Tz>(value: &str, tz: &Tz) -> Result<String, ValidationError>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if value == ALL {
        return Ok(value.to_string());
    }

    let stripped = value.replace('Z', "");
    let naive = parse_naive(truncate(&stripped))
        .ok_or_else(|| ValidationError::DatetimeFormat(value.to_string()))?;

    let local: DateTime<Tz> = Utc.from_utc_datetime(&naive).with_timezone(tz);
    Ok(local.format(LOCAL_FORMAT).to_string())
}
