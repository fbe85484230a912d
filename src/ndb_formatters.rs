// Time and delay formatting for departure rows
//
// Everything here is pure: timestamps come in as API strings, the clock comes
// in as epoch milliseconds, and nothing reads the system time.

use crate::ndb_models::{NDBError, Result};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::fmt;

/// Departure boards follow the sv-SE convention, so wall-clock times without
/// an offset are read as Swedish local time.
pub const DEFAULT_TZ: Tz = chrono_tz::Europe::Stockholm;

const SECONDS_PER_MINUTE: u64 = 60;
const DEPARTING_SOON_MS: i64 = 5 * 60 * 1000;

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

// ============================================================================
// Timestamp Parsing
// ============================================================================

pub fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    parse_timestamp_in(timestamp, DEFAULT_TZ)
}

/// Parse an API timestamp into an instant.
///
/// * RFC 3339 strings keep their own offset.
/// * Offset-less date-times are wall-clock time in `tz`; a time inside a DST
///   gap is pushed forward one hour.
/// * A bare date is midnight UTC.
pub fn parse_timestamp_in(timestamp: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let raw = timestamp.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return localize(naive, tz)
                .ok_or_else(|| NDBError::InvalidTimestamp(timestamp.to_string()));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }

    Err(NDBError::InvalidTimestamp(timestamp.to_string()))
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

// ============================================================================
// Clock Formatting
// ============================================================================

pub fn format_time(timestamp: &str) -> Result<String> {
    format_time_in(timestamp, DEFAULT_TZ)
}

/// 24-hour `HH:MM`, zero padded, no seconds.
pub fn format_time_in(timestamp: &str, tz: Tz) -> Result<String> {
    let instant = parse_timestamp_in(timestamp, tz)?;
    Ok(format_instant(instant, tz))
}

pub fn format_instant(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M").to_string()
}

// ============================================================================
// Delay
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DelayClass {
    OnTime,
    Delayed,
    Early,
}

impl DelayClass {
    pub fn as_str(self) -> &'static str {
        match self {
            DelayClass::OnTime => "on-time",
            DelayClass::Delayed => "delayed",
            DelayClass::Early => "early",
        }
    }
}

impl fmt::Display for DelayClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// "On time", or e.g. "1m 30s late" / "5s early". Zero components are left out.
pub fn get_delay(delay_seconds: i64) -> String {
    if delay_seconds == 0 {
        return "On time".to_string();
    }

    let abs_delay = delay_seconds.unsigned_abs();
    let minutes = abs_delay / SECONDS_PER_MINUTE;
    let seconds = abs_delay % SECONDS_PER_MINUTE;

    let mut parts = Vec::with_capacity(2);
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 {
        parts.push(format!("{}s", seconds));
    }

    let qualifier = if delay_seconds > 0 { "late" } else { "early" };
    format!("{} {}", parts.join(" "), qualifier)
}

pub fn get_delay_class(delay_seconds: i64) -> DelayClass {
    match delay_seconds {
        0 => DelayClass::OnTime,
        d if d > 0 => DelayClass::Delayed,
        _ => DelayClass::Early,
    }
}

// ============================================================================
// Countdown
// ============================================================================

pub fn get_minutes_until_departure(departure_time: &str, current_time_ms: i64) -> Result<String> {
    get_minutes_until_departure_in(departure_time, current_time_ms, DEFAULT_TZ)
}

/// Countdown such as "45s" or "3m 0s". Departures in the past read "0s".
pub fn get_minutes_until_departure_in(
    departure_time: &str,
    current_time_ms: i64,
    tz: Tz,
) -> Result<String> {
    let departure_ms = parse_timestamp_in(departure_time, tz)?.timestamp_millis();
    let diff_ms = departure_ms.saturating_sub(current_time_ms);

    // ceil(diff / 1000), clamped at zero
    let seconds_until = if diff_ms > 0 { diff_ms.saturating_add(999) / 1000 } else { 0 };
    let minutes = seconds_until / 60;
    let seconds = seconds_until % 60;

    if minutes == 0 {
        return Ok(format!("{}s", seconds));
    }
    Ok(format!("{}m {}s", minutes, seconds))
}

pub fn departs_within_5_minutes(departure_time: &str, current_time_ms: i64) -> Result<bool> {
    departs_within_5_minutes_in(departure_time, current_time_ms, DEFAULT_TZ)
}

/// No lower bound: a departure that already left also counts.
pub fn departs_within_5_minutes_in(
    departure_time: &str,
    current_time_ms: i64,
    tz: Tz,
) -> Result<bool> {
    let departure_ms = parse_timestamp_in(departure_time, tz)?.timestamp_millis();
    Ok(departure_ms.saturating_sub(current_time_ms) <= DEPARTING_SOON_MS)
}

pub fn get_actual_departure_time(scheduled_time: &str, delay_seconds: i64) -> Result<DateTime<Utc>> {
    get_actual_departure_time_in(scheduled_time, delay_seconds, DEFAULT_TZ)
}

pub fn get_actual_departure_time_in(
    scheduled_time: &str,
    delay_seconds: i64,
    tz: Tz,
) -> Result<DateTime<Utc>> {
    let scheduled = parse_timestamp_in(scheduled_time, tz)?;
    Duration::try_seconds(delay_seconds)
        .and_then(|delay| scheduled.checked_add_signed(delay))
        .ok_or(NDBError::DelayOutOfRange(delay_seconds))
}
