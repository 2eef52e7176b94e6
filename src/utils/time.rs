//! Trade event timestamp handling
//!
//! Trade events carry second-precision strings such as `2023-01-05 10:00:00`.
//! Candle close times are the last millisecond of their interval, so a
//! minute candle closing at 10:00 has close time `10:00:00.999`. The join key
//! is the event time plus that fixed fraction, compared in epoch milliseconds.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::errors::PlotError;

/// Format of `buyTime`, `sellTime` and trailing stop times
pub const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Millisecond fraction every candle close time ends in
pub const CLOSE_TIME_FRACTION_MS: i64 = 999;

/// Parse an event timestamp as UTC
pub fn parse_event_time(value: &str) -> Result<DateTime<Utc>, PlotError> {
    let naive = NaiveDateTime::parse_from_str(value.trim(), EVENT_TIME_FORMAT).map_err(|e| {
        PlotError::Timestamp {
            value: value.to_string(),
            message: e.to_string(),
        }
    })?;
    Ok(DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc))
}

/// Candle close time matching an event timestamp
pub fn close_time_for_event(value: &str) -> Result<DateTime<Utc>, PlotError> {
    Ok(parse_event_time(value)? + Duration::milliseconds(CLOSE_TIME_FRACTION_MS))
}

/// Convert a close-time column value (epoch milliseconds)
pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(millis)
}
