//! Time parsing and formatting utilities

use chrono::{NaiveDateTime, TimeDelta};

use crate::error::{StitchError, StitchResult};

/// Format accepted for interval boundaries on the command line
pub const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INPUT_FORMAT_ISO: &str = "%Y-%m-%dT%H:%M:%S";

/// Time parser for wall-clock timestamps
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse `YYYY-MM-DD HH:MM:SS` (a `T` separator is accepted too)
    pub fn parse_timestamp(&self, time_str: &str) -> StitchResult<NaiveDateTime> {
        let time_str = time_str.trim();

        NaiveDateTime::parse_from_str(time_str, INPUT_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(time_str, INPUT_FORMAT_ISO))
            .map_err(|_| StitchError::InvalidTimeFormat {
                time: time_str.to_string(),
            })
    }

    /// Format a timestamp the same way it is accepted
    pub fn format_timestamp(&self, timestamp: &NaiveDateTime) -> String {
        timestamp.format(INPUT_FORMAT).to_string()
    }

    /// Format seconds to HH:MM:SS.ms string
    pub fn format_time(&self, seconds: f64) -> String {
        let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_ms / 3_600_000;
        let minutes = (total_ms % 3_600_000) / 60_000;
        let secs = (total_ms % 60_000) / 1000;
        let milliseconds = total_ms % 1000;

        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    }
}

/// Signed number of seconds from `from` to `to`, microsecond precision
pub fn seconds_between(from: &NaiveDateTime, to: &NaiveDateTime) -> f64 {
    let delta = to.signed_duration_since(*from);
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

/// Shift a timestamp by a number of seconds, `None` on overflow
pub fn add_seconds(timestamp: &NaiveDateTime, seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let micros = (seconds * 1_000_000.0).round();
    if micros.abs() >= i64::MAX as f64 {
        return None;
    }
    timestamp.checked_add_signed(TimeDelta::microseconds(micros as i64))
}

/// Render seconds the way the encoder expects them on its command line
pub fn format_encoder_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}
