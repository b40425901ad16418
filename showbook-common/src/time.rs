//! Show time utilities
//!
//! Show start times are stored as UTC naive timestamps with whole-second
//! precision, so that their text form sorts chronologically in SQLite.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::{Error, Result};

/// Display format for show start times, e.g. `May 21 2035 - 21:30:00`
pub const SHOW_TIME_FORMAT: &str = "%B %d %Y - %H:%M:%S";

/// Accepted submission formats, tried in order after RFC 3339
const INPUT_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Current UTC instant truncated to whole seconds
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc().trunc_subsecs(0)
}

/// Format a start time for display
pub fn format_show_time(start_time: NaiveDateTime) -> String {
    start_time.format(SHOW_TIME_FORMAT).to_string()
}

/// Parse a submitted start time
///
/// RFC 3339 input is converted to UTC; naive input is taken as UTC.
pub fn parse_start_time(field: &str, raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc).naive_utc().trunc_subsecs(0));
    }

    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.trunc_subsecs(0))
        .ok_or_else(|| {
            Error::malformed(field, format!("'{}' is not a valid date and time", raw))
        })
}

/// Past/upcoming classification of a show relative to "now"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowTiming {
    Past,
    Upcoming,
}

impl ShowTiming {
    /// Past iff the show started strictly before `now`
    pub fn classify(start_time: NaiveDateTime, now: NaiveDateTime) -> Self {
        if start_time < now {
            ShowTiming::Past
        } else {
            ShowTiming::Upcoming
        }
    }
}
