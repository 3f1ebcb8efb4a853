//! Time utilities: parsing HH:MM, building instants, compact formatting.

use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Storage format for shift instants (viewer-local wall clock).
pub const DATETIME_FMT: &str = "%Y-%m-%d %H:%M";

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), DATETIME_FMT)
        .or_else(|_| NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

pub fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format(DATETIME_FMT).to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

/// Combine a date with start/end clock times. With `next_day` the end
/// instant is moved to the following calendar day.
pub fn shift_window(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    next_day: bool,
) -> (NaiveDateTime, NaiveDateTime) {
    let start_dt = date.and_time(start);
    let mut end_dt = date.and_time(end);
    if next_day {
        end_dt += Duration::days(1);
    }
    (start_dt, end_dt)
}

/// Compact "start-end" label, e.g. `9-17` or `6:30-14:30`.
pub fn compact_range(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    let (s, e) = (start.time(), end.time());
    if s.minute() == 0 && e.minute() == 0 {
        format!("{}-{}", s.hour(), e.hour())
    } else {
        format!("{}:{:02}-{}:{:02}", s.hour(), s.minute(), e.hour(), e.minute())
    }
}
