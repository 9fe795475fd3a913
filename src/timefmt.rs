//! Date and time helpers.
//!
//! Movements store their calendar date and their "HH:mm" time of day as two
//! separate fields. These helpers combine them into one timestamp, measure the
//! minutes between two timestamps and render durations for reports.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use crate::error::{ParkingError, ParkingResult};
use crate::validation::TIME_FORMAT;

/// Parse a stored "HH:mm" time of day.
pub fn parse_time(time: &str) -> ParkingResult<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), TIME_FORMAT)
        .map_err(|e| ParkingError::validation("time", format!("invalid time '{}': {}", time, e)))
}

/// Combine a stored date and a stored "HH:mm" time into one timestamp.
pub fn combine(date: NaiveDate, time: &str) -> ParkingResult<NaiveDateTime> {
    Ok(date.and_time(parse_time(time)?))
}

/// Hour of day (0-23) of a stored "HH:mm" time.
pub fn hour_of(time: &str) -> ParkingResult<u32> {
    Ok(parse_time(time)?.hour())
}

/// Whole minutes from `start` to `end`. Negative when `end` precedes `start`.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes()
}

/// Format a minute count as "<H>h <M>m".
pub fn format_duration(minutes: i64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Format a stay the way the exit form shows it.
///
/// "2 días, 3 horas y 05 minutos" for stays of a day or more,
/// "3 horas y 05 minutos" otherwise.
pub fn format_stay(minutes: i64) -> String {
    if minutes < 0 {
        return "Error en cálculo".to_string();
    }
    let days = minutes / (24 * 60);
    let hours = (minutes % (24 * 60)) / 60;
    let mins = minutes % 60;
    if days > 0 {
        format!("{} días, {} horas y {:02} minutos", days, hours, mins)
    } else {
        format!("{} horas y {:02} minutos", hours, mins)
    }
}
