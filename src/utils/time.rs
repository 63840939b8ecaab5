//! Time utilities: parsing HH:MM, clock arithmetic between session start/end
//! and the hours of a session.

use crate::errors::{AppError, AppResult};
use chrono::{NaiveTime, Timelike};

const MINUTES_PER_DAY: i64 = 24 * 60;

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}

pub fn parse_optional_time(input: Option<&String>) -> AppResult<Option<NaiveTime>> {
    if let Some(s) = input {
        let t = parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))?;
        Ok(Some(t))
    } else {
        Ok(None)
    }
}

pub fn minutes_of_day(t: NaiveTime) -> i64 {
    (t.hour() * 60 + t.minute()) as i64
}

/// Round to one decimal place.
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Hours from `start` to `end`, rounded to one decimal.
///
/// An `end` that is not after `start` is read as crossing midnight, so
/// `22:00 → 01:00` is 3.0 and equal times give a full 24.0.
pub fn hours_between(start: NaiveTime, end: NaiveTime) -> f64 {
    let mut diff = minutes_of_day(end) - minutes_of_day(start);
    if diff <= 0 {
        diff += MINUTES_PER_DAY;
    }
    round1(diff as f64 / 60.0)
}

/// End time reached `hours` after `start`, wrapped into a single 24h cycle.
pub fn end_from_hours(start: NaiveTime, hours: f64) -> AppResult<NaiveTime> {
    if !hours.is_finite() || hours < 0.0 {
        return Err(AppError::InvalidNumber(hours.to_string()));
    }

    let added = (hours * 60.0).round() as i64;
    let total = (minutes_of_day(start) + added).rem_euclid(MINUTES_PER_DAY);

    NaiveTime::from_hms_opt((total / 60) as u32, (total % 60) as u32, 0)
        .ok_or_else(|| AppError::InvalidTime(format!("{} + {}h", format_time(start), hours)))
}
