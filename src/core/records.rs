//! Record store: add/delete on the in-memory collection plus the month
//! filter and the two orderings used by listings and exports.

use crate::core::state::{AppState, next_id};
use crate::core::summary::month_key;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRecord, Record};
use std::cmp::Ordering;

impl AppState {
    /// Assign id and salary, then prepend (newest-created first).
    pub fn add_record(&mut self, input: NewRecord) -> Record {
        let id = next_id(self.records.iter().map(|r| r.id));
        let record = input.into_record(id);
        self.records.insert(0, record.clone());
        record
    }

    /// Remove the record with `id`. Returns `false` when nothing matched.
    pub fn delete_record(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn record(&self, id: i64) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }
}

/// Entry-point checks for a new record. Times are only compared when both
/// were typed by the user; template times keep the midnight wrap.
pub fn validate_new_record(input: &NewRecord, user_times: bool) -> AppResult<()> {
    if input.course_name.trim().is_empty() {
        return Err(AppError::MissingField("course"));
    }
    if !input.hours.is_finite() || input.hours < 0.0 {
        return Err(AppError::InvalidNumber(input.hours.to_string()));
    }
    if !input.rate.is_finite() || input.rate < 0.0 {
        return Err(AppError::InvalidNumber(input.rate.to_string()));
    }
    if user_times
        && let (Some(start), Some(end)) = (input.start_time, input.end_time)
        && end <= start
    {
        return Err(AppError::Validation(
            "End time must be later than start time.".into(),
        ));
    }
    Ok(())
}

/// Records whose date falls in `month` (`YYYY-MM`), or all of them.
pub fn filtered_by_month<'a>(records: &'a [Record], month: Option<&str>) -> Vec<&'a Record> {
    match month {
        Some(m) => records.iter().filter(|r| month_key(&r.date) == m).collect(),
        None => records.iter().collect(),
    }
}

fn chronological(a: &Record, b: &Record) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| a.sort_time().cmp(&b.sort_time()))
}

/// Newest date first, later start first on the same day.
pub fn sorted_descending<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a Record> {
    let mut out: Vec<&Record> = records.into_iter().collect();
    out.sort_by(|a, b| chronological(b, a));
    out
}

/// Oldest date first, earlier start first on the same day.
pub fn sorted_ascending<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<&'a Record> {
    let mut out: Vec<&Record> = records.into_iter().collect();
    out.sort_by(|a, b| chronological(a, b));
    out
}
