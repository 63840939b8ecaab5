//! One handler per subcommand. Handlers parse user input, call into
//! `core`, print the result and let the tracker finish pending uploads.

pub mod add;
pub mod backup;
pub mod calc;
pub mod class;
pub mod config;
pub mod db;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod preview;
pub mod show;
pub mod student;
pub mod summary;
pub mod sync;

use crate::core::selection::is_class_record;
use crate::core::state::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::Record;
use crate::utils::date::{current_month_key, parse_month};
use crate::utils::formatting::{dash_if_empty, hours, money_with, plain_number};
use crate::utils::table::{Column, Table};
use crate::utils::time::parse_time;
use chrono::NaiveTime;

/// `--month` value, or the current month when absent.
pub(crate) fn month_or_current(month: &Option<String>) -> AppResult<String> {
    match month {
        Some(m) => parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone())),
        None => Ok(current_month_key()),
    }
}

pub(crate) fn month_filter(month: &Option<String>) -> AppResult<Option<String>> {
    month
        .as_ref()
        .map(|m| parse_month(m).ok_or_else(|| AppError::InvalidMonth(m.clone())))
        .transpose()
}

pub(crate) fn required_time(s: &str) -> AppResult<NaiveTime> {
    parse_time(s).ok_or_else(|| AppError::InvalidTime(s.to_string()))
}

/// Session table used by `list` and `preview`.
pub(crate) fn record_table<'a>(
    state: &AppState,
    records: impl IntoIterator<Item = &'a Record>,
    currency: &str,
) -> Table {
    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Time"),
        Column::left("Name"),
        Column::left("Course"),
        Column::left("Type"),
        Column::right("Hours"),
        Column::right("Rate"),
        Column::right("Pay"),
    ]);

    for r in records {
        let kind = if is_class_record(state, r) {
            "Class"
        } else if r.student_name.is_empty() {
            "-"
        } else {
            "Student"
        };
        table.add_row(vec![
            r.id.to_string(),
            r.date_str(),
            r.time_range().unwrap_or_else(|| "-".into()),
            dash_if_empty(&r.student_name),
            dash_if_empty(&r.course_name),
            kind.to_string(),
            hours(r.hours),
            plain_number(r.rate),
            money_with(currency, r.salary),
        ]);
    }
    table
}
