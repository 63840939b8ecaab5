// src/export/model.rs

use crate::core::records::sorted_ascending;
use crate::core::selection::headcount;
use crate::core::state::AppState;
use crate::core::summary::month_key;
use crate::models::Record;
use crate::utils::formatting::round_to;
use serde::Serialize;
use std::fmt;

/// One exported session.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub id: i64,
    /// `YYYY-MM-DD HH:MM-HH:MM`, or the bare date when times are unknown.
    pub when: String,
    pub name: String,
    pub grade: String,
    pub course: String,
    pub headcount: u32,
    pub hours: f64,
    pub rate: f64,
    pub salary: f64,
    pub notes: String,
}

impl ExportRow {
    pub fn from_record(state: &AppState, r: &Record) -> Self {
        let when = match r.time_range() {
            Some(range) => format!("{} {}", r.date_str(), range),
            None => r.date_str(),
        };
        Self {
            id: r.id,
            when,
            name: r.student_name.clone(),
            grade: r.grade.clone().unwrap_or_default(),
            course: r.course_name.clone(),
            headcount: headcount(state, r),
            hours: r.hours,
            rate: r.rate,
            salary: r.salary,
            notes: r.notes.clone().unwrap_or_default(),
        }
    }
}

/// Aggregate row written after the data rows.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExportTotals {
    pub headcount: u32,
    pub total_hours: f64,
    pub total_pay: f64,
    pub count: usize,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ExportSheet {
    pub month: String,
    pub rows: Vec<ExportRow>,
    pub totals: ExportTotals,
}

impl ExportSheet {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Records of `month`, oldest first, with their totals.
pub fn build_sheet(state: &AppState, month: &str) -> ExportSheet {
    let rows: Vec<ExportRow> =
        sorted_ascending(state.records.iter().filter(|r| month_key(&r.date) == month))
            .into_iter()
            .map(|r| ExportRow::from_record(state, r))
            .collect();

    let mut totals = rows.iter().fold(ExportTotals::default(), |mut acc, row| {
        acc.headcount += row.headcount;
        acc.total_hours += row.hours;
        acc.total_pay += row.salary;
        acc.count += 1;
        acc
    });
    totals.total_hours = round_to(totals.total_hours, 1);
    totals.total_pay = round_to(totals.total_pay, 2);

    ExportSheet {
        month: month.to_string(),
        rows,
        totals,
    }
}

/// A cell of the tabular formats (CSV / XLSX).
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Cell {
    Text(String),
    Int(u32),
    /// Value and number of decimals shown.
    Number(f64, usize),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{n}"),
            Cell::Number(v, decimals) => write!(f, "{:.*}", decimals, v),
        }
    }
}

pub(crate) fn get_headers() -> Vec<&'static str> {
    vec![
        "Date", "Name", "Grade", "Course", "People", "Hours", "Rate", "Pay", "Notes",
    ]
}

pub(crate) fn row_to_cells(r: &ExportRow) -> Vec<Cell> {
    vec![
        Cell::Text(r.when.clone()),
        Cell::Text(r.name.clone()),
        Cell::Text(r.grade.clone()),
        Cell::Text(r.course.clone()),
        Cell::Int(r.headcount),
        Cell::Number(r.hours, 1),
        Cell::Number(r.rate, 2),
        Cell::Number(r.salary, 2),
        Cell::Text(r.notes.clone()),
    ]
}

pub(crate) fn totals_to_cells(t: &ExportTotals) -> Vec<Cell> {
    vec![
        Cell::Text("Total".into()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Text(String::new()),
        Cell::Int(t.headcount),
        Cell::Number(t.total_hours, 1),
        Cell::Text(String::new()),
        Cell::Number(t.total_pay, 2),
        Cell::Text(format!("{} records", t.count)),
    ]
}
