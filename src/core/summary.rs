//! Derived views over the record store. Nothing here is persisted; every
//! view is recomputed from the collections on demand.

use crate::core::records::sorted_ascending;
use crate::core::selection::class_of;
use crate::core::state::AppState;
use crate::models::{ClassGroup, Record};
use crate::utils::date::month_of;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// `YYYY-MM` of a record date.
pub fn month_key(date: &NaiveDate) -> String {
    month_of(date)
}

/// Months that have at least one record, newest first.
pub fn distinct_months(records: &[Record]) -> Vec<String> {
    let months: BTreeSet<String> = records.iter().map(|r| month_key(&r.date)).collect();
    months.into_iter().rev().collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTotals {
    pub total_pay: f64,
    pub total_hours: f64,
    pub count: usize,
}

impl MonthlyTotals {
    pub fn of<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        records
            .into_iter()
            .fold(MonthlyTotals::default(), |mut acc, r| {
                acc.total_pay += r.salary;
                acc.total_hours += r.hours;
                acc.count += 1;
                acc
            })
    }
}

pub fn monthly_totals(records: &[Record], month: &str) -> MonthlyTotals {
    MonthlyTotals::of(records.iter().filter(|r| month_key(&r.date) == month))
}

/// Sum of every salary, unfiltered.
pub fn grand_total_pay(records: &[Record]) -> f64 {
    records.iter().map(|r| r.salary).sum()
}

/// A record of the preview, with the class it was matched to.
#[derive(Debug, Clone)]
pub struct PreviewRow<'a> {
    pub record: &'a Record,
    pub class: Option<&'a ClassGroup>,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewSection<'a> {
    pub rows: Vec<PreviewRow<'a>>,
    pub totals: MonthlyTotals,
}

impl<'a> PreviewSection<'a> {
    fn from_rows(rows: Vec<PreviewRow<'a>>) -> Self {
        let totals = MonthlyTotals::of(rows.iter().map(|r| r.record));
        Self { rows, totals }
    }
}

/// One month, oldest session first, split into individual and class sessions.
#[derive(Debug, Clone)]
pub struct MonthPreview<'a> {
    pub month: String,
    pub totals: MonthlyTotals,
    pub individuals: PreviewSection<'a>,
    pub classes: PreviewSection<'a>,
}

pub fn month_preview<'a>(state: &'a AppState, month: &str) -> MonthPreview<'a> {
    let ordered = sorted_ascending(state.records.iter().filter(|r| month_key(&r.date) == month));

    let (class_rows, individual_rows): (Vec<PreviewRow>, Vec<PreviewRow>) = ordered
        .into_iter()
        .map(|record| PreviewRow {
            record,
            class: class_of(state, record),
        })
        .partition(|row| row.class.is_some());

    let individuals = PreviewSection::from_rows(individual_rows);
    let classes = PreviewSection::from_rows(class_rows);

    MonthPreview {
        month: month.to_string(),
        totals: MonthlyTotals {
            total_pay: individuals.totals.total_pay + classes.totals.total_pay,
            total_hours: individuals.totals.total_hours + classes.totals.total_hours,
            count: individuals.totals.count + classes.totals.count,
        },
        individuals,
        classes,
    }
}
