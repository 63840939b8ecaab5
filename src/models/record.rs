use super::source::SourceRef;
use super::wire;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One logged teaching session with its computed pay.
///
/// Records are snapshots: once created they are never edited, and nothing
/// that happens to the student or class they came from touches them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(default)]
    pub student_name: String,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<String>,
    #[serde(default)]
    pub course_name: String,
    #[serde(default, with = "wire::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "wire::hhmm_opt", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub hours: f64,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub rate: f64,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub salary: f64,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceRef>,
}

impl Record {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// `HH:MM-HH:MM` when both ends are known.
    pub fn time_range(&self) -> Option<String> {
        match (self.start_time, self.end_time) {
            (Some(s), Some(e)) => Some(format!("{}-{}", s.format("%H:%M"), e.format("%H:%M"))),
            _ => None,
        }
    }

    /// Start time used for ordering; a missing start sorts as midnight.
    pub fn sort_time(&self) -> NaiveTime {
        self.start_time.unwrap_or(NaiveTime::MIN)
    }
}

/// Everything needed to create a [`Record`]; id and salary are assigned on add.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub date: NaiveDate,
    pub student_name: String,
    pub grade: Option<String>,
    pub course_name: String,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub hours: f64,
    pub rate: f64,
    pub notes: Option<String>,
    pub source: Option<SourceRef>,
}

impl NewRecord {
    pub fn new(date: NaiveDate, course_name: &str, hours: f64, rate: f64) -> Self {
        Self {
            date,
            student_name: String::new(),
            grade: None,
            course_name: course_name.to_string(),
            start_time: None,
            end_time: None,
            hours,
            rate,
            notes: None,
            source: None,
        }
    }

    pub fn into_record(self, id: i64) -> Record {
        let salary = self.hours * self.rate;
        Record {
            id,
            date: self.date,
            student_name: self.student_name,
            grade: self.grade,
            course_name: self.course_name,
            start_time: self.start_time,
            end_time: self.end_time,
            hours: self.hours,
            rate: self.rate,
            salary,
            notes: self.notes,
            source: self.source,
        }
    }
}
