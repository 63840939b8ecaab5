use super::source::{SourceKind, SourceRef};
use crate::utils::time::hours_between;
use chrono::NaiveTime;

/// Default values a student or class contributes to a new record.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTemplate {
    pub student_name: String,
    pub grade: Option<String>,
    pub course_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub rate: f64,
    pub source: SourceRef,
}

impl SessionTemplate {
    pub fn hours(&self) -> f64 {
        hours_between(self.start_time, self.end_time)
    }
}

/// A template profile: something a record can be created from.
pub trait Profile {
    const KIND: SourceKind;

    fn id(&self) -> i64;
    fn name(&self) -> &str;
    fn template(&self) -> SessionTemplate;

    fn source_ref(&self) -> SourceRef {
        SourceRef {
            kind: Self::KIND,
            id: self.id(),
        }
    }
}
