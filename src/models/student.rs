use super::profile::{Profile, SessionTemplate};
use super::source::SourceKind;
use super::wire;
use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<String>,
    #[serde(default)]
    pub course: String,
    #[serde(with = "wire::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub rate: f64,
}

/// User-supplied student fields, used for both add and full-replace update.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentDraft {
    pub name: String,
    pub grade: Option<String>,
    pub course: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub rate: f64,
}

impl StudentDraft {
    pub fn validate(&self) -> AppResult<()> {
        validate_template_fields(
            &self.name,
            &self.course,
            self.start_time,
            self.end_time,
            self.rate,
        )
    }

    pub fn into_student(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            grade: self.grade,
            course: self.course,
            start_time: self.start_time,
            end_time: self.end_time,
            rate: self.rate,
        }
    }
}

/// Checks shared by student and class forms.
pub(crate) fn validate_template_fields(
    name: &str,
    course: &str,
    start: NaiveTime,
    end: NaiveTime,
    rate: f64,
) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::MissingField("name"));
    }
    if course.trim().is_empty() {
        return Err(AppError::MissingField("course"));
    }
    if end <= start {
        return Err(AppError::Validation(
            "End time must be later than start time.".into(),
        ));
    }
    if !rate.is_finite() || rate < 0.0 {
        return Err(AppError::InvalidNumber(rate.to_string()));
    }
    Ok(())
}

impl Profile for Student {
    const KIND: SourceKind = SourceKind::Student;

    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn template(&self) -> SessionTemplate {
        SessionTemplate {
            student_name: self.name.clone(),
            grade: self.grade.clone(),
            course_name: self.course.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            rate: self.rate,
            source: self.source_ref(),
        }
    }
}
