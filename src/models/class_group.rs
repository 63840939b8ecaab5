use super::profile::{Profile, SessionTemplate};
use super::source::SourceKind;
use super::student::validate_template_fields;
use super::wire;
use crate::errors::{AppError, AppResult};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Type tag stored with every class, always the literal `"class"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassTag {
    #[default]
    #[serde(rename = "class")]
    Class,
}

/// A taught group: a student-shaped template plus a headcount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassGroup {
    pub id: i64,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "wire::empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub grade: Option<String>,
    #[serde(default)]
    pub course_name: String,
    #[serde(with = "wire::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "wire::hhmm")]
    pub end_time: NaiveTime,
    #[serde(default = "one", deserialize_with = "wire::lenient_size")]
    pub size: u32,
    #[serde(default, deserialize_with = "wire::lenient_f64")]
    pub rate: f64,
    #[serde(rename = "type", default)]
    pub tag: ClassTag,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDraft {
    pub name: String,
    pub grade: Option<String>,
    pub course_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub size: u32,
    pub rate: f64,
}

impl ClassDraft {
    pub fn validate(&self) -> AppResult<()> {
        validate_template_fields(
            &self.name,
            &self.course_name,
            self.start_time,
            self.end_time,
            self.rate,
        )?;
        if self.size < 1 {
            return Err(AppError::Validation(
                "Class size must be at least 1.".into(),
            ));
        }
        Ok(())
    }

    pub fn into_class(self, id: i64) -> ClassGroup {
        ClassGroup {
            id,
            name: self.name,
            grade: self.grade,
            course_name: self.course_name,
            start_time: self.start_time,
            end_time: self.end_time,
            size: self.size,
            rate: self.rate,
            tag: ClassTag::Class,
        }
    }
}

impl Profile for ClassGroup {
    const KIND: SourceKind = SourceKind::Class;

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
            course_name: self.course_name.clone(),
            start_time: self.start_time,
            end_time: self.end_time,
            rate: self.rate,
            source: self.source_ref(),
        }
    }
}
