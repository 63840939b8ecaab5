//! Selection resolver: turns a `student-<id>` / `class-<id>` choice into the
//! template that pre-fills a new record, and tells whether an existing record
//! belongs to a class.

use crate::core::state::AppState;
use crate::models::{ClassGroup, NewRecord, Profile, Record, SessionTemplate, SourceKind, SourceRef};
use chrono::NaiveDate;

/// Template of the selected student or class, `None` if it no longer exists.
pub fn resolve(state: &AppState, selection: SourceRef) -> Option<SessionTemplate> {
    match selection.kind {
        SourceKind::Student => state.student(selection.id).map(Profile::template),
        SourceKind::Class => state.class(selection.id).map(Profile::template),
    }
}

/// New record pre-filled from a template, hours derived from its times.
pub fn record_from_template(date: NaiveDate, template: &SessionTemplate) -> NewRecord {
    NewRecord {
        date,
        student_name: template.student_name.clone(),
        grade: template.grade.clone(),
        course_name: template.course_name.clone(),
        start_time: Some(template.start_time),
        end_time: Some(template.end_time),
        hours: template.hours(),
        rate: template.rate,
        notes: None,
        source: Some(template.source),
    }
}

/// The class a record was taught to, if any.
///
/// Records that carry a source are matched by id. Records without one
/// (created before sources were stored) fall back to the first class whose
/// current name equals the record's name, so renaming a class detaches
/// those older records and a student/class name clash resolves to the class.
pub fn class_of<'a>(state: &'a AppState, record: &Record) -> Option<&'a ClassGroup> {
    match record.source {
        Some(SourceRef {
            kind: SourceKind::Class,
            id,
        }) => state.class(id),
        Some(_) => None,
        None if record.student_name.is_empty() => None,
        None => state.classes.iter().find(|c| c.name == record.student_name),
    }
}

pub fn is_class_record(state: &AppState, record: &Record) -> bool {
    class_of(state, record).is_some()
}

/// Number of people taught in the session: class size, otherwise 1.
pub fn headcount(state: &AppState, record: &Record) -> u32 {
    class_of(state, record).map(|c| c.size).unwrap_or(1)
}
