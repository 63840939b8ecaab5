//! New-session form: combines an optional student/class template with the
//! values the user typed and produces a validated [`NewRecord`].

use crate::core::records::validate_new_record;
use crate::core::selection::{record_from_template, resolve};
use crate::core::state::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::{NewRecord, SourceRef};
use crate::utils::time::{end_from_hours, hours_between};
use chrono::{NaiveDate, NaiveTime};

/// Parsed user input. Every `Some` overrides the template value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionForm {
    pub selection: Option<SourceRef>,
    pub name: Option<String>,
    pub grade: Option<String>,
    pub course: Option<String>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub hours: Option<f64>,
    pub rate: Option<f64>,
    pub notes: Option<String>,
}

impl SessionForm {
    pub fn from_selection(selection: SourceRef) -> Self {
        Self {
            selection: Some(selection),
            ..Self::default()
        }
    }
}

/// Build the record to add on `date`.
///
/// Hours follow the times: typed hours move the end time, otherwise hours
/// are recomputed from start and end. A new start on a selected template
/// keeps the template's length and moves the end. `default_rate` applies
/// when neither the form nor the template gives a rate.
pub fn build_record(
    state: &AppState,
    date: NaiveDate,
    form: &SessionForm,
    default_rate: Option<f64>,
) -> AppResult<NewRecord> {
    let mut input = match form.selection {
        Some(sel) => {
            let template = resolve(state, sel).ok_or(AppError::NotFound {
                kind: sel.kind.label(),
                id: sel.id,
            })?;
            record_from_template(date, &template)
        }
        None => NewRecord::new(date, "", 0.0, default_rate.unwrap_or(0.0)),
    };

    if let Some(name) = &form.name {
        input.student_name = name.trim().to_string();
    }
    if let Some(grade) = &form.grade {
        input.grade = Some(grade.trim().to_string()).filter(|g| !g.is_empty());
    }
    if let Some(course) = &form.course {
        input.course_name = course.trim().to_string();
    }
    if let Some(notes) = &form.notes {
        input.notes = Some(notes.trim().to_string()).filter(|n| !n.is_empty());
    }
    if let Some(rate) = form.rate {
        input.rate = rate;
    } else if form.selection.is_none() && default_rate.is_none() {
        return Err(AppError::MissingField("rate"));
    }

    if form.end.is_some() && form.hours.is_some() {
        return Err(AppError::Validation(
            "Give either an end time or a number of hours, not both.".into(),
        ));
    }

    // a start typed over a template shifts the session, the length stays
    let hours = form.hours.or_else(|| {
        (form.selection.is_some() && form.start.is_some() && form.end.is_none())
            .then_some(input.hours)
    });

    if form.start.is_some() {
        input.start_time = form.start;
    }
    if form.end.is_some() {
        input.end_time = form.end;
    }

    match (hours, input.start_time, input.end_time) {
        (Some(h), Some(start), _) => {
            input.hours = h;
            input.end_time = Some(end_from_hours(start, h)?);
        }
        (Some(h), None, _) => {
            input.hours = h;
            input.end_time = None;
        }
        (None, Some(start), Some(end)) => input.hours = hours_between(start, end),
        (None, _, _) => return Err(AppError::MissingField("hours")),
    }

    let user_times = form.end.is_some() || (form.start.is_some() && hours.is_none());
    validate_new_record(&input, user_times)?;

    Ok(input)
}
