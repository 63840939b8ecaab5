use chrono::{NaiveDate, NaiveTime};
use rtutorlog::core::form::{SessionForm, build_record};
use rtutorlog::core::selection::{class_of, headcount, is_class_record, record_from_template, resolve};
use rtutorlog::core::state::AppState;
use rtutorlog::errors::AppError;
use rtutorlog::models::{ClassDraft, NewRecord, SourceRef, StudentDraft};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn amy() -> StudentDraft {
    StudentDraft {
        name: "Amy".into(),
        grade: Some("G5".into()),
        course: "Math".into(),
        start_time: t("10:00"),
        end_time: t("12:00"),
        rate: 150.0,
    }
}

fn group(name: &str, size: u32) -> ClassDraft {
    ClassDraft {
        name: name.into(),
        grade: None,
        course_name: "Physics".into(),
        start_time: t("14:00"),
        end_time: t("16:00"),
        size,
        rate: 300.0,
    }
}

#[test]
fn student_selection_prefills_a_record() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let template = resolve(&state, SourceRef::student(s.id)).unwrap();
    assert_eq!(template.student_name, "Amy");
    assert_eq!(template.course_name, "Math");
    assert_eq!(template.hours(), 2.0);

    let input = record_from_template(d("2024-03-05"), &template);
    let record = state.add_record(input);

    assert_eq!(record.hours, 2.0);
    assert_eq!(record.salary, 300.0);
    assert_eq!(record.grade.as_deref(), Some("G5"));
    assert_eq!(record.source, Some(SourceRef::student(s.id)));
    assert!(!is_class_record(&state, &record));
    assert_eq!(headcount(&state, &record), 1);
}

#[test]
fn resolve_unknown_or_wrong_kind_is_none() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    assert!(resolve(&state, SourceRef::class(s.id)).is_none());
    assert!(resolve(&state, SourceRef::student(s.id + 1)).is_none());
}

#[test]
fn class_records_are_matched_by_source_id() {
    let mut state = AppState::default();
    let c = state.add_class(group("Group A", 4)).unwrap();

    let template = resolve(&state, SourceRef::class(c.id)).unwrap();
    let record = state.add_record(record_from_template(d("2024-03-07"), &template));

    assert_eq!(record.salary, 600.0);
    assert_eq!(headcount(&state, &record), 4);

    // renaming the class keeps linked records attached
    state.update_class(c.id, group("Group B", 5)).unwrap();
    let record = state.records[0].clone();
    assert_eq!(class_of(&state, &record).map(|c| c.name.as_str()), Some("Group B"));
    assert_eq!(headcount(&state, &record), 5);
}

#[test]
fn legacy_records_fall_back_to_name_matching() {
    let mut state = AppState::default();
    state.add_class(group("Group A", 3)).unwrap();

    let mut legacy = NewRecord::new(d("2024-03-07"), "Physics", 2.0, 300.0);
    legacy.student_name = "Group A".into();
    let legacy = state.add_record(legacy);

    assert!(is_class_record(&state, &legacy));
    assert_eq!(headcount(&state, &legacy), 3);

    let unnamed = state.add_record(NewRecord::new(d("2024-03-08"), "Physics", 1.0, 1.0));
    assert!(!is_class_record(&state, &unnamed));
}

#[test]
fn student_source_wins_over_a_same_named_class() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();
    state.add_class(group("Amy", 6)).unwrap();

    let template = resolve(&state, SourceRef::student(s.id)).unwrap();
    let record = state.add_record(record_from_template(d("2024-03-05"), &template));

    assert!(!is_class_record(&state, &record));
    assert_eq!(headcount(&state, &record), 1);
}

#[test]
fn form_from_template_only() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let input = build_record(
        &state,
        d("2024-03-05"),
        &SessionForm::from_selection(SourceRef::student(s.id)),
        None,
    )
    .unwrap();

    assert_eq!(input.hours, 2.0);
    assert_eq!(input.rate, 150.0);
    assert_eq!(input.end_time, Some(t("12:00")));
}

#[test]
fn form_hours_move_the_end_time() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let form = SessionForm {
        hours: Some(1.5),
        ..SessionForm::from_selection(SourceRef::student(s.id))
    };
    let input = build_record(&state, d("2024-03-05"), &form, None).unwrap();

    assert_eq!(input.hours, 1.5);
    assert_eq!(input.start_time, Some(t("10:00")));
    assert_eq!(input.end_time, Some(t("11:30")));
}

#[test]
fn form_start_change_keeps_the_template_length() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let earlier = SessionForm {
        start: Some(t("09:00")),
        rate: Some(200.0),
        ..SessionForm::from_selection(SourceRef::student(s.id))
    };
    let input = build_record(&state, d("2024-03-05"), &earlier, None).unwrap();

    assert_eq!(input.hours, 2.0);
    assert_eq!(input.start_time, Some(t("09:00")));
    assert_eq!(input.end_time, Some(t("11:00")));
    assert_eq!(input.rate, 200.0);

    // past the template's end: the session moves instead of being rejected
    let later = SessionForm {
        start: Some(t("13:00")),
        ..SessionForm::from_selection(SourceRef::student(s.id))
    };
    let input = build_record(&state, d("2024-03-05"), &later, None).unwrap();

    assert_eq!(input.hours, 2.0);
    assert_eq!(input.end_time, Some(t("15:00")));
    assert_eq!(state.add_record(input).salary, 300.0);
}

#[test]
fn form_typed_start_and_end_override_the_template() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let form = SessionForm {
        start: Some(t("10:30")),
        end: Some(t("12:00")),
        ..SessionForm::from_selection(SourceRef::student(s.id))
    };
    let input = build_record(&state, d("2024-03-05"), &form, None).unwrap();

    assert_eq!(input.hours, 1.5);
    assert_eq!(input.end_time, Some(t("12:00")));
}

#[test]
fn form_rejects_end_together_with_hours() {
    let mut state = AppState::default();
    let s = state.add_student(amy()).unwrap();

    let form = SessionForm {
        end: Some(t("11:00")),
        hours: Some(3.0),
        ..SessionForm::from_selection(SourceRef::student(s.id))
    };
    let err = build_record(&state, d("2024-03-05"), &form, None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn amy_afternoon_session_from_template() {
    let mut state = AppState::default();
    let s = state
        .add_student(StudentDraft {
            name: "Amy".into(),
            grade: None,
            course: "Math".into(),
            start_time: t("16:00"),
            end_time: t("17:00"),
            rate: 100.0,
        })
        .unwrap();

    let template = resolve(&state, SourceRef::student(s.id)).unwrap();
    let record = state.add_record(record_from_template(d("2024-03-05"), &template));

    assert_eq!(record.hours, 1.0);
    assert_eq!(record.salary, 100.0);
    assert_eq!(record.student_name, "Amy");
}

#[test]
fn template_records_pay_hours_times_rate() {
    let mut state = AppState::default();
    let s = state
        .add_student(StudentDraft {
            name: "Ben".into(),
            grade: None,
            course: "Chemistry".into(),
            start_time: t("09:10"),
            end_time: t("10:50"),
            rate: 137.5,
        })
        .unwrap();
    let c = state.add_class(group("Group B", 3)).unwrap();

    for sel in [SourceRef::student(s.id), SourceRef::class(c.id)] {
        let input = build_record(
            &state,
            d("2024-03-05"),
            &SessionForm::from_selection(sel),
            None,
        )
        .unwrap();
        let record = state.add_record(input);
        assert!((record.salary - record.hours * record.rate).abs() < 1e-9);
    }
}

#[test]
fn form_rejects_typed_end_before_start() {
    let state = AppState::default();
    let form = SessionForm {
        course: Some("Math".into()),
        start: Some(t("12:00")),
        end: Some(t("10:00")),
        rate: Some(100.0),
        ..SessionForm::default()
    };

    let err = build_record(&state, d("2024-03-05"), &form, None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[test]
fn form_hours_may_cross_midnight() {
    let state = AppState::default();
    let form = SessionForm {
        course: Some("Math".into()),
        start: Some(t("23:00")),
        hours: Some(2.0),
        rate: Some(100.0),
        ..SessionForm::default()
    };

    let input = build_record(&state, d("2024-03-05"), &form, None).unwrap();
    assert_eq!(input.end_time, Some(t("01:00")));
    assert_eq!(input.hours, 2.0);
}

#[test]
fn form_without_template_needs_rate_course_and_hours() {
    let state = AppState::default();

    let no_rate = SessionForm {
        course: Some("Math".into()),
        hours: Some(1.0),
        ..SessionForm::default()
    };
    assert!(matches!(
        build_record(&state, d("2024-03-05"), &no_rate, None),
        Err(AppError::MissingField("rate"))
    ));

    // the configured default rate fills in
    let input = build_record(&state, d("2024-03-05"), &no_rate, Some(120.0)).unwrap();
    assert_eq!(input.rate, 120.0);
    assert_eq!(input.start_time, None);

    let no_course = SessionForm {
        hours: Some(1.0),
        rate: Some(1.0),
        ..SessionForm::default()
    };
    assert!(matches!(
        build_record(&state, d("2024-03-05"), &no_course, None),
        Err(AppError::MissingField("course"))
    ));

    let no_hours = SessionForm {
        course: Some("Math".into()),
        start: Some(t("10:00")),
        rate: Some(1.0),
        ..SessionForm::default()
    };
    assert!(matches!(
        build_record(&state, d("2024-03-05"), &no_hours, None),
        Err(AppError::MissingField("hours"))
    ));
}

#[test]
fn form_with_deleted_selection_is_not_found() {
    let state = AppState::default();
    let err = build_record(
        &state,
        d("2024-03-05"),
        &SessionForm::from_selection(SourceRef::class(7)),
        None,
    )
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { id: 7, .. }));
}
