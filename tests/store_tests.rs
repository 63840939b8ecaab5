use chrono::{NaiveDate, NaiveTime};
use rtutorlog::core::records::{filtered_by_month, sorted_ascending, sorted_descending};
use rtutorlog::core::state::{AppState, next_id};
use rtutorlog::core::summary::{
    distinct_months, grand_total_pay, month_key, month_preview, monthly_totals,
};
use rtutorlog::core::tracker::Tracker;
use rtutorlog::db::pool::DbPool;
use rtutorlog::models::{ClassDraft, NewRecord, SourceRef, StudentDraft};

fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn session(date: &str, start: Option<&str>, hours: f64, rate: f64) -> NewRecord {
    let mut r = NewRecord::new(d(date), "Math", hours, rate);
    r.start_time = start.map(t);
    r
}

#[test]
fn add_record_computes_salary_and_prepends() {
    let mut state = AppState::default();

    let first = state.add_record(session("2024-03-05", Some("10:00"), 2.0, 150.0));
    let second = state.add_record(session("2024-03-06", Some("10:00"), 1.5, 100.0));

    assert_eq!(first.salary, 300.0);
    assert_eq!(second.salary, 150.0);
    assert_eq!(state.records[0].id, second.id);
    assert_eq!(state.records[1].id, first.id);
}

#[test]
fn ids_stay_unique_within_the_same_millisecond() {
    let mut state = AppState::default();
    for _ in 0..50 {
        state.add_record(session("2024-03-05", None, 1.0, 1.0));
    }

    let mut ids: Vec<i64> = state.records.iter().map(|r| r.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn next_id_moves_past_existing_ids() {
    let far_future = i64::MAX / 2;
    assert_eq!(next_id([far_future].into_iter()), far_future + 1);
    assert!(next_id(std::iter::empty()) > 0);
}

#[test]
fn delete_missing_record_is_a_no_op() {
    let mut state = AppState::default();
    let r = state.add_record(session("2024-03-05", None, 1.0, 10.0));

    assert!(!state.delete_record(r.id + 12345));
    assert_eq!(state.records.len(), 1);

    assert!(state.delete_record(r.id));
    assert!(state.records.is_empty());
}

#[test]
fn month_filter_and_orderings() {
    let mut state = AppState::default();
    state.add_record(session("2024-03-05", Some("14:00"), 1.0, 10.0));
    state.add_record(session("2024-02-28", Some("09:00"), 1.0, 10.0));
    state.add_record(session("2024-03-05", None, 1.0, 10.0));
    state.add_record(session("2024-03-10", Some("08:00"), 1.0, 10.0));

    let march = filtered_by_month(&state.records, Some("2024-03"));
    assert_eq!(march.len(), 3);
    assert_eq!(filtered_by_month(&state.records, None).len(), 4);

    let desc: Vec<(String, Option<NaiveTime>)> = sorted_descending(&state.records)
        .into_iter()
        .map(|r| (r.date_str(), r.start_time))
        .collect();
    assert_eq!(
        desc,
        vec![
            ("2024-03-10".to_string(), Some(t("08:00"))),
            ("2024-03-05".to_string(), Some(t("14:00"))),
            // missing start time sorts as 00:00
            ("2024-03-05".to_string(), None),
            ("2024-02-28".to_string(), Some(t("09:00"))),
        ]
    );

    let asc = sorted_ascending(march);
    assert_eq!(asc[0].date_str(), "2024-03-05");
    assert_eq!(asc[0].start_time, None);
    assert_eq!(asc[1].start_time, Some(t("14:00")));
    assert_eq!(asc[2].date_str(), "2024-03-10");
}

#[test]
fn orderings_are_exact_reverses_without_ties() {
    let mut state = AppState::default();
    state.add_record(session("2024-03-05", Some("14:00"), 1.0, 10.0));
    state.add_record(session("2024-02-28", Some("09:00"), 1.0, 10.0));
    state.add_record(session("2024-03-05", Some("09:30"), 1.0, 10.0));
    state.add_record(session("2024-03-10", None, 1.0, 10.0));
    state.add_record(session("2024-01-15", Some("18:00"), 1.0, 10.0));

    let desc: Vec<i64> = sorted_descending(&state.records).iter().map(|r| r.id).collect();
    let mut asc: Vec<i64> = sorted_ascending(&state.records).iter().map(|r| r.id).collect();
    asc.reverse();

    assert_eq!(desc.len(), 5);
    assert_eq!(desc, asc);
}

#[test]
fn totals_and_months() {
    let mut state = AppState::default();
    state.add_record(session("2024-03-05", None, 2.0, 150.0));
    state.add_record(session("2024-03-12", None, 1.5, 100.0));
    state.add_record(session("2024-01-20", None, 1.0, 80.0));

    let march = monthly_totals(&state.records, "2024-03");
    assert_eq!(march.total_pay, 450.0);
    assert_eq!(march.total_hours, 3.5);
    assert_eq!(march.count, 2);

    let empty = monthly_totals(&state.records, "2023-12");
    assert_eq!(empty.count, 0);
    assert_eq!(empty.total_pay, 0.0);

    assert_eq!(distinct_months(&state.records), vec!["2024-03", "2024-01"]);
    assert_eq!(grand_total_pay(&state.records), 530.0);
    assert_eq!(month_key(&d("2024-11-02")), "2024-11");
}

#[test]
fn registry_update_replaces_fields_and_leaves_records_alone() {
    let mut state = AppState::default();
    let amy = state
        .add_student(StudentDraft {
            name: "Amy".into(),
            grade: None,
            course: "Math".into(),
            start_time: t("10:00"),
            end_time: t("12:00"),
            rate: 150.0,
        })
        .unwrap();

    let mut input = session("2024-03-05", Some("10:00"), 2.0, 150.0);
    input.student_name = "Amy".into();
    input.source = Some(SourceRef::student(amy.id));
    let record = state.add_record(input);

    let updated = state
        .update_student(
            amy.id,
            StudentDraft {
                name: "Amy Chen".into(),
                grade: Some("G6".into()),
                course: "Algebra".into(),
                start_time: t("09:00"),
                end_time: t("10:00"),
                rate: 200.0,
            },
        )
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, amy.id);
    assert_eq!(updated.course, "Algebra");
    assert_eq!(state.records[0], record);
    assert!(state.update_student(amy.id + 1, updated_draft()).unwrap().is_none());

    assert!(state.delete_student(amy.id));
    assert!(!state.delete_student(amy.id));
    assert_eq!(state.records.len(), 1);
}

fn updated_draft() -> StudentDraft {
    StudentDraft {
        name: "Nobody".into(),
        grade: None,
        course: "Math".into(),
        start_time: t("10:00"),
        end_time: t("11:00"),
        rate: 1.0,
    }
}

#[test]
fn registry_rejects_invalid_templates() {
    let mut state = AppState::default();

    let mut bad = updated_draft();
    bad.end_time = t("09:00");
    assert!(state.add_student(bad).is_err());

    let mut no_course = updated_draft();
    no_course.course = "  ".into();
    assert!(state.add_student(no_course).is_err());

    let class = ClassDraft {
        name: "Group".into(),
        grade: None,
        course_name: "Physics".into(),
        start_time: t("14:00"),
        end_time: t("16:00"),
        size: 0,
        rate: 300.0,
    };
    assert!(state.add_class(class).is_err());
    assert!(state.is_empty());
}

#[test]
fn month_preview_splits_individuals_and_classes() {
    let mut state = AppState::default();
    let class = state
        .add_class(ClassDraft {
            name: "Group A".into(),
            grade: None,
            course_name: "Physics".into(),
            start_time: t("14:00"),
            end_time: t("16:00"),
            size: 4,
            rate: 300.0,
        })
        .unwrap();

    let mut c = session("2024-03-07", Some("14:00"), 2.0, 300.0);
    c.student_name = "Group A".into();
    c.source = Some(SourceRef::class(class.id));
    state.add_record(c);

    let mut s = session("2024-03-05", Some("10:00"), 2.0, 150.0);
    s.student_name = "Amy".into();
    state.add_record(s);

    state.add_record(session("2024-04-01", Some("10:00"), 1.0, 10.0));

    let preview = month_preview(&state, "2024-03");
    assert_eq!(preview.individuals.rows.len(), 1);
    assert_eq!(preview.classes.rows.len(), 1);
    assert_eq!(preview.individuals.totals.total_pay, 300.0);
    assert_eq!(preview.classes.totals.total_pay, 600.0);
    assert_eq!(preview.totals.total_pay, 900.0);
    assert_eq!(preview.totals.count, 2);
    assert_eq!(preview.classes.rows[0].class.map(|c| c.size), Some(4));
}

#[test]
fn tracker_persists_every_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tracker.sqlite");
    let db = db.to_str().unwrap();

    let record_id = {
        let mut tracker = Tracker::with_pool(DbPool::new(db).unwrap(), None).unwrap();
        let amy = tracker.add_student(updated_draft()).unwrap();
        let r = tracker
            .add_record(session("2024-03-05", Some("10:00"), 2.0, 150.0))
            .unwrap();
        tracker.delete_student(amy.id).unwrap();
        tracker.finish().unwrap();
        r.id
    };

    let reopened = Tracker::with_pool(DbPool::new(db).unwrap(), None).unwrap();
    assert_eq!(reopened.state().records.len(), 1);
    assert_eq!(reopened.state().records[0].id, record_id);
    assert_eq!(reopened.state().records[0].salary, 300.0);
    assert!(reopened.state().students.is_empty());

    let ops: Vec<String> = rtutorlog::db::log::load_log(reopened.conn(), None)
        .unwrap()
        .into_iter()
        .map(|e| e.operation)
        .collect();
    assert!(ops.contains(&"add".to_string()));
    assert!(ops.contains(&"student_add".to_string()));
    assert!(ops.contains(&"student_del".to_string()));
}

#[test]
fn tracker_delete_of_unknown_id_writes_nothing() {
    let mut tracker = Tracker::in_memory().unwrap();
    assert!(!tracker.delete_record(42).unwrap());
    let dels = rtutorlog::db::log::load_log(tracker.conn(), Some("del")).unwrap();
    assert!(dels.is_empty());
}
