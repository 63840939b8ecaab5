use rtutorlog::core::state::AppState;
use rtutorlog::models::{ClassGroup, Record, SourceKind, SourceRef, Student};
use std::str::FromStr;

#[test]
fn legacy_records_load_with_lenient_fields() {
    let raw = r#"[
        {"id": 1709600000000, "date": "2024-03-05", "studentName": "Amy", "grade": "",
         "courseName": "Math", "startTime": "10:00", "endTime": "12:00",
         "hours": "2", "rate": 150, "salary": 300, "notes": ""},
        {"id": 1709600000001, "date": "2024-03-06", "studentName": "", "courseName": "Math",
         "startTime": "", "endTime": null, "hours": 1.5, "rate": null, "salary": "oops"}
    ]"#;

    let records: Vec<Record> = serde_json::from_str(raw).unwrap();

    assert_eq!(records[0].hours, 2.0);
    assert_eq!(records[0].grade, None);
    assert_eq!(records[0].notes, None);
    assert_eq!(records[0].source, None);
    assert_eq!(records[0].time_range().as_deref(), Some("10:00-12:00"));

    assert_eq!(records[1].start_time, None);
    assert_eq!(records[1].end_time, None);
    assert_eq!(records[1].rate, 0.0);
    assert_eq!(records[1].salary, 0.0);
}

#[test]
fn records_serialize_with_camel_case_keys() {
    let raw = r#"{"id": 5, "date": "2024-03-05", "studentName": "Amy", "courseName": "Math",
                  "startTime": "10:00", "endTime": "12:00", "hours": 2, "rate": 150,
                  "salary": 300, "source": {"kind": "student", "id": 9}}"#;
    let record: Record = serde_json::from_str(raw).unwrap();
    assert_eq!(record.source, Some(SourceRef::student(9)));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["studentName"], "Amy");
    assert_eq!(json["courseName"], "Math");
    assert_eq!(json["startTime"], "10:00");
    assert_eq!(json["source"]["kind"], "student");
    assert!(json.get("grade").is_none());
}

#[test]
fn students_use_course_and_classes_use_course_name() {
    let student: Student = serde_json::from_str(
        r#"{"id": 1, "name": "Amy", "course": "Math", "startTime": "10:00",
            "endTime": "12:00", "rate": "150"}"#,
    )
    .unwrap();
    assert_eq!(student.rate, 150.0);
    assert_eq!(serde_json::to_value(&student).unwrap()["course"], "Math");

    let class: ClassGroup = serde_json::from_str(
        r#"{"id": 2, "name": "Group A", "courseName": "Physics", "startTime": "14:00",
            "endTime": "16:00", "rate": 300}"#,
    )
    .unwrap();
    assert_eq!(class.size, 1);

    let json = serde_json::to_value(&class).unwrap();
    assert_eq!(json["type"], "class");
    assert_eq!(json["courseName"], "Physics");
    assert_eq!(json["size"], 1);
}

#[test]
fn class_size_below_one_loads_as_one() {
    let class: ClassGroup = serde_json::from_str(
        r#"{"id": 2, "name": "G", "courseName": "P", "startTime": "14:00",
            "endTime": "16:00", "size": 0, "rate": 1, "type": "class"}"#,
    )
    .unwrap();
    assert_eq!(class.size, 1);
}

#[test]
fn state_round_trips_through_json() {
    let raw = r#"{"records": [], "students": [{"id": 1, "name": "Amy", "course": "Math",
                  "startTime": "10:00", "endTime": "12:00", "rate": 150}]}"#;
    let state: AppState = serde_json::from_str(raw).unwrap();
    assert!(state.classes.is_empty());

    let back: AppState = serde_json::from_str(&serde_json::to_string(&state).unwrap()).unwrap();
    assert_eq!(back, state);
}

#[test]
fn source_ref_parses_selector_values() {
    assert_eq!(SourceRef::from_str("student-42").unwrap(), SourceRef::student(42));
    assert_eq!(SourceRef::from_str("c:7").unwrap(), SourceRef::class(7));
    assert_eq!(SourceRef::class(7).to_string(), "class-7");
    assert_eq!(SourceKind::Class.label(), "Class");

    for bad in ["teacher-1", "student", "class-x", ""] {
        assert!(SourceRef::from_str(bad).is_err(), "{bad} should be rejected");
    }
}
