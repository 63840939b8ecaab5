use crate::models::{ClassGroup, Record, Student};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The three collections of the tracker.
///
/// Owned by the [`Tracker`](crate::core::tracker::Tracker) and handed by
/// reference to whatever needs to read or mutate it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub classes: Vec<ClassGroup>,
}

/// Which collection a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Records,
    Students,
    Classes,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Records, Collection::Students, Collection::Classes];

    /// Storage key of the collection blob.
    pub fn key(&self) -> &'static str {
        match self {
            Collection::Records => "records",
            Collection::Students => "students",
            Collection::Classes => "classes",
        }
    }
}

impl AppState {
    pub fn new(records: Vec<Record>, students: Vec<Student>, classes: Vec<ClassGroup>) -> Self {
        Self {
            records,
            students,
            classes,
        }
    }

    /// Replace all three collections at once (remote overwrite, no merge).
    pub fn replace_all(&mut self, other: AppState) {
        *self = other;
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.students.is_empty() && self.classes.is_empty()
    }
}

/// Creation-time based id, bumped past `existing` so two entities created in
/// the same millisecond never share an id.
pub fn next_id(existing: impl Iterator<Item = i64>) -> i64 {
    let now = Utc::now().timestamp_millis();
    match existing.max() {
        Some(max) if max >= now => max + 1,
        _ => now,
    }
}
