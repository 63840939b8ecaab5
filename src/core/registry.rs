//! Student and class registries. Insertion order is kept; updates replace
//! every field except the id; records created earlier are never touched.

use crate::core::state::{AppState, next_id};
use crate::errors::AppResult;
use crate::models::{ClassDraft, ClassGroup, Student, StudentDraft};

impl AppState {
    // ---------------------------
    // Students
    // ---------------------------
    pub fn add_student(&mut self, draft: StudentDraft) -> AppResult<Student> {
        draft.validate()?;
        let id = next_id(self.students.iter().map(|s| s.id));
        let student = draft.into_student(id);
        self.students.push(student.clone());
        Ok(student)
    }

    /// Full replace. `Ok(None)` when no student has this id.
    pub fn update_student(&mut self, id: i64, draft: StudentDraft) -> AppResult<Option<Student>> {
        draft.validate()?;
        match self.students.iter_mut().find(|s| s.id == id) {
            Some(slot) => {
                *slot = draft.into_student(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn delete_student(&mut self, id: i64) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s.id != id);
        self.students.len() != before
    }

    pub fn student(&self, id: i64) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    // ---------------------------
    // Classes
    // ---------------------------
    pub fn add_class(&mut self, draft: ClassDraft) -> AppResult<ClassGroup> {
        draft.validate()?;
        let id = next_id(self.classes.iter().map(|c| c.id));
        let class = draft.into_class(id);
        self.classes.push(class.clone());
        Ok(class)
    }

    pub fn update_class(&mut self, id: i64, draft: ClassDraft) -> AppResult<Option<ClassGroup>> {
        draft.validate()?;
        match self.classes.iter_mut().find(|c| c.id == id) {
            Some(slot) => {
                *slot = draft.into_class(id);
                Ok(Some(slot.clone()))
            }
            None => Ok(None),
        }
    }

    pub fn delete_class(&mut self, id: i64) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != id);
        self.classes.len() != before
    }

    pub fn class(&self, id: i64) -> Option<&ClassGroup> {
        self.classes.iter().find(|c| c.id == id)
    }
}
