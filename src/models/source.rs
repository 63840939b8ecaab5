use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Student,
    Class,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Student => "student",
            SourceKind::Class => "class",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Student => "Student",
            SourceKind::Class => "Class",
        }
    }
}

/// Reference to the student or class a record was created from.
///
/// Written as `student-<id>` / `class-<id>` on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRef {
    pub kind: SourceKind,
    pub id: i64,
}

impl SourceRef {
    pub fn student(id: i64) -> Self {
        Self {
            kind: SourceKind::Student,
            id,
        }
    }

    pub fn class(id: i64) -> Self {
        Self {
            kind: SourceKind::Class,
            id,
        }
    }
}

impl fmt::Display for SourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.as_str(), self.id)
    }
}

impl FromStr for SourceRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .trim()
            .split_once(['-', ':'])
            .ok_or_else(|| AppError::InvalidSelection(s.to_string()))?;

        let kind = match kind.to_ascii_lowercase().as_str() {
            "student" | "s" => SourceKind::Student,
            "class" | "c" => SourceKind::Class,
            _ => return Err(AppError::InvalidSelection(s.to_string())),
        };

        let id = id
            .parse::<i64>()
            .map_err(|_| AppError::InvalidSelection(s.to_string()))?;

        Ok(Self { kind, id })
    }
}
