pub mod class_group;
pub mod profile;
pub mod record;
pub mod source;
pub mod student;
pub mod wire;

pub use class_group::{ClassDraft, ClassGroup};
pub use profile::{Profile, SessionTemplate};
pub use record::{NewRecord, Record};
pub use source::{SourceKind, SourceRef};
pub use student::{Student, StudentDraft};
