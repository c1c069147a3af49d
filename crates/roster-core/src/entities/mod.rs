//! Entity structs for the four Roster resources plus their request drafts.
//!
//! Entities mirror the JSON bodies returned by the API. Unknown fields are
//! ignored so server-side additions do not break deserialization.

mod course;
mod department;
mod draft;
mod employee;
mod student;

pub use course::Course;
pub use department::Department;
pub use draft::{EmployeeDraft, NameDraft, Reference, StudentDraft};
pub use employee::Employee;
pub use student::Student;

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// Fields every listed entity exposes to screens and renderers.
pub trait Record {
    fn id(&self) -> EntityId;

    fn name(&self) -> &str;

    /// The entity this record points at (department of an employee, course of
    /// a student), if any.
    fn reference(&self) -> Option<Choice> {
        None
    }
}

/// An `(id, name)` pair offered by a reference picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: EntityId,
    pub name: String,
}

impl Choice {
    #[must_use]
    pub fn of<R: Record + ?Sized>(record: &R) -> Self {
        Self {
            id: record.id(),
            name: record.name().to_string(),
        }
    }
}
