//! Request bodies for create and update calls.
//!
//! Drafts never carry an `id`: ids are assigned by the server and travel only
//! in the request path of an update.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// Body for departments and courses: `{"name": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameDraft {
    pub name: String,
}

/// Foreign reference encoded as `{"id": ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub id: EntityId,
}

/// Body for employees: `{"name": ..., "department": {"id": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<Reference>,
}

/// Body for students: `{"name": ..., "course": {"id": ...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDraft {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<Reference>,
}
