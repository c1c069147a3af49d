//! Resource descriptors.
//!
//! A [`Resource`] ties an entity type and its request draft to one REST path.
//! The four marker types ([`Departments`], [`Employees`], [`Courses`],
//! [`Students`]) are what generic clients and screens are instantiated with.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::entities::{
    Choice, Course, Department, Employee, EmployeeDraft, NameDraft, Record, Reference, Student,
    StudentDraft,
};
use crate::errors::CoreError;
use crate::ids::EntityId;
use crate::route::Route;

/// The four resource collections served under `/api`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Departments,
    Employees,
    Courses,
    Students,
}

impl ResourceKind {
    /// Path segment under `/api`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Departments => "departments",
            Self::Employees => "employees",
            Self::Courses => "courses",
            Self::Students => "students",
        }
    }

    /// Capitalized singular label used in field messages (`Department`).
    #[must_use]
    pub const fn singular(self) -> &'static str {
        match self {
            Self::Departments => "Department",
            Self::Employees => "Employee",
            Self::Courses => "Course",
            Self::Students => "Student",
        }
    }

    /// Capitalized plural label used as a screen heading.
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Departments => "Departments",
            Self::Employees => "Employees",
            Self::Courses => "Courses",
            Self::Students => "Students",
        }
    }

    /// The collection this resource's records point at, if any.
    #[must_use]
    pub const fn reference(self) -> Option<Self> {
        match self {
            Self::Employees => Some(Self::Departments),
            Self::Students => Some(Self::Courses),
            Self::Departments | Self::Courses => None,
        }
    }

    /// JSON field holding the reference (`department`, `course`).
    #[must_use]
    pub const fn reference_field(self) -> Option<&'static str> {
        match self {
            Self::Employees => Some("department"),
            Self::Students => Some("course"),
            Self::Departments | Self::Courses => None,
        }
    }

    #[must_use]
    pub const fn route(self) -> Route {
        match self {
            Self::Departments => Route::Departments,
            Self::Employees => Route::Employees,
            Self::Courses => Route::Courses,
            Self::Students => Route::Students,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for ResourceKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/').to_ascii_lowercase().as_str() {
            "department" | "departments" => Ok(Self::Departments),
            "employee" | "employees" => Ok(Self::Employees),
            "course" | "courses" => Ok(Self::Courses),
            "student" | "students" => Ok(Self::Students),
            other => Err(CoreError::UnknownResource(other.to_string())),
        }
    }
}

/// Binds an entity type and its draft to a REST collection.
pub trait Resource: Send + Sync + 'static {
    const KIND: ResourceKind;

    type Entity: Record
        + Clone
        + fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    type Draft: Serialize + Clone + fmt::Debug + Send + Sync;

    /// Build the request body from form input.
    fn draft(name: String, reference: Option<EntityId>) -> Self::Draft;

    /// Embed a picked reference into an entity returned by create/update so a
    /// locally patched list can show the reference name.
    fn attach(_entity: &mut Self::Entity, _reference: &Choice) {}
}

/// Marker for `/api/departments`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Departments;

/// Marker for `/api/employees`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Employees;

/// Marker for `/api/courses`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Courses;

/// Marker for `/api/students`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Students;

impl Resource for Departments {
    const KIND: ResourceKind = ResourceKind::Departments;
    type Entity = Department;
    type Draft = NameDraft;

    fn draft(name: String, _reference: Option<EntityId>) -> NameDraft {
        NameDraft { name }
    }
}

impl Resource for Courses {
    const KIND: ResourceKind = ResourceKind::Courses;
    type Entity = Course;
    type Draft = NameDraft;

    fn draft(name: String, _reference: Option<EntityId>) -> NameDraft {
        NameDraft { name }
    }
}

impl Resource for Employees {
    const KIND: ResourceKind = ResourceKind::Employees;
    type Entity = Employee;
    type Draft = EmployeeDraft;

    fn draft(name: String, reference: Option<EntityId>) -> EmployeeDraft {
        EmployeeDraft {
            name,
            department: reference.map(|id| Reference { id }),
        }
    }

    fn attach(entity: &mut Employee, reference: &Choice) {
        entity.department = Some(Department {
            id: reference.id,
            name: reference.name.clone(),
        });
    }
}

impl Resource for Students {
    const KIND: ResourceKind = ResourceKind::Students;
    type Entity = Student;
    type Draft = StudentDraft;

    fn draft(name: String, reference: Option<EntityId>) -> StudentDraft {
        StudentDraft {
            name,
            course: reference.map(|id| Reference { id }),
        }
    }

    fn attach(entity: &mut Student, reference: &Choice) {
        entity.course = Some(Course {
            id: reference.id,
            name: reference.name.clone(),
        });
    }
}
