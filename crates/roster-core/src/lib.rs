//! # roster-core
//!
//! Core types shared by every Roster crate:
//! - Entity structs for departments, employees, courses and students
//! - Request drafts and the paged list envelope returned by the API
//! - Resource descriptors tying an entity type to its REST path
//! - The client-side route table and the [`Navigator`] seam
//! - Client-side validation of form input
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod ids;
pub mod page;
pub mod resource;
pub mod route;
pub mod validate;

pub use entities::{Choice, Course, Department, Employee, Record, Student};
pub use errors::CoreError;
pub use ids::EntityId;
pub use page::Page;
pub use resource::{Courses, Departments, Employees, Resource, ResourceKind, Students};
pub use route::{Navigator, Route};
