//! Client-side form validation.
//!
//! The only rules are "name is non-empty" and, for employees and students,
//! "a reference is selected". Checks run before any request is built; a
//! failure means no network call happens.

use serde::Serialize;
use thiserror::Error;

use crate::ids::EntityId;
use crate::resource::ResourceKind;

/// Which form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Reference,
}

/// A field-level validation failure with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

/// Check a create/update submission for `kind`.
///
/// The name is checked first; at most one error is reported per call.
///
/// # Errors
///
/// Returns a [`FieldError`] for an empty name, or for a missing reference on
/// resources that require one.
pub fn check_submission(
    kind: ResourceKind,
    name: &str,
    reference: Option<EntityId>,
) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError {
            field: Field::Name,
            message: format!("{} name cannot be empty", kind.singular()),
        });
    }
    if let Some(target) = kind.reference()
        && reference.is_none()
    {
        return Err(FieldError {
            field: Field::Reference,
            message: format!(
                "Please select a {}",
                target.singular().to_ascii_lowercase()
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ResourceKind::Departments, "Department name cannot be empty")]
    #[case(ResourceKind::Employees, "Employee name cannot be empty")]
    #[case(ResourceKind::Courses, "Course name cannot be empty")]
    #[case(ResourceKind::Students, "Student name cannot be empty")]
    fn empty_name_is_rejected(#[case] kind: ResourceKind, #[case] message: &str) {
        let err = check_submission(kind, "", Some(EntityId::new(1))).unwrap_err();
        assert_eq!(err.field, Field::Name);
        assert_eq!(err.message, message);
    }

    #[test]
    fn name_checked_before_reference() {
        let err = check_submission(ResourceKind::Employees, "", None).unwrap_err();
        assert_eq!(err.field, Field::Name);
    }

    #[rstest]
    #[case(ResourceKind::Employees, "Please select a department")]
    #[case(ResourceKind::Students, "Please select a course")]
    fn dependents_require_reference(#[case] kind: ResourceKind, #[case] message: &str) {
        let err = check_submission(kind, "Ada", None).unwrap_err();
        assert_eq!(err.field, Field::Reference);
        assert_eq!(err.to_string(), message);
    }

    #[test]
    fn whitespace_name_passes() {
        // Only the empty string is rejected; no trimming happens client-side.
        assert!(check_submission(ResourceKind::Courses, " ", None).is_ok());
    }

    #[test]
    fn independent_resources_ignore_reference() {
        assert!(check_submission(ResourceKind::Departments, "Sales", None).is_ok());
    }
}
