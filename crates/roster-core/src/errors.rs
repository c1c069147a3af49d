//! Cross-cutting error types for Roster.
//!
//! Transport, auth and configuration errors live in their own crates; this
//! module only covers failures that can be detected without any I/O.

use thiserror::Error;

use crate::validate::FieldError;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Form input failed a client-side check.
    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("unknown resource: {0}")]
    UnknownResource(String),

    #[error("unknown route: {0}")]
    UnknownRoute(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ResourceKind;
    use crate::validate::check_submission;

    #[test]
    fn field_error_converts_with_its_message() {
        let field = check_submission(ResourceKind::Employees, "Ada", None).unwrap_err();
        let err = CoreError::from(field.clone());
        assert!(matches!(&err, CoreError::Validation(inner) if *inner == field));
        assert_eq!(err.to_string(), "Please select a department");
    }
}
