//! Add/edit form state shared by every entity screen.

use roster_core::validate::{FieldError, check_submission};
use roster_core::{EntityId, Record, ResourceKind};

/// Current form input plus the last validation message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub name: String,
    pub reference: Option<EntityId>,
    pub error: Option<FieldError>,
}

impl Form {
    /// Form pre-filled from an existing record.
    #[must_use]
    pub fn from_record<E: Record>(record: &E) -> Self {
        Self {
            name: record.name().to_string(),
            reference: record.reference().map(|choice| choice.id),
            error: None,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.error = None;
    }

    pub fn set_reference(&mut self, id: EntityId) {
        self.reference = Some(id);
        self.error = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Run the field checks for `kind`, recording the message on failure.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`FieldError`].
    pub fn validate(&mut self, kind: ResourceKind) -> Result<(), FieldError> {
        match check_submission(kind, &self.name, self.reference) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }
}
