use serde::{Deserialize, Serialize};

use super::{Choice, Department, Record};
use crate::ids::EntityId;

/// An employee, optionally attached to a department.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub department: Option<Department>,
}

impl Record for Employee {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<Choice> {
        self.department.as_ref().map(Choice::of)
    }
}
