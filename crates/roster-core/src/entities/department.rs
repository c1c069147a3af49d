use serde::{Deserialize, Serialize};

use super::Record;
use crate::ids::EntityId;

/// A department. Referenced by employees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub id: EntityId,
    pub name: String,
}

impl Record for Department {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
