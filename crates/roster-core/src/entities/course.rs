use serde::{Deserialize, Serialize};

use super::Record;
use crate::ids::EntityId;

/// A course. Referenced by students.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: EntityId,
    pub name: String,
}

impl Record for Course {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
