use serde::{Deserialize, Serialize};

use super::{Choice, Course, Record};
use crate::ids::EntityId;

/// A student, optionally enrolled in a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Student {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub course: Option<Course>,
}

impl Record for Student {
    fn id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn reference(&self) -> Option<Choice> {
        self.course.as_ref().map(Choice::of)
    }
}
