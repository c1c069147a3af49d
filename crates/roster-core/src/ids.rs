//! Server-assigned entity identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the remote API.
///
/// Opaque to the client: it is only ever copied from a response into a later
/// request path or reference, never computed or mutated locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(i64);

impl EntityId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for EntityId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_bare_number() {
        let json = serde_json::to_string(&EntityId::new(42)).unwrap();
        assert_eq!(json, "42");
        let back: EntityId = serde_json::from_str("42").unwrap();
        assert_eq!(back, EntityId::new(42));
    }

    #[test]
    fn parses_from_cli_text() {
        assert_eq!(" 7 ".parse::<EntityId>().unwrap(), EntityId::new(7));
        assert!("abc".parse::<EntityId>().is_err());
    }
}
