//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a player (faction)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Identifier for a unit
///
/// Ids are handed out sequentially by the roster, so ordering by id is
/// spawn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}", self.0)
    }
}

/// Full-round turn counter (starts at 1)
pub type TurnNumber = u32;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_equality() {
        assert_eq!(PlayerId(1), PlayerId::new(1));
        assert_ne!(PlayerId(1), PlayerId(2));
    }

    #[test]
    fn test_unit_id_orders_by_spawn() {
        assert!(UnitId(3) < UnitId(7));
    }

    #[test]
    fn test_display() {
        assert_eq!(PlayerId(0).to_string(), "P0");
        assert_eq!(UnitId(12).to_string(), "U12");
    }
}
