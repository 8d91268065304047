//! Production structures

use serde::{Deserialize, Serialize};

use crate::core::types::PlayerId;
use crate::economy::resources::Cost;
use crate::units::UnitKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Barracks, // Infantry and cavalry
    Factory,  // Artillery
}

impl StructureKind {
    /// Structure kind that can produce the given unit kind
    pub fn producing(unit: UnitKind) -> Self {
        match unit {
            UnitKind::Infantry | UnitKind::Cavalry => StructureKind::Barracks,
            UnitKind::Artillery => StructureKind::Factory,
        }
    }

    pub fn produces(&self, unit: UnitKind) -> bool {
        Self::producing(unit) == *self
    }

    /// Build cost
    pub fn cost(&self) -> Cost {
        match self {
            StructureKind::Barracks => Cost::new(50, 30, 20),
            StructureKind::Factory => Cost::new(80, 60, 30),
        }
    }
}

/// A structure standing on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub owner: PlayerId,
}

impl Structure {
    pub fn new(kind: StructureKind, owner: PlayerId) -> Self {
        Self { kind, owner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barracks_produces_infantry_and_cavalry() {
        assert!(StructureKind::Barracks.produces(UnitKind::Infantry));
        assert!(StructureKind::Barracks.produces(UnitKind::Cavalry));
        assert!(!StructureKind::Barracks.produces(UnitKind::Artillery));
    }

    #[test]
    fn test_factory_produces_artillery() {
        assert!(StructureKind::Factory.produces(UnitKind::Artillery));
        assert_eq!(StructureKind::producing(UnitKind::Artillery), StructureKind::Factory);
    }

    #[test]
    fn test_factory_costs_more() {
        let barracks = StructureKind::Barracks.cost();
        let factory = StructureKind::Factory.cost();
        assert!(factory.wood > barracks.wood && factory.gold > barracks.gold);
    }
}
