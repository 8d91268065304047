//! Unit kinds and their stat blocks

use serde::{Deserialize, Serialize};

use crate::core::error::{HexfrontError, Result};
use crate::economy::Cost;
use crate::map::terrain::Terrain;

/// Type of military unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Infantry,  // Balanced
    Cavalry,   // Fast, fragile
    Artillery, // Long range, slow
}

impl UnitKind {
    pub fn all() -> [UnitKind; 3] {
        [UnitKind::Infantry, UnitKind::Cavalry, UnitKind::Artillery]
    }
}

/// Static properties shared by every unit of a kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub attack: u32,
    pub defense: u32,
    pub max_health: u32,
    /// Movement points per turn
    pub movement: u32,
    /// Attack range in hexes
    pub attack_range: u32,
    pub preferred_terrain: Terrain,
    pub penalized_terrain: Terrain,
    pub cost: Cost,
}

impl UnitStats {
    /// Combat and movement multiplier on a terrain (1.2 preferred, 0.8 penalized)
    pub fn terrain_modifier(&self, terrain: Terrain) -> f32 {
        if terrain == self.preferred_terrain {
            1.2
        } else if terrain == self.penalized_terrain {
            0.8
        } else {
            1.0
        }
    }

    pub fn infantry() -> Self {
        Self {
            attack: 10,
            defense: 10,
            max_health: 100,
            movement: 3,
            attack_range: 1,
            preferred_terrain: Terrain::Forest,
            penalized_terrain: Terrain::Mountain,
            cost: Cost::new(20, 10, 20),
        }
    }

    pub fn cavalry() -> Self {
        Self {
            attack: 14,
            defense: 6,
            max_health: 80,
            movement: 5,
            attack_range: 1,
            preferred_terrain: Terrain::Plains,
            penalized_terrain: Terrain::Forest,
            cost: Cost::new(10, 30, 30),
        }
    }

    pub fn artillery() -> Self {
        Self {
            attack: 18,
            defense: 4,
            max_health: 60,
            movement: 2,
            attack_range: 3,
            preferred_terrain: Terrain::Plains,
            penalized_terrain: Terrain::Mountain,
            cost: Cost::new(30, 40, 10),
        }
    }
}

/// Stat blocks for every unit kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitCatalog {
    pub infantry: UnitStats,
    pub cavalry: UnitStats,
    pub artillery: UnitStats,
}

impl Default for UnitCatalog {
    fn default() -> Self {
        Self {
            infantry: UnitStats::infantry(),
            cavalry: UnitStats::cavalry(),
            artillery: UnitStats::artillery(),
        }
    }
}

impl UnitCatalog {
    pub fn stats(&self, kind: UnitKind) -> &UnitStats {
        match kind {
            UnitKind::Infantry => &self.infantry,
            UnitKind::Cavalry => &self.cavalry,
            UnitKind::Artillery => &self.artillery,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for kind in UnitKind::all() {
            let stats = self.stats(kind);
            if stats.max_health == 0 {
                return Err(HexfrontError::InvalidConfig(format!(
                    "{kind:?} max_health must be positive"
                )));
            }
            if stats.preferred_terrain == stats.penalized_terrain {
                return Err(HexfrontError::InvalidConfig(format!(
                    "{kind:?} cannot prefer and be penalized on {:?}",
                    stats.preferred_terrain
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terrain_modifier() {
        let stats = UnitStats::cavalry();
        assert_eq!(stats.terrain_modifier(Terrain::Plains), 1.2);
        assert_eq!(stats.terrain_modifier(Terrain::Forest), 0.8);
        assert_eq!(stats.terrain_modifier(Terrain::Mountain), 1.0);
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = UnitCatalog::default();
        assert_eq!(catalog.stats(UnitKind::Artillery).attack_range, 3);
        let cavalry = catalog.stats(UnitKind::Cavalry);
        assert!(cavalry.movement > catalog.stats(UnitKind::Infantry).movement);
    }

    #[test]
    fn test_default_catalog_valid() {
        assert!(UnitCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_catalog_rejects_conflicting_terrain() {
        let mut catalog = UnitCatalog::default();
        catalog.infantry.penalized_terrain = catalog.infantry.preferred_terrain;
        assert!(catalog.validate().is_err());
    }
}
