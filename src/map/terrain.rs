//! Terrain types and their effects

use serde::{Deserialize, Serialize};

/// Terrain of a map cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Plains,   // No modifiers
    Forest,   // Slower, some cover
    Mountain, // Slowest, best cover
}

impl Terrain {
    /// Movement points spent to enter a cell of this terrain
    pub fn movement_cost(&self) -> u32 {
        match self {
            Terrain::Plains => 1,
            Terrain::Forest => 2,
            Terrain::Mountain => 3,
        }
    }

    /// Multiplicative defense bonus for a defender standing here
    pub fn defense_bonus(&self) -> f32 {
        match self {
            Terrain::Plains => 0.0,
            Terrain::Forest => 0.2,
            Terrain::Mountain => 0.4,
        }
    }
}
