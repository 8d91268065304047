//! Hex coordinate system (axial coordinates)
//!
//! Uses axial coordinates (q, r) for easy neighbor calculation. The third
//! cube coordinate is derived as s = -q - r.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Axial hex coordinate
///
/// Ordering is lexicographic on (q, r); every deterministic scan over the
/// map relies on it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: HexCoord = HexCoord { q: 0, r: 0 };

    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Cube coordinate S (derived from q and r)
    pub fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Manhattan distance in hex space
    pub fn distance(&self, other: &Self) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Distance from the origin
    pub fn length(&self) -> u32 {
        self.distance(&Self::ORIGIN)
    }

    /// Step one hex in a direction
    pub fn step(&self, direction: HexDirection) -> Self {
        self.offset_by(direction, 1)
    }

    /// Step `count` hexes in a direction
    pub fn offset_by(&self, direction: HexDirection, count: i32) -> Self {
        let offset = direction.offset();
        Self::new(self.q + offset.q * count, self.r + offset.r * count)
    }

    /// Get all 6 neighboring hex coordinates, in `HexDirection::all()` order
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::all().map(|direction| self.step(direction))
    }

    /// Get all hexes within range (inclusive)
    pub fn hexes_in_range(&self, range: u32) -> Vec<HexCoord> {
        let range = range as i32;
        let mut results = Vec::new();
        for q in -range..=range {
            for r in (-range).max(-q - range)..=range.min(-q + range) {
                results.push(HexCoord::new(self.q + q, self.r + r));
            }
        }
        results
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}

/// Direction enum for hex neighbors
///
/// The declaration order is the fixed neighbor-enumeration order used by
/// the grid, production placement and retreat tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    East,
    NorthEast,
    NorthWest,
    West,
    SouthWest,
    SouthEast,
}

impl HexDirection {
    /// Get the hex offset for this direction
    pub fn offset(&self) -> HexCoord {
        match self {
            HexDirection::East => HexCoord::new(1, 0),
            HexDirection::NorthEast => HexCoord::new(1, -1),
            HexDirection::NorthWest => HexCoord::new(0, -1),
            HexDirection::West => HexCoord::new(-1, 0),
            HexDirection::SouthWest => HexCoord::new(-1, 1),
            HexDirection::SouthEast => HexCoord::new(0, 1),
        }
    }

    /// All directions
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::East,
            HexDirection::NorthEast,
            HexDirection::NorthWest,
            HexDirection::West,
            HexDirection::SouthWest,
            HexDirection::SouthEast,
        ]
    }
}
