//! Hex map: coordinates, terrain, the cell grid, and seeded generation

pub mod generation;
pub mod grid;
pub mod hex;
pub mod terrain;

pub use generation::generate_map;
pub use grid::{Cell, HexGrid};
pub use hex::{HexCoord, HexDirection};
pub use terrain::Terrain;
