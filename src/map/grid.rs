//! Hex grid with terrain, occupancy, ownership, resources and structures
//!
//! The grid is bookkeeping only: it answers lookups and keeps a sorted
//! coordinate list so every scan over the map visits cells in the same
//! (q, r) order.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, UnitId};
use crate::economy::{ResourceKind, Structure};
use crate::map::hex::HexCoord;
use crate::map::terrain::Terrain;

/// A single cell on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub coord: HexCoord,
    pub terrain: Terrain,
    pub occupant: Option<UnitId>,
    /// `None` = neutral
    pub owner: Option<PlayerId>,
    pub resource: Option<ResourceKind>,
    pub structure: Option<Structure>,
}

impl Cell {
    pub fn new(coord: HexCoord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            occupant: None,
            owner: None,
            resource: None,
            structure: None,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn has_resource(&self) -> bool {
        self.resource.is_some()
    }

    pub fn has_structure(&self) -> bool {
        self.structure.is_some()
    }

    pub fn is_owned_by(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    pub fn movement_cost(&self) -> u32 {
        self.terrain.movement_cost()
    }

    pub fn defense_bonus(&self) -> f32 {
        self.terrain.defense_bonus()
    }
}

/// The full map
#[derive(Debug, Clone, Default)]
pub struct HexGrid {
    cells: AHashMap<HexCoord, Cell>,
    /// All coordinates, sorted by (q, r)
    order: Vec<HexCoord>,
}

impl HexGrid {
    /// Create a hexagonal map of plains: every (q, r) with |q|, |r|, |s| <= radius
    pub fn hexagon(radius: u32) -> Self {
        Self::from_cells(
            HexCoord::ORIGIN
                .hexes_in_range(radius)
                .into_iter()
                .map(|coord| Cell::new(coord, Terrain::Plains)),
        )
    }

    /// Build a grid from arbitrary cells (later duplicates replace earlier ones)
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let cells: AHashMap<HexCoord, Cell> =
            cells.into_iter().map(|cell| (cell.coord, cell)).collect();
        let mut order: Vec<HexCoord> = cells.keys().copied().collect();
        order.sort();
        Self { cells, order }
    }

    /// Get a cell at the given coordinate
    pub fn get_cell(&self, coord: HexCoord) -> Option<&Cell> {
        self.cells.get(&coord)
    }

    /// Get a mutable cell at the given coordinate
    pub fn get_cell_mut(&mut self, coord: HexCoord) -> Option<&mut Cell> {
        self.cells.get_mut(&coord)
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.cells.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Neighbors that exist on the map, in fixed direction order
    pub fn neighbors(&self, coord: HexCoord) -> Vec<HexCoord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// All coordinates in (q, r) order
    pub fn coords(&self) -> &[HexCoord] {
        &self.order
    }

    /// All cells in (q, r) order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.order.iter().filter_map(|coord| self.cells.get(coord))
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.get_cell(coord).is_some_and(Cell::is_occupied)
    }

    /// Set terrain at a coordinate
    pub fn set_terrain(&mut self, coord: HexCoord, terrain: Terrain) {
        if let Some(cell) = self.get_cell_mut(coord) {
            cell.terrain = terrain;
        }
    }

    /// Place a resource deposit at a coordinate
    pub fn set_resource(&mut self, coord: HexCoord, resource: Option<ResourceKind>) {
        if let Some(cell) = self.get_cell_mut(coord) {
            cell.resource = resource;
        }
    }

    /// Place a structure; the cell becomes owned by the structure's owner
    pub fn place_structure(&mut self, coord: HexCoord, structure: Structure) {
        if let Some(cell) = self.get_cell_mut(coord) {
            cell.owner = Some(structure.owner);
            cell.structure = Some(structure);
        }
    }

    pub fn set_owner(&mut self, coord: HexCoord, owner: Option<PlayerId>) {
        if let Some(cell) = self.get_cell_mut(coord) {
            cell.owner = owner;
        }
    }

    /// Number of cells owned by a player
    pub fn owned_count(&self, player: PlayerId) -> usize {
        self.cells.values().filter(|cell| cell.is_owned_by(player)).count()
    }
}
