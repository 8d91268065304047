//! The world service object: grid, units, resources and the unit catalog
//!
//! Every mutation that touches more than one collaborator (moving a unit
//! updates both the roster and cell occupancy) goes through here so the two
//! never disagree.

use crate::combat::{compute_damage, AttackOutcome};
use crate::core::error::{HexfrontError, Result};
use crate::core::types::{PlayerId, UnitId};
use crate::economy::ResourceLedger;
use crate::map::grid::HexGrid;
use crate::map::hex::HexCoord;
use crate::units::{Unit, UnitCatalog, UnitKind, UnitRoster};

#[derive(Debug, Clone, Default)]
pub struct GameWorld {
    pub grid: HexGrid,
    pub units: UnitRoster,
    pub resources: ResourceLedger,
    pub catalog: UnitCatalog,
}

impl GameWorld {
    pub fn new(grid: HexGrid, catalog: UnitCatalog) -> Self {
        Self {
            grid,
            units: UnitRoster::new(),
            resources: ResourceLedger::new(),
            catalog,
        }
    }

    pub fn unit(&self, id: UnitId) -> Result<&Unit> {
        self.units.get(id).ok_or(HexfrontError::UnitNotFound(id))
    }

    /// Place a new unit on a free cell
    pub fn spawn_unit(&mut self, kind: UnitKind, owner: PlayerId, at: HexCoord) -> Result<UnitId> {
        let cell = self
            .grid
            .get_cell(at)
            .ok_or(HexfrontError::InvalidCoordinate(at))?;
        if cell.is_occupied() {
            return Err(HexfrontError::CellOccupied(at));
        }

        let stats = self.catalog.stats(kind).clone();
        let id = self.units.spawn(kind, owner, at, stats);
        if let Some(cell) = self.grid.get_cell_mut(at) {
            cell.occupant = Some(id);
        }
        Ok(id)
    }

    /// Move a unit to a free cell, spending `cost` movement
    pub fn move_unit(&mut self, id: UnitId, to: HexCoord, cost: u32) -> Result<()> {
        let target = self
            .grid
            .get_cell(to)
            .ok_or(HexfrontError::InvalidCoordinate(to))?;
        if target.occupant.is_some_and(|occupant| occupant != id) {
            return Err(HexfrontError::CellOccupied(to));
        }

        let unit = self.units.get_mut(id).ok_or(HexfrontError::UnitNotFound(id))?;
        let from = unit.position;
        unit.move_to(to, cost);

        if let Some(cell) = self.grid.get_cell_mut(from) {
            if cell.occupant == Some(id) {
                cell.occupant = None;
            }
        }
        if let Some(cell) = self.grid.get_cell_mut(to) {
            cell.occupant = Some(id);
        }
        Ok(())
    }

    /// Resolve an attack using the terrain each side stands on
    ///
    /// Range and the attacked-this-turn flag are the caller's concern.
    pub fn resolve_attack(
        &mut self,
        attacker_id: UnitId,
        defender_id: UnitId,
    ) -> Result<AttackOutcome> {
        let attacker = self.unit(attacker_id)?;
        let defender = self.unit(defender_id)?;
        let attacker_terrain = self
            .grid
            .get_cell(attacker.position)
            .ok_or(HexfrontError::InvalidCoordinate(attacker.position))?
            .terrain;
        let defender_terrain = self
            .grid
            .get_cell(defender.position)
            .ok_or(HexfrontError::InvalidCoordinate(defender.position))?
            .terrain;

        let damage = compute_damage(attacker, attacker_terrain, defender, defender_terrain);

        let defender = self
            .units
            .get_mut(defender_id)
            .ok_or(HexfrontError::UnitNotFound(defender_id))?;
        defender.take_damage(damage);
        let defender_health = defender.health;

        if let Some(attacker) = self.units.get_mut(attacker_id) {
            attacker.mark_attacked();
        }

        Ok(AttackOutcome {
            attacker: attacker_id,
            defender: defender_id,
            damage,
            defender_health,
            defender_destroyed: defender_health == 0,
        })
    }

    /// Take ownership of a cell; returns true if the owner changed
    pub fn claim_cell(&mut self, at: HexCoord, player: PlayerId) -> bool {
        match self.grid.get_cell_mut(at) {
            Some(cell) if cell.owner != Some(player) => {
                cell.owner = Some(player);
                true
            }
            _ => false,
        }
    }

    /// Remove dead units from the roster and free their cells
    pub fn remove_dead_units(&mut self) -> Vec<Unit> {
        let dead = self.units.remove_dead();
        for unit in &dead {
            if let Some(cell) = self.grid.get_cell_mut(unit.position) {
                if cell.occupant == Some(unit.id) {
                    cell.occupant = None;
                }
            }
        }
        dead
    }
}
