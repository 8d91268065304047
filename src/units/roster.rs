//! Roster of every unit in the match
//!
//! Units are stored in spawn order and iteration always follows it, so
//! per-turn AI decisions visit units in the same sequence every run.

use crate::core::types::{PlayerId, UnitId};
use crate::map::hex::HexCoord;
use crate::units::unit::Unit;
use crate::units::unit_type::{UnitKind, UnitStats};

#[derive(Debug, Clone, Default)]
pub struct UnitRoster {
    units: Vec<Unit>,
    next_id: u32,
}

impl UnitRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit; does not touch the grid (see `GameWorld::spawn_unit`)
    pub fn spawn(
        &mut self,
        kind: UnitKind,
        owner: PlayerId,
        position: HexCoord,
        stats: UnitStats,
    ) -> UnitId {
        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.units.push(Unit::new(id, kind, owner, position, stats));
        id
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units (dead ones included until `remove_dead`)
    pub fn iter(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    /// Living units of one player, in spawn order
    pub fn living_for(&self, player: PlayerId) -> impl Iterator<Item = &Unit> + '_ {
        self.living().filter(move |unit| unit.owner == player)
    }

    pub fn living_ids_for(&self, player: PlayerId) -> Vec<UnitId> {
        self.living_for(player).map(|unit| unit.id).collect()
    }

    pub fn count_for(&self, player: PlayerId) -> usize {
        self.living_for(player).count()
    }

    pub fn count_by_kind(&self, player: PlayerId, kind: UnitKind) -> usize {
        self.living_for(player).filter(|unit| unit.kind == kind).count()
    }

    /// Closest living unit owned by someone else; ties go to the earliest spawned
    pub fn nearest_enemy(&self, unit: &Unit) -> Option<&Unit> {
        let mut nearest: Option<(&Unit, u32)> = None;
        for other in self.living().filter(|other| other.owner != unit.owner) {
            let distance = unit.position.distance(&other.position);
            if nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((other, distance));
            }
        }
        nearest.map(|(other, _)| other)
    }

    pub fn reset_for_turn(&mut self, player: PlayerId) {
        for unit in self.units.iter_mut().filter(|u| u.owner == player && u.is_alive()) {
            unit.reset_for_turn();
        }
    }

    /// Drop dead units and return them so the caller can clear their cells
    pub fn remove_dead(&mut self) -> Vec<Unit> {
        let (living, dead): (Vec<Unit>, Vec<Unit>) =
            std::mem::take(&mut self.units).into_iter().partition(Unit::is_alive);
        self.units = living;
        dead
    }
}
