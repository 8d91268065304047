//! A single unit on the map

use serde::{Deserialize, Serialize};

use crate::core::types::{PlayerId, UnitId};
use crate::map::hex::HexCoord;
use crate::map::terrain::Terrain;
use crate::units::unit_type::{UnitKind, UnitStats};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub owner: PlayerId,
    pub position: HexCoord,
    pub health: u32,
    pub remaining_movement: u32,
    pub has_attacked: bool,
    pub stats: UnitStats,
}

impl Unit {
    /// Fresh unit at full health and full movement
    pub fn new(
        id: UnitId,
        kind: UnitKind,
        owner: PlayerId,
        position: HexCoord,
        stats: UnitStats,
    ) -> Self {
        Self {
            id,
            kind,
            owner,
            position,
            health: stats.max_health,
            remaining_movement: stats.movement,
            has_attacked: false,
            stats,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Current health as a fraction of max health
    pub fn health_fraction(&self) -> f32 {
        if self.stats.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.stats.max_health as f32
    }

    pub fn can_move(&self) -> bool {
        self.remaining_movement > 0
    }

    /// Not yet attacked this turn and the target is within attack range
    pub fn can_attack(&self, target: HexCoord) -> bool {
        !self.has_attacked && self.position.distance(&target) <= self.stats.attack_range
    }

    pub fn terrain_modifier(&self, terrain: Terrain) -> f32 {
        self.stats.terrain_modifier(terrain)
    }

    /// Relocate and spend movement (never below zero)
    pub fn move_to(&mut self, position: HexCoord, cost: u32) {
        self.position = position;
        self.remaining_movement = self.remaining_movement.saturating_sub(cost);
    }

    /// Health is floored at zero
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn mark_attacked(&mut self) {
        self.has_attacked = true;
    }

    pub fn reset_for_turn(&mut self) {
        self.remaining_movement = self.stats.movement;
        self.has_attacked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn infantry_at(q: i32, r: i32) -> Unit {
        Unit::new(
            UnitId(0),
            UnitKind::Infantry,
            PlayerId(0),
            HexCoord::new(q, r),
            UnitStats::infantry(),
        )
    }

    #[test]
    fn test_new_unit_is_fresh() {
        let unit = infantry_at(0, 0);
        assert!(unit.is_alive());
        assert_eq!(unit.health_fraction(), 1.0);
        assert_eq!(unit.remaining_movement, 3);
        assert!(!unit.has_attacked);
    }

    #[test]
    fn test_take_damage_floors_at_zero() {
        let mut unit = infantry_at(0, 0);
        unit.take_damage(30);
        assert_eq!(unit.health, 70);
        unit.take_damage(500);
        assert_eq!(unit.health, 0);
        assert!(!unit.is_alive());
    }

    #[test]
    fn test_move_spends_movement() {
        let mut unit = infantry_at(0, 0);
        unit.move_to(HexCoord::new(1, 0), 2);
        assert_eq!(unit.position, HexCoord::new(1, 0));
        assert_eq!(unit.remaining_movement, 1);
        assert!(unit.can_move());
        unit.move_to(HexCoord::new(2, 0), 5);
        assert_eq!(unit.remaining_movement, 0);
        assert!(!unit.can_move());
    }

    #[test]
    fn test_can_attack_respects_range_and_flag() {
        let mut unit = infantry_at(0, 0);
        assert!(unit.can_attack(HexCoord::new(1, 0)));
        assert!(!unit.can_attack(HexCoord::new(2, 0)));
        unit.mark_attacked();
        assert!(!unit.can_attack(HexCoord::new(1, 0)));
    }

    #[test]
    fn test_reset_for_turn() {
        let mut unit = infantry_at(0, 0);
        unit.move_to(HexCoord::new(1, 0), 3);
        unit.mark_attacked();
        unit.reset_for_turn();
        assert_eq!(unit.remaining_movement, 3);
        assert!(!unit.has_attacked);
    }
}
