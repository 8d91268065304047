//! Attack resolution
//!
//! attack power  = attack × attacker terrain modifier (attacker's cell)
//! defense power = defense × defender terrain modifier × (1 + cell defense bonus)
//! damage        = max(1, round(attack power − defense power / 2))

use serde::{Deserialize, Serialize};

use crate::core::types::UnitId;
use crate::map::terrain::Terrain;
use crate::units::Unit;

/// Result of one resolved attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub damage: u32,
    pub defender_health: u32,
    pub defender_destroyed: bool,
}

/// Damage the attacker deals to the defender; always at least 1
pub fn compute_damage(
    attacker: &Unit,
    attacker_terrain: Terrain,
    defender: &Unit,
    defender_terrain: Terrain,
) -> u32 {
    let attack_power = attacker.stats.attack as f32 * attacker.terrain_modifier(attacker_terrain);
    let defense_power = defender.stats.defense as f32
        * defender.terrain_modifier(defender_terrain)
        * (1.0 + defender_terrain.defense_bonus());

    let raw = (attack_power - 0.5 * defense_power).round_ties_even();
    if raw < 1.0 {
        1
    } else {
        raw as u32
    }
}
