//! Influence map: how strongly each side projects force onto every cell
//!
//! Two scalar fields are rebuilt from scratch on every `compute`. Sources
//! flood outward breadth-first with linear decay, and overlapping sources
//! saturate (max) rather than add.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::core::config::InfluenceConfig;
use crate::core::types::PlayerId;
use crate::map::grid::HexGrid;
use crate::map::hex::HexCoord;
use crate::units::UnitRoster;

/// Which field a source writes to, relative to the queried player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Friendly,
    Enemy,
}

#[derive(Debug, Clone, Default)]
pub struct InfluenceMap {
    friendly: AHashMap<HexCoord, f32>,
    enemy: AHashMap<HexCoord, f32>,
    /// Grid coordinates in (q, r) order, captured at compute time
    order: Vec<HexCoord>,
}

impl InfluenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild both fields for `player`
    pub fn compute(
        &mut self,
        grid: &HexGrid,
        units: &UnitRoster,
        player: PlayerId,
        config: &InfluenceConfig,
    ) {
        self.friendly.clear();
        self.enemy.clear();
        self.order = grid.coords().to_vec();
        for coord in &self.order {
            self.friendly.insert(*coord, 0.0);
            self.enemy.insert(*coord, 0.0);
        }

        for unit in units.living() {
            let strength =
                config.unit_strength_factor * (unit.stats.attack + unit.stats.defense) as f32;
            let range = unit.stats.attack_range + config.unit_range_bonus;
            self.propagate(grid, unit.position, strength, side_of(unit.owner, player), range);
        }

        for cell in grid.cells() {
            if let Some(structure) = cell.structure {
                self.propagate(
                    grid,
                    cell.coord,
                    config.structure_strength,
                    side_of(structure.owner, player),
                    config.structure_range,
                );
            }
        }
    }

    fn propagate(
        &mut self,
        grid: &HexGrid,
        source: HexCoord,
        strength: f32,
        side: Side,
        range: u32,
    ) {
        if range == 0 || !grid.contains(source) {
            return;
        }

        let field = match side {
            Side::Friendly => &mut self.friendly,
            Side::Enemy => &mut self.enemy,
        };

        let mut queue = VecDeque::from([(source, 0u32)]);
        let mut visited = AHashSet::from([source]);

        while let Some((current, distance)) = queue.pop_front() {
            let decay = (1.0 - distance as f32 / range as f32).max(0.0);
            let value = strength * decay;
            let entry = field.entry(current).or_insert(0.0);
            *entry = entry.max(value);

            if distance < range {
                for neighbor in grid.neighbors(current) {
                    if visited.insert(neighbor) {
                        queue.push_back((neighbor, distance + 1));
                    }
                }
            }
        }
    }

    pub fn friendly(&self, pos: HexCoord) -> f32 {
        self.friendly.get(&pos).copied().unwrap_or(0.0)
    }

    pub fn enemy(&self, pos: HexCoord) -> f32 {
        self.enemy.get(&pos).copied().unwrap_or(0.0)
    }

    /// Positive = safe, negative = dangerous
    pub fn security(&self, pos: HexCoord) -> f32 {
        self.friendly(pos) - self.enemy(pos)
    }

    /// Cell with the highest security; first in (q, r) order wins ties
    pub fn find_safest_position(&self) -> Option<HexCoord> {
        let mut best: Option<(HexCoord, f32)> = None;
        for &coord in &self.order {
            let security = self.security(coord);
            if best.map_or(true, |(_, max)| security > max) {
                best = Some((coord, security));
            }
        }
        best.map(|(coord, _)| coord)
    }

    /// Among cells with enemy presence, the one with the lowest security
    pub fn find_weakest_enemy_position(&self) -> Option<HexCoord> {
        let mut best: Option<(HexCoord, f32)> = None;
        for &coord in self.order.iter().filter(|coord| self.enemy(**coord) > 0.0) {
            let security = self.security(coord);
            if best.map_or(true, |(_, min)| security < min) {
                best = Some((coord, security));
            }
        }
        best.map(|(coord, _)| coord)
    }
}

fn side_of(owner: PlayerId, player: PlayerId) -> Side {
    if owner == player {
        Side::Friendly
    } else {
        Side::Enemy
    }
}
