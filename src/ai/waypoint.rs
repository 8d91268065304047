//! Strategic waypoints: the ranked objectives handed to units each turn

use serde::{Deserialize, Serialize};

use crate::ai::influence::InfluenceMap;
use crate::core::config::WaypointConfig;
use crate::core::types::PlayerId;
use crate::map::grid::HexGrid;
use crate::map::hex::HexCoord;
use crate::units::{Unit, UnitRoster};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WaypointType {
    Attack,
    Defense,
    Resource,
    Rally,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TacticalWaypoint {
    pub position: HexCoord,
    pub kind: WaypointType,
    pub priority: i32,
    pub active: bool,
}

impl TacticalWaypoint {
    pub fn new(position: HexCoord, kind: WaypointType, priority: i32) -> Self {
        Self {
            position,
            kind,
            priority,
            active: true,
        }
    }

    /// Desirability of this waypoint for one unit
    ///
    /// `priority * weight - distance`, plus a bonus that pulls weakened
    /// units toward defense/rally and healthy ones toward attack/resources.
    pub fn score_for(&self, unit: &Unit, config: &WaypointConfig) -> f32 {
        let distance = unit.position.distance(&self.position) as f32;
        let mut score = self.priority as f32 * config.priority_weight - distance;

        let low_health = unit.health_fraction() < config.low_health_fraction;
        match (low_health, self.kind) {
            (true, WaypointType::Defense | WaypointType::Rally) => score += config.low_health_bonus,
            (false, WaypointType::Attack | WaypointType::Resource) => score += config.healthy_bonus,
            _ => {}
        }
        score
    }
}

/// The objectives for one player for one turn
///
/// Rebuilt wholesale every strategic cycle; iteration order is construction
/// order (Attack, Defense, Resources, Rally).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaypointSet {
    waypoints: Vec<TacticalWaypoint>,
}

impl WaypointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the waypoint set for `player` from a freshly computed influence map
    pub fn rebuild(
        grid: &HexGrid,
        units: &UnitRoster,
        influence: &InfluenceMap,
        player: PlayerId,
        config: &WaypointConfig,
    ) -> Self {
        let mut set = Self::new();
        let centroid = army_centroid(units, player);

        if let Some(weakest) = influence.find_weakest_enemy_position() {
            let attack =
                TacticalWaypoint::new(weakest, WaypointType::Attack, config.attack_priority);
            set.push(grid, attack);
        }

        if let Some(safest) = influence.find_safest_position() {
            let defense =
                TacticalWaypoint::new(safest, WaypointType::Defense, config.defense_priority);
            set.push(grid, defense);
        }

        let mut deposits: Vec<HexCoord> = grid
            .cells()
            .filter(|cell| cell.has_resource() && !cell.is_owned_by(player))
            .map(|cell| cell.coord)
            .collect();
        // Stable: equal distances keep grid order
        deposits.sort_by_key(|coord| coord.distance(&centroid));
        for coord in deposits.into_iter().take(config.max_resource_waypoints) {
            let resource =
                TacticalWaypoint::new(coord, WaypointType::Resource, config.resource_priority);
            set.push(grid, resource);
        }

        set.push(grid, TacticalWaypoint::new(centroid, WaypointType::Rally, config.rally_priority));
        set
    }

    /// Append a waypoint; one that is not on the grid is kept but inactive
    pub fn push(&mut self, grid: &HexGrid, mut waypoint: TacticalWaypoint) {
        if !grid.contains(waypoint.position) {
            waypoint.active = false;
        }
        self.waypoints.push(waypoint);
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TacticalWaypoint> + '_ {
        self.waypoints.iter()
    }

    pub fn count_of(&self, kind: WaypointType) -> usize {
        self.waypoints.iter().filter(|w| w.kind == kind).count()
    }

    /// Highest-scoring active waypoint; the earliest wins exact ties
    pub fn best_for(&self, unit: &Unit, config: &WaypointConfig) -> Option<&TacticalWaypoint> {
        let mut best: Option<(&TacticalWaypoint, f32)> = None;
        for waypoint in self.waypoints.iter().filter(|w| w.active) {
            let score = waypoint.score_for(unit, config);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((waypoint, score));
            }
        }
        best.map(|(waypoint, _)| waypoint)
    }
}

/// Truncated mean position of the player's living units, origin if none
pub fn army_centroid(units: &UnitRoster, player: PlayerId) -> HexCoord {
    let (mut sum_q, mut sum_r, mut count) = (0i64, 0i64, 0i64);
    for unit in units.living_for(player) {
        sum_q += unit.position.q as i64;
        sum_r += unit.position.r as i64;
        count += 1;
    }
    if count == 0 {
        return HexCoord::ORIGIN;
    }
    HexCoord::new((sum_q / count) as i32, (sum_r / count) as i32)
}
