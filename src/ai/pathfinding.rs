//! Operational path planning: tactically weighted A* and reachability
//!
//! Edge cost is the entered cell's movement cost scaled by the unit's
//! affinity for that terrain, optionally inflated by enemy threat.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;

use crate::core::config::PathfindingConfig;
use crate::map::grid::{Cell, HexGrid};
use crate::map::hex::HexCoord;
use crate::units::{Unit, UnitRoster};

/// Search node, stored in an arena and linked to its parent by index
#[derive(Debug, Clone)]
struct PathNode {
    position: HexCoord,
    parent: Option<usize>,
    g_cost: f32,
    h_cost: f32,
}

impl PathNode {
    fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost
    }
}

/// Entry in the open set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    f_cost: OrderedFloat<f32>,
    seq: u64,
    node: usize,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap; earlier insertion wins equal f
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Path queries against one consistent view of the grid and units
pub struct PathPlanner<'a> {
    grid: &'a HexGrid,
    units: &'a UnitRoster,
    config: &'a PathfindingConfig,
}

impl<'a> PathPlanner<'a> {
    pub fn new(grid: &'a HexGrid, units: &'a UnitRoster, config: &'a PathfindingConfig) -> Self {
        Self { grid, units, config }
    }

    /// A* from `start` to `goal`, both ends included
    ///
    /// Occupied cells are impassable except the goal itself. Returns None
    /// if the goal cannot be reached.
    pub fn find_path(
        &self,
        start: HexCoord,
        goal: HexCoord,
        unit: &Unit,
        avoid_enemies: bool,
    ) -> Option<Vec<HexCoord>> {
        if !self.grid.contains(start) || !self.grid.contains(goal) {
            return None;
        }

        let mut nodes = vec![PathNode {
            position: start,
            parent: None,
            g_cost: 0.0,
            h_cost: start.distance(&goal) as f32,
        }];
        let mut best_g: AHashMap<HexCoord, f32> = AHashMap::from([(start, 0.0)]);
        let mut closed: AHashSet<HexCoord> = AHashSet::new();
        let mut open = BinaryHeap::new();
        let mut seq = 0u64;
        open.push(Frontier {
            f_cost: OrderedFloat(nodes[0].f_cost()),
            seq,
            node: 0,
        });

        while let Some(Frontier { node: index, .. }) = open.pop() {
            let current = nodes[index].clone();
            if closed.contains(&current.position) {
                continue;
            }
            if current.position == goal {
                let path = reconstruct_path(&nodes, index);
                tracing::trace!(
                    %start,
                    %goal,
                    hops = path.len() - 1,
                    cost = current.g_cost,
                    "path found"
                );
                return Some(path);
            }
            closed.insert(current.position);

            for neighbor in self.grid.neighbors(current.position) {
                if closed.contains(&neighbor) {
                    continue;
                }
                let Some(cell) = self.grid.get_cell(neighbor) else {
                    continue;
                };
                if cell.is_occupied() && neighbor != goal {
                    continue;
                }

                let tentative_g = current.g_cost + self.tactical_cost(cell, unit, avoid_enemies);
                if best_g.get(&neighbor).map_or(false, |&g| tentative_g >= g) {
                    continue;
                }
                best_g.insert(neighbor, tentative_g);

                nodes.push(PathNode {
                    position: neighbor,
                    parent: Some(index),
                    g_cost: tentative_g,
                    h_cost: neighbor.distance(&goal) as f32,
                });
                seq += 1;
                open.push(Frontier {
                    f_cost: OrderedFloat(tentative_g + neighbor.distance(&goal) as f32),
                    seq,
                    node: nodes.len() - 1,
                });
            }
        }

        tracing::trace!(%start, %goal, "no path");
        None
    }

    /// Cells reachable within `budget`, each with its minimum accumulated cost
    ///
    /// Ignores enemy threat and never enters occupied cells. The start cell
    /// is not included; the result is sorted by coordinate.
    pub fn reachable_cells(
        &self,
        start: HexCoord,
        budget: u32,
        unit: &Unit,
    ) -> Vec<(HexCoord, f32)> {
        let budget = budget as f32;
        let mut visited: AHashMap<HexCoord, f32> = AHashMap::from([(start, 0.0)]);
        let mut queue = VecDeque::from([(start, 0.0f32)]);

        while let Some((current, cost)) = queue.pop_front() {
            // Stale entry: a cheaper route was found after this was queued
            if visited.get(&current).map_or(false, |&best| cost > best) {
                continue;
            }
            for neighbor in self.grid.neighbors(current) {
                let Some(cell) = self.grid.get_cell(neighbor) else {
                    continue;
                };
                if cell.is_occupied() {
                    continue;
                }
                let next = cost + self.tactical_cost(cell, unit, false);
                if next <= budget && visited.get(&neighbor).map_or(true, |&best| next < best) {
                    visited.insert(neighbor, next);
                    queue.push_back((neighbor, next));
                }
            }
        }

        visited.remove(&start);
        let mut reachable: Vec<(HexCoord, f32)> = visited.into_iter().collect();
        reachable.sort_by_key(|(coord, _)| *coord);
        reachable
    }

    /// Cost of entering `cell` for this unit
    pub fn tactical_cost(&self, cell: &Cell, unit: &Unit, avoid_enemies: bool) -> f32 {
        let mut cost = cell.movement_cost() as f32 / unit.terrain_modifier(cell.terrain);
        if avoid_enemies {
            cost += self.config.threat_weight * self.threat_at(cell.coord, unit);
        }
        cost
    }

    /// Sum of `1 / max(distance, 1)` over living enemies that have `pos` in attack range
    pub fn threat_at(&self, pos: HexCoord, unit: &Unit) -> f32 {
        self.units
            .living()
            .filter(|other| other.owner != unit.owner)
            .filter_map(|enemy| {
                let distance = pos.distance(&enemy.position);
                (distance <= enemy.stats.attack_range).then(|| 1.0 / distance.max(1) as f32)
            })
            .sum()
    }
}

fn reconstruct_path(nodes: &[PathNode], end: usize) -> Vec<HexCoord> {
    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(index) = current {
        path.push(nodes[index].position);
        current = nodes[index].parent;
    }
    path.reverse();
    path
}
