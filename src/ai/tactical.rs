//! Tactical layer: the per-unit decision tree and its leaves
//!
//! Priority order, first match wins: retreat when badly hurt with an enemy
//! close, attack an enemy in range, advance on the strategic objective,
//! otherwise hold position.

use serde::{Deserialize, Serialize};

use crate::ai::behavior_tree::{BehaviorNode, LeafRunner, NodeStatus};
use crate::ai::pathfinding::PathPlanner;
use crate::combat::AttackOutcome;
use crate::core::config::{PathfindingConfig, TacticalConfig};
use crate::core::types::UnitId;
use crate::game::world::GameWorld;
use crate::map::hex::HexCoord;
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TacticalLeaf {
    // Conditions
    IsHealthLow { threshold: f32 },
    IsEnemyNearby { range: u32 },
    CanAttackEnemy,
    HasObjective,
    // Actions
    AttackEnemy,
    MoveToObjective,
    Retreat,
    DefendPosition,
}

/// Scratch state for one unit's decision; discarded afterwards
#[derive(Debug, Clone, Default)]
pub struct TacticalContext {
    /// Looked up again through the roster whenever it is used
    pub nearest_enemy: Option<UnitId>,
    pub health_low: bool,
    pub objective: Option<HexCoord>,
}

impl TacticalContext {
    pub fn new(objective: Option<HexCoord>) -> Self {
        Self {
            objective,
            ..Self::default()
        }
    }

    pub fn has_objective(&self) -> bool {
        self.objective.is_some()
    }
}

/// What a unit ended up doing this turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnitAction {
    Retreat { from: HexCoord, to: HexCoord },
    Attack(AttackOutcome),
    Move { from: HexCoord, to: HexCoord, steps: u32 },
    Defend,
}

/// The standard tree
pub fn decision_tree(config: &TacticalConfig) -> BehaviorNode<TacticalLeaf> {
    use TacticalLeaf::*;

    BehaviorNode::selector([
        BehaviorNode::sequence([
            BehaviorNode::leaf(IsHealthLow {
                threshold: config.retreat_health_fraction,
            }),
            BehaviorNode::leaf(IsEnemyNearby {
                range: config.retreat_trigger_range,
            }),
            BehaviorNode::leaf(Retreat),
        ]),
        BehaviorNode::sequence([
            BehaviorNode::leaf(IsEnemyNearby {
                range: config.engage_range,
            }),
            BehaviorNode::leaf(CanAttackEnemy),
            BehaviorNode::leaf(AttackEnemy),
        ]),
        BehaviorNode::sequence([
            BehaviorNode::leaf(HasObjective),
            BehaviorNode::leaf(MoveToObjective),
        ]),
        BehaviorNode::leaf(DefendPosition),
    ])
}

#[derive(Debug, Clone)]
pub struct TacticalAi {
    tree: BehaviorNode<TacticalLeaf>,
    pathfinding: PathfindingConfig,
}

impl TacticalAi {
    pub fn new(tactical: &TacticalConfig, pathfinding: &PathfindingConfig) -> Self {
        Self {
            tree: decision_tree(tactical),
            pathfinding: pathfinding.clone(),
        }
    }

    /// Evaluate the tree for one unit and apply the chosen action to the world
    pub fn execute_unit_decision(
        &self,
        world: &mut GameWorld,
        unit: UnitId,
        objective: Option<HexCoord>,
    ) -> UnitAction {
        let mut executor = LeafExecutor {
            world,
            unit,
            pathfinding: &self.pathfinding,
            context: TacticalContext::new(objective),
            action: None,
        };
        let status = self.tree.evaluate(&mut executor);
        let action = executor.action.unwrap_or(UnitAction::Defend);
        tracing::debug!(%unit, ?status, ?action, "unit decision");
        action
    }
}

/// Runs tactical leaves for a single unit against the world
struct LeafExecutor<'a> {
    world: &'a mut GameWorld,
    unit: UnitId,
    pathfinding: &'a PathfindingConfig,
    context: TacticalContext,
    action: Option<UnitAction>,
}

impl LeafRunner<TacticalLeaf> for LeafExecutor<'_> {
    fn run(&mut self, leaf: &TacticalLeaf) -> NodeStatus {
        let passed = match *leaf {
            TacticalLeaf::IsHealthLow { threshold } => self.is_health_low(threshold),
            TacticalLeaf::IsEnemyNearby { range } => self.is_enemy_nearby(range),
            TacticalLeaf::CanAttackEnemy => self.can_attack_enemy(),
            TacticalLeaf::HasObjective => self.context.has_objective(),
            TacticalLeaf::AttackEnemy => self.attack_enemy(),
            TacticalLeaf::MoveToObjective => self.move_to_objective(),
            TacticalLeaf::Retreat => self.retreat(),
            TacticalLeaf::DefendPosition => {
                self.action = Some(UnitAction::Defend);
                true
            }
        };
        if passed {
            NodeStatus::Success
        } else {
            NodeStatus::Failure
        }
    }
}

impl LeafExecutor<'_> {
    fn unit(&self) -> Option<&Unit> {
        self.world.units.get(self.unit).filter(|unit| unit.is_alive())
    }

    fn nearest_enemy(&self) -> Option<&Unit> {
        self.context
            .nearest_enemy
            .and_then(|id| self.world.units.get(id))
            .filter(|enemy| enemy.is_alive())
    }

    fn is_health_low(&mut self, threshold: f32) -> bool {
        let low = self.unit().is_some_and(|unit| unit.health_fraction() < threshold);
        self.context.health_low = low;
        low
    }

    fn is_enemy_nearby(&mut self, range: u32) -> bool {
        let Some(unit) = self.unit() else {
            return false;
        };
        let Some((enemy, distance)) = self
            .world
            .units
            .nearest_enemy(unit)
            .map(|enemy| (enemy.id, unit.position.distance(&enemy.position)))
        else {
            return false;
        };
        self.context.nearest_enemy = Some(enemy);
        distance <= range
    }

    fn can_attack_enemy(&self) -> bool {
        match (self.unit(), self.nearest_enemy()) {
            (Some(unit), Some(enemy)) => unit.can_attack(enemy.position),
            _ => false,
        }
    }

    fn attack_enemy(&mut self) -> bool {
        if !self.can_attack_enemy() {
            return false;
        }
        let Some(target) = self.context.nearest_enemy else {
            return false;
        };
        match self.world.resolve_attack(self.unit, target) {
            Ok(outcome) => {
                tracing::debug!(
                    attacker = %outcome.attacker,
                    defender = %outcome.defender,
                    damage = outcome.damage,
                    destroyed = outcome.defender_destroyed,
                    "attack"
                );
                self.action = Some(UnitAction::Attack(outcome));
                true
            }
            Err(err) => {
                tracing::debug!(unit = %self.unit, %err, "attack failed");
                false
            }
        }
    }

    /// Walk toward the objective as far as movement and occupancy allow
    fn move_to_objective(&mut self) -> bool {
        let Some(objective) = self.context.objective else {
            return false;
        };
        let Some(unit) = self.unit().filter(|unit| unit.can_move()) else {
            return false;
        };
        let from = unit.position;
        let planner = PathPlanner::new(&self.world.grid, &self.world.units, self.pathfinding);
        let Some(path) = planner.find_path(from, objective, unit, true) else {
            return false;
        };

        let mut steps = 0;
        for &hop in path.iter().skip(1) {
            if !self.try_step(hop) {
                break;
            }
            steps += 1;
        }

        if steps == 0 {
            return false;
        }
        let to = self.unit().map_or(from, |unit| unit.position);
        self.action = Some(UnitAction::Move { from, to, steps });
        true
    }

    /// Step away from the nearest enemy onto the free neighbour farthest from it
    fn retreat(&mut self) -> bool {
        let Some(unit) = self.unit().filter(|unit| unit.can_move()) else {
            return false;
        };
        let Some(threat) = self.nearest_enemy().map(|enemy| enemy.position) else {
            return false;
        };
        let from = unit.position;

        let mut target = None;
        let mut farthest = from.distance(&threat);
        for neighbor in self.world.grid.neighbors(from) {
            if self.world.grid.is_occupied(neighbor) {
                continue;
            }
            let distance = neighbor.distance(&threat);
            if distance > farthest {
                farthest = distance;
                target = Some(neighbor);
            }
        }
        let Some(target) = target else {
            return false;
        };

        let planner = PathPlanner::new(&self.world.grid, &self.world.units, self.pathfinding);
        let Some(next) = planner
            .find_path(from, target, unit, true)
            .and_then(|path| path.get(1).copied())
        else {
            return false;
        };

        if !self.try_step(next) {
            return false;
        }
        tracing::debug!(unit = %self.unit, %from, to = %next, "retreat");
        self.action = Some(UnitAction::Retreat { from, to: next });
        true
    }

    /// Move one hop if the cell is free and affordable
    fn try_step(&mut self, hop: HexCoord) -> bool {
        let Some(remaining) = self.unit().map(|unit| unit.remaining_movement) else {
            return false;
        };
        let Some(cell) = self.world.grid.get_cell(hop) else {
            return false;
        };
        let cost = cell.movement_cost();
        if remaining == 0 || cell.is_occupied() || cost > remaining {
            return false;
        }
        match self.world.move_unit(self.unit, hop, cost) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(unit = %self.unit, %err, "step failed");
                false
            }
        }
    }
}
