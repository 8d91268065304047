//! AI player: strategic refresh and production, then one decision per unit

use serde::{Deserialize, Serialize};

use crate::ai::strategic::{ProductionOutcome, StrategicPlanner};
use crate::ai::tactical::{TacticalAi, UnitAction};
use crate::ai::PlayerController;
use crate::core::config::AiConfig;
use crate::core::types::{PlayerId, UnitId};
use crate::game::world::GameWorld;

/// Everything one AI turn did
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub player: PlayerId,
    pub production: ProductionOutcome,
    pub actions: Vec<(UnitId, UnitAction)>,
    pub cells_claimed: usize,
}

impl TurnReport {
    pub fn count_where(&self, predicate: impl Fn(&UnitAction) -> bool) -> usize {
        self.actions.iter().filter(|(_, action)| predicate(action)).count()
    }
}

#[derive(Debug, Clone)]
pub struct AiController {
    player: PlayerId,
    strategic: StrategicPlanner,
    tactical: TacticalAi,
}

impl AiController {
    pub fn new(player: PlayerId, config: &AiConfig) -> Self {
        Self {
            player,
            strategic: StrategicPlanner::new(player, config.clone()),
            tactical: TacticalAi::new(&config.tactical, &config.pathfinding),
        }
    }

    /// Run a full turn and report what happened
    ///
    /// Units produced this turn act too. Each unit claims the cell it ends
    /// its decision on.
    pub fn take_turn(&mut self, world: &mut GameWorld) -> TurnReport {
        tracing::info!(player = %self.player, "AI turn start");

        self.strategic.refresh(world);
        let production = self.strategic.decide_production(world);

        let mut actions = Vec::new();
        let mut cells_claimed = 0;
        for id in world.units.living_ids_for(self.player) {
            let Some(unit) = world.units.get(id).filter(|unit| unit.is_alive()) else {
                continue;
            };
            let objective = self.strategic.objective_for(unit);
            let action = self.tactical.execute_unit_decision(world, id, objective);

            if let Ok(position) = world.unit(id).map(|unit| unit.position) {
                if world.claim_cell(position, self.player) {
                    cells_claimed += 1;
                }
            }
            actions.push((id, action));
        }

        let report = TurnReport {
            player: self.player,
            production,
            actions,
            cells_claimed,
        };
        tracing::info!(
            player = %self.player,
            units = report.actions.len(),
            attacks = report.count_where(|a| matches!(a, UnitAction::Attack(_))),
            moves = report.count_where(|a| matches!(a, UnitAction::Move { .. })),
            retreats = report.count_where(|a| matches!(a, UnitAction::Retreat { .. })),
            cells_claimed,
            "AI turn complete"
        );
        report
    }
}

impl PlayerController for AiController {
    fn player(&self) -> PlayerId {
        self.player
    }

    fn execute_turn(&mut self, world: &mut GameWorld) {
        self.take_turn(world);
    }
}
