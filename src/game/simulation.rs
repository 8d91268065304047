//! Headless AI-vs-AI match runner

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::ai::{AiController, ProductionOutcome, TurnReport, UnitAction};
use crate::core::config::GameConfig;
use crate::core::error::Result;
use crate::core::types::{PlayerId, TurnNumber};
use crate::economy::PlayerResources;
use crate::game::setup::setup_world;
use crate::game::turn::TurnManager;
use crate::game::world::GameWorld;

/// One player's standing at a point in the match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub resources: PlayerResources,
    pub units: usize,
    pub controlled_cells: usize,
}

/// Pull-style view of the match for presentation layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub turn: TurnNumber,
    pub current_player: PlayerId,
    pub players: Vec<PlayerSnapshot>,
}

impl GameSnapshot {
    pub fn capture(world: &GameWorld, turns: &TurnManager, players: u32) -> Self {
        Self {
            turn: turns.turn_number(),
            current_player: turns.current_player(),
            players: (0..players)
                .map(PlayerId)
                .map(|player| PlayerSnapshot {
                    player,
                    resources: world.resources.resources(player),
                    units: world.units.count_for(player),
                    controlled_cells: world.grid.owned_count(player),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub player_turns: u32,
    pub attacks: u32,
    pub moves: u32,
    pub retreats: u32,
    pub units_produced: u32,
    pub units_destroyed: u32,
    pub simulation_time_ms: u64,
}

impl MatchStats {
    fn record(&mut self, report: &TurnReport) {
        self.player_turns += 1;
        for (_, action) in &report.actions {
            match action {
                UnitAction::Attack(outcome) => {
                    self.attacks += 1;
                    if outcome.defender_destroyed {
                        self.units_destroyed += 1;
                    }
                }
                UnitAction::Move { .. } => self.moves += 1,
                UnitAction::Retreat { .. } => self.retreats += 1,
                UnitAction::Defend => {}
            }
        }
        if matches!(report.production, ProductionOutcome::Produced { .. }) {
            self.units_produced += 1;
        }
    }
}

/// Complete match output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutput {
    pub seed: u64,
    pub radius: u32,
    pub turns_played: TurnNumber,
    pub winner: Option<PlayerId>,
    /// One snapshot at the start of every round
    pub snapshots: Vec<GameSnapshot>,
    pub final_state: GameSnapshot,
    pub statistics: MatchStats,
}

impl MatchOutput {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn summary(&self) -> String {
        let outcome = match self.winner {
            Some(player) => format!("{player} wins"),
            None => "no winner".to_string(),
        };
        let mut lines = vec![
            format!(
                "Played {} turns on a radius-{} map (seed {}) in {}ms: {}",
                self.turns_played,
                self.radius,
                self.seed,
                self.statistics.simulation_time_ms,
                outcome
            ),
            format!(
                "{} attacks, {} moves, {} retreats, {} produced, {} destroyed",
                self.statistics.attacks,
                self.statistics.moves,
                self.statistics.retreats,
                self.statistics.units_produced,
                self.statistics.units_destroyed
            ),
        ];
        for p in &self.final_state.players {
            lines.push(format!(
                "  {}: {} units, {} cells, wood {} gold {} food {}",
                p.player,
                p.units,
                p.controlled_cells,
                p.resources.wood,
                p.resources.gold,
                p.resources.food
            ));
        }
        lines.join("\n")
    }
}

/// Run an all-AI match until someone controls enough of the map or the
/// turn limit runs out
pub fn run_match(config: &GameConfig) -> Result<MatchOutput> {
    config.validate()?;
    let start = Instant::now();
    let rules = &config.match_rules;

    let mut world = setup_world(config)?;
    let mut controllers: Vec<AiController> = (0..rules.players)
        .map(|i| AiController::new(PlayerId(i), &config.ai))
        .collect();
    let mut turns = TurnManager::new(rules);
    let mut stats = MatchStats::default();
    let mut snapshots = Vec::new();

    tracing::info!(
        seed = config.map.seed,
        radius = config.map.radius,
        players = rules.players,
        "match start"
    );

    let mut winner = turns.start(&mut world);
    while winner.is_none() && turns.turn_number() <= rules.max_turns {
        let player = turns.current_player();
        if player == PlayerId(0) {
            snapshots.push(GameSnapshot::capture(&world, &turns, rules.players));
        }

        let Some(controller) = controllers.get_mut(player.0 as usize) else {
            break;
        };
        let report = controller.take_turn(&mut world);
        stats.record(&report);

        winner = turns.end_turn(&mut world);
    }

    let turns_played = turns.turn_number().min(rules.max_turns);
    stats.simulation_time_ms = start.elapsed().as_millis() as u64;
    let final_state = GameSnapshot::capture(&world, &turns, rules.players);

    match winner {
        Some(player) => tracing::info!(%player, turns = turns_played, "match over"),
        None => tracing::info!(turns = turns_played, "match over without a winner"),
    }

    Ok(MatchOutput {
        seed: config.map.seed,
        radius: config.map.radius,
        turns_played,
        winner,
        snapshots,
        final_state,
        statistics: stats,
    })
}
