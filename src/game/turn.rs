//! Turn sequencing and victory by territorial control

use serde::{Deserialize, Serialize};

use crate::core::config::MatchConfig;
use crate::core::types::{PlayerId, TurnNumber};
use crate::game::world::GameWorld;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnManager {
    players: u32,
    current_player: PlayerId,
    turn_number: TurnNumber,
    victory_fraction: f32,
    income_per_cell: u32,
    winner: Option<PlayerId>,
}

impl TurnManager {
    pub fn new(rules: &MatchConfig) -> Self {
        Self {
            players: rules.players,
            current_player: PlayerId(0),
            turn_number: 1,
            victory_fraction: rules.victory_control_fraction,
            income_per_cell: rules.income_per_resource_cell,
            winner: None,
        }
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn turn_number(&self) -> TurnNumber {
        self.turn_number
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Reset to turn 1, player 0, and begin that player's turn
    pub fn start(&mut self, world: &mut GameWorld) -> Option<PlayerId> {
        self.current_player = PlayerId(0);
        self.turn_number = 1;
        self.winner = None;
        self.begin_player_turn(world)
    }

    /// Refresh the current player's units, pay income, then check victory
    pub fn begin_player_turn(&mut self, world: &mut GameWorld) -> Option<PlayerId> {
        let player = self.current_player;
        tracing::debug!(turn = self.turn_number, %player, "begin player turn");

        world.units.reset_for_turn(player);
        let income = world
            .resources
            .collect_income(&world.grid, player, self.income_per_cell);
        tracing::debug!(%player, ?income, "income collected");

        if self.check_victory(world, player) {
            tracing::info!(turn = self.turn_number, %player, "victory by territorial control");
            self.winner = Some(player);
        }
        self.winner
    }

    /// Clear the dead, pass to the next player and begin their turn
    pub fn end_turn(&mut self, world: &mut GameWorld) -> Option<PlayerId> {
        let dead = world.remove_dead_units();
        if !dead.is_empty() {
            tracing::debug!(removed = dead.len(), "dead units cleaned up");
        }

        self.current_player = PlayerId((self.current_player.0 + 1) % self.players.max(1));
        if self.current_player == PlayerId(0) {
            self.turn_number += 1;
        }
        self.begin_player_turn(world)
    }

    /// Whether `player` owns at least the victory fraction of all cells
    pub fn check_victory(&self, world: &GameWorld, player: PlayerId) -> bool {
        let total = world.grid.len();
        if total == 0 {
            return false;
        }
        let controlled = world.grid.owned_count(player);
        controlled as f32 / total as f32 >= self.victory_fraction
    }
}
