//! Per-player resource ledger

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{HexfrontError, Result};
use crate::core::types::PlayerId;
use crate::map::grid::HexGrid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Wood,
    Gold,
    Food,
}

/// Price of a unit or structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cost {
    pub wood: u32,
    pub gold: u32,
    pub food: u32,
}

impl Cost {
    pub fn new(wood: u32, gold: u32, food: u32) -> Self {
        Self { wood, gold, food }
    }
}

/// Resources held by one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerResources {
    pub wood: u32,
    pub gold: u32,
    pub food: u32,
}

impl PlayerResources {
    pub fn new(wood: u32, gold: u32, food: u32) -> Self {
        Self { wood, gold, food }
    }

    pub fn covers(&self, cost: &Cost) -> bool {
        self.wood >= cost.wood && self.gold >= cost.gold && self.food >= cost.food
    }

    fn add_kind(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Wood => self.wood += amount,
            ResourceKind::Gold => self.gold += amount,
            ResourceKind::Food => self.food += amount,
        }
    }
}

/// Resource accounts for every player
///
/// Players that were never initialized hold nothing.
#[derive(Debug, Clone, Default)]
pub struct ResourceLedger {
    accounts: AHashMap<PlayerId, PlayerResources>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a player's starting stock (replaces any existing account)
    pub fn init_player(&mut self, player: PlayerId, resources: PlayerResources) {
        self.accounts.insert(player, resources);
    }

    pub fn resources(&self, player: PlayerId) -> PlayerResources {
        self.accounts.get(&player).copied().unwrap_or_default()
    }

    pub fn can_afford(&self, player: PlayerId, cost: &Cost) -> bool {
        self.resources(player).covers(cost)
    }

    /// Deduct a cost; fails without touching the account if it cannot be covered
    pub fn pay(&mut self, player: PlayerId, cost: &Cost) -> Result<()> {
        let account = self.accounts.entry(player).or_default();
        if !account.covers(cost) {
            return Err(HexfrontError::InsufficientResources(format!(
                "{player} holds {account:?}, needs {cost:?}"
            )));
        }
        account.wood -= cost.wood;
        account.gold -= cost.gold;
        account.food -= cost.food;
        Ok(())
    }

    pub fn add(&mut self, player: PlayerId, wood: u32, gold: u32, food: u32) {
        let account = self.accounts.entry(player).or_default();
        account.wood += wood;
        account.gold += gold;
        account.food += food;
    }

    /// Credit income for every resource cell the player owns; returns the gain
    pub fn collect_income(
        &mut self,
        grid: &HexGrid,
        player: PlayerId,
        per_cell: u32,
    ) -> PlayerResources {
        let mut gained = PlayerResources::default();
        for cell in grid.cells().filter(|cell| cell.is_owned_by(player)) {
            if let Some(kind) = cell.resource {
                gained.add_kind(kind, per_cell);
            }
        }
        self.add(player, gained.wood, gained.gold, gained.food);
        gained
    }
}
