//! Three-level AI: strategic planning, tactical behavior trees and
//! operational pathfinding
//!
//! Architecture: Trait + Data hybrid
//! - PlayerController trait is the seam the turn loop drives
//! - Decision trees and waypoints are plain data
//! - Every mutation goes through the GameWorld service object

pub mod behavior_tree;
pub mod controller;
pub mod influence;
pub mod pathfinding;
pub mod strategic;
pub mod tactical;
pub mod waypoint;

pub use behavior_tree::{BehaviorNode, LeafRunner, NodeStatus};
pub use controller::{AiController, TurnReport};
pub use influence::InfluenceMap;
pub use pathfinding::PathPlanner;
pub use strategic::{ProductionOutcome, SkipReason, StrategicPlanner};
pub use tactical::{decision_tree, TacticalAi, TacticalContext, TacticalLeaf, UnitAction};
pub use waypoint::{TacticalWaypoint, WaypointSet, WaypointType};

use crate::core::types::PlayerId;
use crate::game::world::GameWorld;

/// Anything that can play a turn for one player
pub trait PlayerController {
    fn player(&self) -> PlayerId;

    /// Play this player's whole turn against the world
    fn execute_turn(&mut self, world: &mut GameWorld);
}
