//! Hexfront - three-level AI for a hex-grid turn-based strategy game
//!
//! Strategic planning (influence map, waypoints, production) feeds a
//! per-unit behavior tree, which drives tactically weighted pathfinding.

pub mod ai;
pub mod combat;
pub mod core;
pub mod economy;
pub mod game;
pub mod map;
pub mod units;
