//! Match-level services: the world, setup, turn order and the headless runner

pub mod setup;
pub mod simulation;
pub mod turn;
pub mod world;

pub use setup::{setup_world, spawn_centres};
pub use simulation::{run_match, GameSnapshot, MatchOutput, MatchStats, PlayerSnapshot};
pub use turn::TurnManager;
pub use world::GameWorld;
