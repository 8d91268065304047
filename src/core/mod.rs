pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, AiConfig, GameConfig};
pub use error::{HexfrontError, Result};
pub use types::{PlayerId, TurnNumber, UnitId};
