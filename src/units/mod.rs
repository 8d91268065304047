//! Unit definitions, unit state, and the roster of all units in play

pub mod roster;
pub mod unit;
pub mod unit_type;

pub use roster::UnitRoster;
pub use unit::Unit;
pub use unit_type::{UnitCatalog, UnitKind, UnitStats};
