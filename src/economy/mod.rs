//! Resources, costs and production structures

pub mod resources;
pub mod structure;

pub use resources::{Cost, PlayerResources, ResourceKind, ResourceLedger};
pub use structure::{Structure, StructureKind};
