pub mod resolution;

pub use resolution::{compute_damage, AttackOutcome};
