//! Game and AI configuration with documented constants
//!
//! Every tuning number the AI uses lives here so a match can be re-tuned
//! from `data/hexfront.toml` without touching code. Nothing in this module
//! is global: callers construct a `GameConfig` and pass it down.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{HexfrontError, Result};
use crate::units::UnitCatalog;

/// Influence field construction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluenceConfig {
    /// Unit source strength = factor × (attack + defense)
    pub unit_strength_factor: f32,
    /// Unit propagation range = attack range + this bonus
    pub unit_range_bonus: u32,
    /// Source strength of any structure
    pub structure_strength: f32,
    /// Propagation range of any structure
    pub structure_range: u32,
}

impl Default for InfluenceConfig {
    fn default() -> Self {
        Self {
            unit_strength_factor: 0.5,
            unit_range_bonus: 2,
            structure_strength: 5.0,
            structure_range: 3,
        }
    }
}

/// Waypoint priorities and objective scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    pub attack_priority: i32,
    pub defense_priority: i32,
    pub resource_priority: i32,
    pub rally_priority: i32,
    /// At most this many resource waypoints per rebuild
    pub max_resource_waypoints: usize,
    /// score = priority × weight − distance + situational bonus
    pub priority_weight: f32,
    /// Below this health fraction a unit prefers Defense/Rally
    pub low_health_fraction: f32,
    pub low_health_bonus: f32,
    pub healthy_bonus: f32,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            attack_priority: 8,
            defense_priority: 6,
            resource_priority: 7,
            rally_priority: 5,
            max_resource_waypoints: 2,
            priority_weight: 10.0,
            low_health_fraction: 0.5,
            low_health_bonus: 20.0,
            healthy_bonus: 15.0,
        }
    }
}

/// Behavior tree thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalConfig {
    /// Health fraction under which a unit considers retreating
    pub retreat_health_fraction: f32,
    /// Enemy distance (hexes) that triggers a retreat for a weak unit
    pub retreat_trigger_range: u32,
    /// Enemy distance (hexes) inside which a unit looks for an attack
    pub engage_range: u32,
}

impl Default for TacticalConfig {
    fn default() -> Self {
        Self {
            retreat_health_fraction: 0.3,
            retreat_trigger_range: 3,
            engage_range: 5,
        }
    }
}

/// Operational path planner weights
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathfindingConfig {
    /// Extra edge cost per unit of enemy threat when avoiding enemies
    pub threat_weight: f32,
}

impl Default for PathfindingConfig {
    fn default() -> Self {
        Self { threat_weight: 2.0 }
    }
}

/// Production heuristics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    /// Below this many units, always build infantry
    pub minimum_army: usize,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self { minimum_army: 3 }
    }
}

/// All AI tuning, grouped by hierarchy level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub influence: InfluenceConfig,
    pub waypoints: WaypointConfig,
    pub tactical: TacticalConfig,
    pub pathfinding: PathfindingConfig,
    pub production: ProductionConfig,
}

/// Map generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Hexagonal map radius (cells with |q|, |r|, |s| <= radius)
    pub radius: u32,
    pub seed: u64,
    pub mountain_frequency: f32,
    pub forest_frequency: f32,
    /// Chance that a cell carries a resource deposit
    pub resource_chance: f32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            radius: 5,
            seed: 12345,
            mountain_frequency: 0.3,
            forest_frequency: 0.4,
            resource_chance: 0.1,
        }
    }
}

/// Starting resources for each player
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StartingResources {
    pub wood: u32,
    pub gold: u32,
    pub food: u32,
}

impl Default for StartingResources {
    fn default() -> Self {
        Self {
            wood: 150,
            gold: 150,
            food: 150,
        }
    }
}

/// Match rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub players: u32,
    pub starting_units: usize,
    pub starting_resources: StartingResources,
    /// Full rounds before the match is declared a draw
    pub max_turns: u32,
    /// Fraction of the map a player must own to win
    pub victory_control_fraction: f32,
    /// Income per owned resource cell per turn
    pub income_per_resource_cell: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            players: 2,
            starting_units: 2,
            starting_resources: StartingResources::default(),
            max_turns: 50,
            victory_control_fraction: 0.6,
            income_per_resource_cell: 5,
        }
    }
}

/// Complete configuration for a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub ai: AiConfig,
    pub units: UnitCatalog,
    pub map: MapConfig,
    #[serde(rename = "match")]
    pub match_rules: MatchConfig,
}

impl GameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML text and validate
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let fraction = |name: &str, value: f32| -> Result<()> {
            if value > 0.0 && value <= 1.0 {
                Ok(())
            } else {
                Err(HexfrontError::InvalidConfig(format!(
                    "{name} ({value}) must be in (0, 1]"
                )))
            }
        };

        fraction("tactical.retreat_health_fraction", self.ai.tactical.retreat_health_fraction)?;
        fraction("waypoints.low_health_fraction", self.ai.waypoints.low_health_fraction)?;
        fraction("match.victory_control_fraction", self.match_rules.victory_control_fraction)?;

        if self.ai.influence.structure_range == 0 {
            return Err(HexfrontError::InvalidConfig(
                "influence.structure_range must be positive".into(),
            ));
        }
        let influence = &self.ai.influence;
        if influence.unit_strength_factor < 0.0 || influence.structure_strength < 0.0 {
            return Err(HexfrontError::InvalidConfig(
                "influence strengths must not be negative".into(),
            ));
        }
        if self.ai.pathfinding.threat_weight < 0.0 {
            return Err(HexfrontError::InvalidConfig(
                "pathfinding.threat_weight must not be negative".into(),
            ));
        }
        if self.ai.tactical.retreat_trigger_range > self.ai.tactical.engage_range {
            return Err(HexfrontError::InvalidConfig(format!(
                "tactical.retreat_trigger_range ({}) should be <= engage_range ({})",
                self.ai.tactical.retreat_trigger_range, self.ai.tactical.engage_range
            )));
        }

        if !(2..=6).contains(&self.match_rules.players) {
            return Err(HexfrontError::InvalidConfig(format!(
                "match.players ({}) must be between 2 and 6",
                self.match_rules.players
            )));
        }
        if self.match_rules.starting_units > 6 {
            return Err(HexfrontError::InvalidConfig(
                "match.starting_units cannot exceed the 6 cells around a spawn point".into(),
            ));
        }
        // Spawn centres sit on the ring at radius - 2 and need a full neighbour ring
        if self.map.radius < 3 {
            return Err(HexfrontError::InvalidConfig(format!(
                "map.radius ({}) must be at least 3",
                self.map.radius
            )));
        }

        self.units.validate()
    }
}

/// Load and validate a configuration file
pub fn load_config(path: impl AsRef<Path>) -> Result<GameConfig> {
    let contents = fs::read_to_string(path.as_ref())?;
    GameConfig::from_toml_str(&contents)
}
