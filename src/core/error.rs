use thiserror::Error;

use crate::core::types::UnitId;
use crate::map::hex::HexCoord;

#[derive(Error, Debug)]
pub enum HexfrontError {
    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("Coordinate is not on the map: {0}")]
    InvalidCoordinate(HexCoord),

    #[error("Cell already occupied: {0}")]
    CellOccupied(HexCoord),

    #[error("Cannot afford: {0}")]
    InsufficientResources(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HexfrontError>;
