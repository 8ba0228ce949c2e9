use thiserror::Error;

use crate::core::types::Position;

#[derive(Error, Debug)]
pub enum SimError {
    /// Placement or movement outside the floor. The movement policies only
    /// offer in-bounds cells, so seeing this means the floor is inconsistent.
    #[error("Invalid position: ({x}, {y})")]
    InvalidPosition { x: i32, y: i32 },

    #[error("Occupant not indexed on the grid: {0}")]
    UnknownOccupant(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid_position(pos: Position) -> Self {
        SimError::InvalidPosition { x: pos.x, y: pos.y }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
