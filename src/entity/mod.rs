//! Floor occupants: tiles and robots

pub mod robot;
pub mod tile;

pub use robot::Robot;
pub use tile::{Tile, TileContents};

use serde::{Deserialize, Serialize};

use crate::core::types::{RobotId, TileId};

/// A grid occupant, tagged so neighbour scans can filter by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Occupant {
    Tile(TileId),
    Robot(RobotId),
}

impl Occupant {
    pub fn as_tile(&self) -> Option<TileId> {
        match self {
            Occupant::Tile(id) => Some(*id),
            Occupant::Robot(_) => None,
        }
    }

    pub fn as_robot(&self) -> Option<RobotId> {
        match self {
            Occupant::Robot(id) => Some(*id),
            Occupant::Tile(_) => None,
        }
    }
}

impl std::fmt::Display for Occupant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Occupant::Tile(id) => write!(f, "tile#{}", id.0),
            Occupant::Robot(id) => write!(f, "{}", id),
        }
    }
}
