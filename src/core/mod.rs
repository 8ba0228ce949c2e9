pub mod config;
pub mod error;
pub mod types;

pub use config::{CapacityPolicy, MovementStrategy, StorageConfig};
pub use error::{Result, SimError};
pub use types::{Position, RobotId, Tick, TileId};
