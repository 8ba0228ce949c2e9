//! Floor state: grid, tiles and robots

pub mod floor;
pub mod snapshot;

pub use floor::Floor;
pub use snapshot::{FloorSnapshot, ROBOT_CODE_BASE};
