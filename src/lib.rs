//! Stack Robots - warehouse floor simulation
//!
//! Robots wander a grid of tiles, pick up loose boxes and deposit them as
//! stacks of bounded height, one synchronised tick at a time.

pub mod core;
pub mod entity;
pub mod simulation;
pub mod spatial;
pub mod world;

pub use crate::core::{CapacityPolicy, MovementStrategy, Position, Result, RobotId, SimError, StorageConfig};
pub use crate::simulation::{RunSummary, StorageSimulation};
pub use crate::world::FloorSnapshot;
