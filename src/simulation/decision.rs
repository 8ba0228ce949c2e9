//! Per-robot decision rule
//!
//! Each tick a robot looks at the tiles on its own cell and the four
//! orthogonal cells around it and takes the first rule that applies:
//! 1. full load and an empty tile nearby: deposit the whole load as a stack
//! 2. room left and a loose box nearby: pick it up
//! 3. otherwise: move, using the configured movement strategy
//!
//! Decisions only read the floor. They are turned into mutations later by
//! the tick's apply phase.

use rand_chacha::ChaCha8Rng;

use crate::core::config::{MovementStrategy, StorageConfig};
use crate::core::types::Position;
use crate::entity::{Robot, Tile};
use crate::simulation::movement;
use crate::spatial::Neighborhood;
use crate::world::Floor;

/// What a robot intends to do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Unload the full carried stack onto the empty tile at `at`
    Deposit { at: Position },
    /// Take the loose box from the tile at `at`
    PickUp { at: Position },
    /// Random-walk step to an orthogonal neighbour cell
    Walk { to: Position },
    /// Reserve the loose box at `target` and take the first step toward it
    Claim { target: Position, to: Position },
    /// Keep heading for the already reserved target
    Approach { to: Position },
    /// Nothing to do: no neighbour cell, or no unreserved box in range
    Idle,
}

/// Knobs of the decision rule that come from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionRules {
    pub movement: MovementStrategy,
    pub search_radius: u32,
}

impl DecisionRules {
    pub fn from_config(config: &StorageConfig) -> Self {
        Self {
            movement: config.movement,
            search_radius: config.search_radius,
        }
    }
}

/// Pick this tick's intent for `robot` against the floor as it stands
pub fn decide(floor: &Floor, robot: &Robot, rules: &DecisionRules, rng: &mut ChaCha8Rng) -> Intent {
    let nearby: Vec<&Tile> = floor
        .tiles_near(robot.position, Neighborhood::orthogonal(true))
        .collect();

    if robot.is_full() {
        if let Some(tile) = nearby.iter().find(|t| t.is_empty()) {
            return Intent::Deposit { at: tile.position };
        }
    }

    if robot.has_room() {
        if let Some(tile) = nearby.iter().find(|t| t.is_loose()) {
            return Intent::PickUp { at: tile.position };
        }
    }

    match rules.movement {
        MovementStrategy::RandomWalk => movement::random_walk(floor, robot, rng),
        MovementStrategy::TargetedSearch => {
            movement::targeted_search(floor, robot, rules.search_radius)
        }
    }
}
