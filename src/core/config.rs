//! Simulation configuration with documented constants
//!
//! The defaults reproduce the classic setup: five robots, stacks of at most
//! five boxes, at most five stack tiles, and a radius-3 search window for
//! the targeted movement strategy.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, SimError};

/// Default number of robots placed on the floor
pub const DEFAULT_ROBOT_COUNT: u32 = 5;

/// Default cap on the number of distinct stack tiles
pub const DEFAULT_MAX_STACKS: u32 = 5;

/// Default cap on boxes per stack (and per robot load)
pub const DEFAULT_MAX_STACK_HEIGHT: u32 = 5;

/// Default Chebyshev radius scanned by targeted search
pub const DEFAULT_SEARCH_RADIUS: u32 = 3;

/// Default RNG seed, so an unconfigured run is still reproducible
pub const DEFAULT_SEED: u64 = 12345;

/// How a robot relocates when it can neither deposit nor pick up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStrategy {
    /// Uniform choice among in-bounds orthogonal neighbour cells
    #[default]
    RandomWalk,
    /// Reserve a nearby loose box and walk toward it (diagonal steps allowed)
    TargetedSearch,
}

impl FromStr for MovementStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "random_walk" | "random" => Ok(MovementStrategy::RandomWalk),
            "targeted_search" | "targeted" => Ok(MovementStrategy::TargetedSearch),
            other => Err(format!(
                "unknown movement strategy '{other}' (expected random-walk or targeted-search)"
            )),
        }
    }
}

/// How robot load capacity is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityPolicy {
    /// Every robot carries exactly this many boxes per stack
    Fixed(u32),
    /// `min(max_stack_height, ceil(K / max_stacks))`
    #[default]
    #[serde(rename = "derived")]
    DerivedFromTotal,
}

/// Configuration for a storage simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub width: u32,
    pub height: u32,
    /// K: loose boxes scattered at construction
    pub total_boxes: u32,
    pub robot_count: u32,
    pub seed: u64,
    pub movement: MovementStrategy,
    pub capacity: CapacityPolicy,
    /// Most stack tiles the derived capacity is willing to produce
    pub max_stacks: u32,
    /// Tallest stack a tile may hold
    pub max_stack_height: u32,
    /// Chebyshev radius of the targeted-search scan
    pub search_radius: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            total_boxes: 25,
            robot_count: DEFAULT_ROBOT_COUNT,
            seed: DEFAULT_SEED,
            movement: MovementStrategy::RandomWalk,
            capacity: CapacityPolicy::DerivedFromTotal,
            max_stacks: DEFAULT_MAX_STACKS,
            max_stack_height: DEFAULT_MAX_STACK_HEIGHT,
            search_radius: DEFAULT_SEARCH_RADIUS,
        }
    }
}

impl StorageConfig {
    /// Default config with the floor size and box count overridden
    pub fn new(width: u32, height: u32, total_boxes: u32) -> Self {
        Self {
            width,
            height,
            total_boxes,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_movement(mut self, movement: MovementStrategy) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_capacity(mut self, capacity: CapacityPolicy) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_robot_count(mut self, robot_count: u32) -> Self {
        self.robot_count = robot_count;
        self
    }

    pub fn cell_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Per-robot load capacity under the configured policy
    pub fn robot_capacity(&self) -> u32 {
        match self.capacity {
            CapacityPolicy::Fixed(n) => n,
            CapacityPolicy::DerivedFromTotal => {
                derived_capacity(self.total_boxes, self.max_stacks, self.max_stack_height)
            }
        }
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "floor must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }

        // Positions are i32 on the wire
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(SimError::InvalidConfig("floor dimensions too large".into()));
        }

        if self.total_boxes as u64 > self.cell_count() {
            return Err(SimError::InvalidConfig(format!(
                "total_boxes ({}) exceeds the {} cells of a {}x{} floor",
                self.total_boxes,
                self.cell_count(),
                self.width,
                self.height
            )));
        }

        if self.max_stacks == 0 || self.max_stack_height == 0 {
            return Err(SimError::InvalidConfig(
                "max_stacks and max_stack_height must be positive".into(),
            ));
        }

        if self.search_radius == 0 {
            return Err(SimError::InvalidConfig("search_radius must be positive".into()));
        }

        if let CapacityPolicy::Fixed(n) = self.capacity {
            if n == 0 || n > self.max_stack_height {
                return Err(SimError::InvalidConfig(format!(
                    "fixed capacity ({}) must be in 1..={}",
                    n, self.max_stack_height
                )));
            }
        }

        Ok(())
    }

    /// Parse a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: StorageConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// `min(max_stack_height, ceil(total_boxes / max_stacks))`
///
/// Keeps the number of full stacks needed for every box at or below
/// `max_stacks` whenever that is achievable. Zero boxes gives zero capacity.
pub fn derived_capacity(total_boxes: u32, max_stacks: u32, max_stack_height: u32) -> u32 {
    if max_stacks == 0 {
        return 0;
    }
    total_boxes.div_ceil(max_stacks).min(max_stack_height)
}
