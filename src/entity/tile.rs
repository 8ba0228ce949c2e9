//! Tiles - stationary floor cells holding boxes

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, RobotId, TileId};

/// What a tile currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileContents {
    #[default]
    Empty,
    /// A single unplaced box waiting to be picked up
    Loose,
    /// A deposited stack. Never picked up again, even at height 1.
    Stack(u32),
}

/// A floor tile. Every cell has exactly one, created at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub position: Position,
    pub contents: TileContents,
    /// Robot that has reserved this tile's loose box (targeted search)
    pub claimed_by: Option<RobotId>,
}

impl Tile {
    pub fn new(id: TileId, position: Position, contents: TileContents) -> Self {
        Self {
            id,
            position,
            contents,
            claimed_by: None,
        }
    }

    pub fn box_count(&self) -> u32 {
        match self.contents {
            TileContents::Empty => 0,
            TileContents::Loose => 1,
            TileContents::Stack(n) => n,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.contents == TileContents::Empty
    }

    pub fn is_loose(&self) -> bool {
        self.contents == TileContents::Loose
    }

    pub fn is_stack(&self) -> bool {
        matches!(self.contents, TileContents::Stack(n) if n > 0)
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed_by.is_some()
    }

    /// Loose and not reserved by anyone
    pub fn is_available(&self) -> bool {
        self.is_loose() && !self.is_claimed()
    }

    /// Take the loose box; returns false if there is none
    pub fn take_box(&mut self) -> bool {
        if !self.is_loose() {
            return false;
        }
        self.contents = TileContents::Empty;
        self.claimed_by = None;
        true
    }

    /// Place a stack of `count` boxes on an empty tile
    pub fn place_stack(&mut self, count: u32) -> bool {
        if !self.is_empty() || count == 0 {
            return false;
        }
        self.contents = TileContents::Stack(count);
        true
    }

    /// Reserve the loose box for `robot`; fails if already reserved or not loose
    pub fn claim(&mut self, robot: RobotId) -> bool {
        if !self.is_available() {
            return false;
        }
        self.claimed_by = Some(robot);
        true
    }

    /// Drop `robot`'s reservation. Other robots' claims are left alone.
    pub fn release(&mut self, robot: RobotId) {
        if self.claimed_by == Some(robot) {
            self.claimed_by = None;
        }
    }
}
