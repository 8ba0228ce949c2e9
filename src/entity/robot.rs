//! Robots - mobile agents that ferry boxes into stacks

use serde::{Deserialize, Serialize};

use crate::core::types::{Position, RobotId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub id: RobotId,
    pub position: Position,
    /// Boxes currently held, 0..=capacity
    pub carried: u32,
    pub capacity: u32,
    /// Cells traversed per axis; a diagonal step counts twice
    pub move_count: u64,
    /// Reserved loose-box tile (targeted search only)
    pub target: Option<Position>,
}

impl Robot {
    pub fn new(id: RobotId, position: Position, capacity: u32) -> Self {
        Self {
            id,
            position,
            carried: 0,
            capacity,
            move_count: 0,
            target: None,
        }
    }

    /// Carrying a full stack load
    pub fn is_full(&self) -> bool {
        self.carried > 0 && self.carried == self.capacity
    }

    pub fn has_room(&self) -> bool {
        self.carried < self.capacity
    }

    pub fn is_loaded(&self) -> bool {
        self.carried > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_room() {
        let mut robot = Robot::new(RobotId(0), Position::new(1, 1), 2);
        assert!(robot.has_room());
        assert!(!robot.is_full());
        robot.carried = 2;
        assert!(robot.is_full());
        assert!(!robot.has_room());
    }

    #[test]
    fn test_zero_capacity_is_never_full() {
        let robot = Robot::new(RobotId(0), Position::new(0, 0), 0);
        assert!(!robot.is_full());
        assert!(!robot.has_room());
    }
}
