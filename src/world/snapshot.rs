//! Read-only one-number-per-cell view of the floor

use serde::{Deserialize, Serialize};

/// Robot cells report `ROBOT_CODE_BASE - carried`
pub const ROBOT_CODE_BASE: i32 = 11;

/// Row-major cell codes for consumers such as renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSnapshot {
    pub width: u32,
    pub height: u32,
    pub codes: Vec<i32>,
}

impl FloorSnapshot {
    pub fn new(width: u32, height: u32, codes: Vec<i32>) -> Self {
        Self { width, height, codes }
    }

    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x < self.width && y < self.height {
            self.codes.get((y * self.width + x) as usize).copied()
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.codes.chunks(self.width.max(1) as usize)
    }

    /// Plain text grid, one row per line
    pub fn render_text(&self) -> String {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(|c| format!("{c:>3}"))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
