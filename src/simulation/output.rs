//! Tick reports and run summaries

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;
use crate::world::FloorSnapshot;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: Tick,
    pub deposits: u32,
    pub pickups: u32,
    /// Robots that changed cell
    pub moves: u32,
    pub claims: u32,
    /// Robots that reached their reserved target
    pub arrivals: u32,
    pub idles: u32,
    /// Intents dropped because a lower-id robot got there first
    pub conflicts: u32,
}

impl TickReport {
    pub fn new(tick: Tick) -> Self {
        Self {
            tick,
            ..Self::default()
        }
    }
}

/// Outcome of the end-of-run forced collection pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectSummary {
    pub robots_unloaded: u32,
    pub boxes_deposited: u32,
    /// Loaded robots with no empty tile on or next to their cell
    pub robots_stranded: u32,
}

/// Complete result of a driven run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub ticks: Tick,
    /// No loose box was left when stepping stopped
    pub completed: bool,
    pub stacks_formed: bool,
    pub stack_count: u32,
    pub capacity: u32,
    pub total_boxes: u32,
    pub move_counts: Vec<u64>,
    pub collect: CollectSummary,
    pub simulation_time_ms: u64,
    pub final_floor: FloorSnapshot,
}

impl RunSummary {
    pub fn total_moves(&self) -> u64 {
        self.move_counts.iter().sum()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} after {} ticks in {}ms\n{} boxes, capacity {}, {} stacks (formed: {}), {} robot moves",
            if self.completed { "Completed" } else { "Stopped" },
            self.ticks,
            self.simulation_time_ms,
            self.total_boxes,
            self.capacity,
            self.stack_count,
            self.stacks_formed,
            self.total_moves(),
        )
    }
}
