//! End-of-run forced collection
//!
//! Unlike the per-tick deposit rule this does not wait for a full load: any
//! robot still carrying boxes unloads all of them onto the first empty tile
//! on or next to its cell.

use crate::core::error::Result;
use crate::core::types::RobotId;
use crate::simulation::output::CollectSummary;
use crate::spatial::Neighborhood;
use crate::world::Floor;

pub fn collect_loads(floor: &mut Floor) -> Result<CollectSummary> {
    let mut summary = CollectSummary::default();

    let loaded: Vec<(RobotId, u32)> = floor
        .robots()
        .iter()
        .filter(|r| r.is_loaded())
        .map(|r| (r.id, r.carried))
        .collect();

    for (id, carried) in loaded {
        let Some(robot) = floor.robot(id) else {
            continue;
        };
        let position = robot.position;
        let spot = floor
            .tiles_near(position, Neighborhood::orthogonal(true))
            .find(|t| t.is_empty())
            .map(|t| t.position);

        let deposited = match spot {
            Some(at) => floor.deposit(id, at)?,
            None => false,
        };

        if deposited {
            floor.release_target(id)?;
            summary.robots_unloaded += 1;
            summary.boxes_deposited += carried;
        } else {
            // Keeps its load so no box disappears
            tracing::warn!(robot = %id, %position, carried, "no empty tile to unload onto");
            summary.robots_stranded += 1;
        }
    }

    Ok(summary)
}
