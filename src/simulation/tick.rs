//! Tick system - simultaneous activation in two phases
//!
//! 1. Decide: every robot, in id order, picks an intent from an immutable
//!    view of the floor as it stood at the start of the tick. Random draws
//!    happen here, in the same order, so runs replay exactly from a seed.
//! 2. Apply: intents are applied in id order. Each one is re-checked against
//!    the current floor, and an intent whose tile was already taken this tick
//!    (pickup, deposit or claim) is dropped. The lowest robot id therefore
//!    wins every same-tick conflict. Moves never conflict.

use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::core::types::{Position, RobotId, Tick};
use crate::simulation::decision::{decide, DecisionRules, Intent};
use crate::simulation::output::TickReport;
use crate::world::Floor;

/// Advance every robot by one tick
pub fn run_tick(
    floor: &mut Floor,
    rules: &DecisionRules,
    rng: &mut ChaCha8Rng,
    tick: Tick,
) -> Result<TickReport> {
    let start_of_tick: &Floor = floor;
    let intents: Vec<(RobotId, Intent)> = start_of_tick
        .robots()
        .iter()
        .map(|robot| (robot.id, decide(start_of_tick, robot, rules, rng)))
        .collect();

    let mut report = TickReport::new(tick);
    for (id, intent) in intents {
        apply_intent(floor, id, intent, &mut report)?;
    }
    Ok(report)
}

fn apply_intent(floor: &mut Floor, id: RobotId, intent: Intent, report: &mut TickReport) -> Result<()> {
    match intent {
        Intent::Deposit { at } => {
            let full = floor.robot(id).is_some_and(|r| r.is_full());
            if full && floor.deposit(id, at)? {
                floor.release_target(id)?;
                report.deposits += 1;
            } else {
                conflict(id, intent, report);
            }
        }
        Intent::PickUp { at } => {
            if floor.pick_up(id, at)? {
                floor.release_target(id)?;
                report.pickups += 1;
            } else {
                conflict(id, intent, report);
            }
        }
        Intent::Walk { to } => {
            step_robot(floor, id, to, report)?;
        }
        Intent::Claim { target, to } => {
            floor.release_target(id)?;
            if floor.claim(id, target)? {
                report.claims += 1;
                advance(floor, id, to, report)?;
            } else {
                conflict(id, intent, report);
            }
        }
        Intent::Approach { to } => {
            advance(floor, id, to, report)?;
        }
        Intent::Idle => {
            floor.release_target(id)?;
            report.idles += 1;
        }
    }
    Ok(())
}

fn conflict(id: RobotId, intent: Intent, report: &mut TickReport) {
    tracing::trace!(tick = report.tick, robot = %id, ?intent, "intent lost to a lower robot id");
    report.conflicts += 1;
}

/// Relocate and charge one move per axis travelled
fn step_robot(floor: &mut Floor, id: RobotId, to: Position, report: &mut TickReport) -> Result<()> {
    let axes = floor.relocate_robot(id, to)?;
    if let Some(robot) = floor.robot_mut(id) {
        robot.move_count += axes as u64;
    }
    if axes > 0 {
        report.moves += 1;
    }
    Ok(())
}

/// Step toward the reserved target, clearing it on arrival
fn advance(floor: &mut Floor, id: RobotId, to: Position, report: &mut TickReport) -> Result<()> {
    step_robot(floor, id, to, report)?;
    let arrived = floor
        .robot(id)
        .is_some_and(|r| r.target == Some(r.position));
    if arrived {
        floor.release_target(id)?;
        report.arrivals += 1;
    }
    Ok(())
}
