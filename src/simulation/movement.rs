//! Movement strategies

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::entity::Robot;
use crate::simulation::decision::Intent;
use crate::spatial::Neighborhood;
use crate::world::Floor;

/// Uniform step to one of the in-bounds orthogonal neighbour cells
pub fn random_walk(floor: &Floor, robot: &Robot, rng: &mut ChaCha8Rng) -> Intent {
    let options = floor
        .grid
        .neighborhood(robot.position, Neighborhood::orthogonal(false));
    match options.choose(rng) {
        Some(to) => Intent::Walk { to: *to },
        None => Intent::Idle,
    }
}

/// Head for a reserved loose box, reserving a new one when needed.
///
/// A held target is kept only while its tile is still loose and still
/// reserved by this robot. Otherwise the robot scans the Moore
/// neighbourhood of `radius` (own cell first, then row by row) and reserves
/// the first unreserved loose box. Finding none is an ordinary idle tick.
pub fn targeted_search(floor: &Floor, robot: &Robot, radius: u32) -> Intent {
    if let Some(target) = robot.target {
        let still_ours = floor
            .tile_at(target)
            .is_some_and(|t| t.is_loose() && t.claimed_by == Some(robot.id));
        if still_ours {
            return Intent::Approach {
                to: robot.position.step_toward(&target),
            };
        }
    }

    let found = floor
        .tiles_near(robot.position, Neighborhood::moore(radius, true))
        .find(|t| t.is_available())
        .map(|t| t.position);

    match found {
        Some(target) => Intent::Claim {
            target,
            to: robot.position.step_toward(&target),
        },
        None => Intent::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Position, RobotId};
    use crate::entity::TileContents;
    use rand::SeedableRng;

    #[test]
    fn test_random_walk_stays_orthogonal_and_in_bounds() {
        let mut floor = Floor::new(3, 3);
        floor.fill_tiles(|_| TileContents::Empty).unwrap();
        let id = floor.add_robot(Position::new(0, 0), 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);

        for _ in 0..50 {
            let robot = floor.robot(id).unwrap();
            match random_walk(&floor, robot, &mut rng) {
                Intent::Walk { to } => {
                    assert!(floor.grid.in_bounds(to));
                    assert_eq!(robot.position.manhattan(&to), 1);
                }
                other => panic!("expected a walk, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_random_walk_on_single_cell_idles() {
        let mut floor = Floor::new(1, 1);
        floor.fill_tiles(|_| TileContents::Empty).unwrap();
        let id = floor.add_robot(Position::new(0, 0), 1).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let robot = floor.robot(id).unwrap();
        assert_eq!(random_walk(&floor, robot, &mut rng), Intent::Idle);
    }

    #[test]
    fn test_targeted_search_claims_box_in_range() {
        let boxed = Position::new(4, 1);
        let mut floor = Floor::new(6, 6);
        floor
            .fill_tiles(|p| if p == boxed { TileContents::Loose } else { TileContents::Empty })
            .unwrap();
        let id = floor.add_robot(Position::new(1, 3), 1).unwrap();
        let robot = floor.robot(id).unwrap();

        assert_eq!(
            targeted_search(&floor, robot, 3),
            Intent::Claim {
                target: boxed,
                to: Position::new(2, 2)
            }
        );
    }

    #[test]
    fn test_targeted_search_ignores_out_of_range_and_claimed() {
        let far = Position::new(5, 5);
        let near = Position::new(1, 1);
        let mut floor = Floor::new(6, 6);
        floor
            .fill_tiles(|p| {
                if p == far || p == near {
                    TileContents::Loose
                } else {
                    TileContents::Empty
                }
            })
            .unwrap();
        let id = floor.add_robot(Position::new(0, 0), 1).unwrap();
        floor.tile_at_mut(near).unwrap().claim(RobotId(99));
        let robot = floor.robot(id).unwrap();

        assert_eq!(targeted_search(&floor, robot, 3), Intent::Idle);
    }

    #[test]
    fn test_targeted_search_keeps_valid_target() {
        let boxed = Position::new(3, 0);
        let mut floor = Floor::new(4, 4);
        floor
            .fill_tiles(|p| if p == boxed { TileContents::Loose } else { TileContents::Empty })
            .unwrap();
        let id = floor.add_robot(Position::new(0, 3), 1).unwrap();
        floor.claim(id, boxed).unwrap();
        let robot = floor.robot(id).unwrap();

        assert_eq!(
            targeted_search(&floor, robot, 3),
            Intent::Approach {
                to: Position::new(1, 2)
            }
        );
    }

    #[test]
    fn test_targeted_search_drops_stale_target() {
        let gone = Position::new(3, 0);
        let other = Position::new(0, 1);
        let mut floor = Floor::new(4, 4);
        floor
            .fill_tiles(|p| if p == gone || p == other { TileContents::Loose } else { TileContents::Empty })
            .unwrap();
        let id = floor.add_robot(Position::new(0, 3), 1).unwrap();
        floor.claim(id, gone).unwrap();
        floor.tile_at_mut(gone).unwrap().take_box();
        let robot = floor.robot(id).unwrap();

        assert_eq!(
            targeted_search(&floor, robot, 3),
            Intent::Claim {
                target: other,
                to: Position::new(0, 2)
            }
        );
    }
}
