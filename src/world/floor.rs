//! Floor - the grid together with every tile and robot on it
//!
//! All mutation of tiles and robots goes through here so the grid index,
//! the robots' stored positions and the tile claims stay consistent.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::core::config::StorageConfig;
use crate::core::error::{Result, SimError};
use crate::core::types::{Position, RobotId, TileId};
use crate::entity::{Occupant, Robot, Tile, TileContents};
use crate::spatial::{Grid, Neighborhood};
use crate::world::snapshot::{FloorSnapshot, ROBOT_CODE_BASE};

#[derive(Debug, Clone)]
pub struct Floor {
    pub grid: Grid,
    /// Indexed by `TileId`, which is the row-major cell index
    tiles: Vec<Tile>,
    /// Indexed by `RobotId`
    robots: Vec<Robot>,
}

impl Floor {
    /// A floor with no tiles and no robots
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: Grid::new(width, height),
            tiles: Vec::new(),
            robots: Vec::new(),
        }
    }

    /// Build a floor from a config:
    /// 1. scatter `total_boxes` loose boxes on distinct random empty cells
    /// 2. give every remaining cell an empty tile
    /// 3. drop `robot_count` robots at independent random cells (overlap allowed)
    pub fn generate(config: &StorageConfig, capacity: u32, rng: &mut ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let mut floor = Self::new(config.width, config.height);

        let empty: Vec<Position> = floor.grid.empty_cells().collect();
        if config.total_boxes as usize > empty.len() {
            return Err(SimError::InvalidConfig(format!(
                "cannot scatter {} boxes on {} cells",
                config.total_boxes,
                empty.len()
            )));
        }
        let mut loose = vec![false; floor.grid.cell_count()];
        for pos in empty.choose_multiple(rng, config.total_boxes as usize) {
            if let Some(index) = floor.grid.index_of(*pos) {
                loose[index] = true;
            }
        }

        for (index, is_loose) in loose.into_iter().enumerate() {
            let contents = if is_loose {
                TileContents::Loose
            } else {
                TileContents::Empty
            };
            floor.add_tile(index, contents)?;
        }

        for _ in 0..config.robot_count {
            let pos = Position::new(
                rng.gen_range(0..config.width) as i32,
                rng.gen_range(0..config.height) as i32,
            );
            floor.add_robot(pos, capacity)?;
        }

        Ok(floor)
    }

    fn add_tile(&mut self, index: usize, contents: TileContents) -> Result<()> {
        let id = TileId(index as u32);
        let pos = self.grid.position_of_index(index);
        self.grid.place(Occupant::Tile(id), pos)?;
        self.tiles.push(Tile::new(id, pos, contents));
        Ok(())
    }

    /// Fill every cell with a tile, using `contents` to decide what each holds.
    /// Only meaningful on a floor built with `Floor::new`.
    pub fn fill_tiles(&mut self, contents: impl Fn(Position) -> TileContents) -> Result<()> {
        for index in self.tiles.len()..self.grid.cell_count() {
            let pos = self.grid.position_of_index(index);
            self.add_tile(index, contents(pos))?;
        }
        Ok(())
    }

    pub fn add_robot(&mut self, pos: Position, capacity: u32) -> Result<RobotId> {
        let id = RobotId(self.robots.len() as u32);
        self.grid.place(Occupant::Robot(id), pos)?;
        self.robots.push(Robot::new(id, pos, capacity));
        Ok(id)
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.get(id.index())
    }

    pub fn robot_mut(&mut self, id: RobotId) -> Option<&mut Robot> {
        self.robots.get_mut(id.index())
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_at(&self, pos: Position) -> Option<&Tile> {
        self.grid.index_of(pos).and_then(|i| self.tiles.get(i))
    }

    pub fn tile_at_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        let index = self.grid.index_of(pos)?;
        self.tiles.get_mut(index)
    }

    /// Tiles in the neighbourhood of `pos`, in grid scan order
    pub fn tiles_near(&self, pos: Position, shape: Neighborhood) -> impl Iterator<Item = &Tile> + '_ {
        self.grid
            .neighbors(pos, shape)
            .into_iter()
            .filter_map(|o| o.as_tile())
            .filter_map(|id| self.tiles.get(id.index()))
    }

    fn robot_checked(&self, id: RobotId) -> Result<&Robot> {
        self.robot(id)
            .ok_or_else(|| SimError::UnknownOccupant(id.to_string()))
    }

    fn robot_checked_mut(&mut self, id: RobotId) -> Result<&mut Robot> {
        self.robots
            .get_mut(id.index())
            .ok_or_else(|| SimError::UnknownOccupant(id.to_string()))
    }

    /// Move a robot and return the number of axes it moved along
    pub fn relocate_robot(&mut self, id: RobotId, to: Position) -> Result<u32> {
        let from = self.robot_checked(id)?.position;
        self.grid.move_agent(Occupant::Robot(id), to)?;
        let robot = self.robot_checked_mut(id)?;
        robot.position = to;
        Ok((from.x != to.x) as u32 + (from.y != to.y) as u32)
    }

    /// Move the loose box at `at` into the robot's load. False if the tile is
    /// no longer loose or the robot is already at capacity.
    pub fn pick_up(&mut self, id: RobotId, at: Position) -> Result<bool> {
        if !self.robot_checked(id)?.has_room() {
            return Ok(false);
        }
        let tile = self.tile_at_mut(at).ok_or(SimError::invalid_position(at))?;
        if !tile.take_box() {
            return Ok(false);
        }
        let robot = self.robot_checked_mut(id)?;
        robot.carried += 1;
        Ok(true)
    }

    /// Unload the robot's whole load onto the empty tile at `at`
    pub fn deposit(&mut self, id: RobotId, at: Position) -> Result<bool> {
        let carried = self.robot_checked(id)?.carried;
        let tile = self.tile_at_mut(at).ok_or(SimError::invalid_position(at))?;
        if !tile.place_stack(carried) {
            return Ok(false);
        }
        self.robot_checked_mut(id)?.carried = 0;
        Ok(true)
    }

    /// Reserve the loose box at `at` and make it the robot's target
    pub fn claim(&mut self, id: RobotId, at: Position) -> Result<bool> {
        let tile = self.tile_at_mut(at).ok_or(SimError::invalid_position(at))?;
        if !tile.claim(id) {
            return Ok(false);
        }
        self.robot_checked_mut(id)?.target = Some(at);
        Ok(true)
    }

    /// Forget the robot's target and release its reservation on that tile
    pub fn release_target(&mut self, id: RobotId) -> Result<()> {
        let target = self.robot_checked_mut(id)?.target.take();
        if let Some(pos) = target {
            if let Some(tile) = self.tile_at_mut(pos) {
                tile.release(id);
            }
        }
        Ok(())
    }

    /// Boxes on tiles plus boxes in transit. Constant over a run.
    pub fn total_stored(&self) -> u64 {
        let on_tiles: u64 = self.tiles.iter().map(|t| t.box_count() as u64).sum();
        let carried: u64 = self.robots.iter().map(|r| r.carried as u64).sum();
        on_tiles + carried
    }

    /// One numeric code per cell: `11 - carried` where a robot stands,
    /// otherwise the tile's box count. When several robots share a cell the
    /// most recent arrival is reported.
    pub fn snapshot(&self) -> FloorSnapshot {
        let codes = self
            .grid
            .coordinates()
            .map(|(_, occupants)| {
                let mut code = 0;
                for occupant in occupants {
                    code = match occupant {
                        Occupant::Tile(id) => self.tile(*id).map_or(0, |t| t.box_count() as i32),
                        Occupant::Robot(id) => self
                            .robot(*id)
                            .map_or(code, |r| ROBOT_CODE_BASE - r.carried as i32),
                    };
                }
                code
            })
            .collect();
        FloorSnapshot::new(self.width(), self.height(), codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn empty_floor(width: u32, height: u32) -> Floor {
        let mut floor = Floor::new(width, height);
        floor.fill_tiles(|_| TileContents::Empty).unwrap();
        floor
    }

    #[test]
    fn test_generate_places_every_tile() {
        let config = StorageConfig::new(5, 5, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let floor = Floor::generate(&config, 1, &mut rng).unwrap();
        assert_eq!(floor.tiles().len(), 25);
        assert_eq!(floor.tiles().iter().filter(|t| t.is_loose()).count(), 3);
        assert_eq!(floor.robots().len(), 5);
        assert_eq!(floor.total_stored(), 3);
        for tile in floor.tiles() {
            assert_eq!(floor.grid.location(Occupant::Tile(tile.id)), Some(tile.position));
        }
    }

    #[test]
    fn test_generate_fills_every_cell_with_boxes() {
        let config = StorageConfig::new(2, 2, 4);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let floor = Floor::generate(&config, 1, &mut rng).unwrap();
        assert!(floor.tiles().iter().all(|t| t.is_loose()));
    }

    #[test]
    fn test_relocate_counts_axes() {
        let mut floor = empty_floor(4, 4);
        let id = floor.add_robot(Position::new(1, 1), 2).unwrap();
        assert_eq!(floor.relocate_robot(id, Position::new(2, 2)).unwrap(), 2);
        assert_eq!(floor.relocate_robot(id, Position::new(2, 3)).unwrap(), 1);
        assert_eq!(floor.robot(id).unwrap().position, Position::new(2, 3));
        assert_eq!(floor.grid.location(Occupant::Robot(id)), Some(Position::new(2, 3)));
        assert!(floor.relocate_robot(id, Position::new(2, 4)).is_err());
    }

    #[test]
    fn test_pick_up_and_deposit() {
        let loose = Position::new(0, 1);
        let mut floor = Floor::new(3, 3);
        floor
            .fill_tiles(|p| if p == loose { TileContents::Loose } else { TileContents::Empty })
            .unwrap();
        let id = floor.add_robot(Position::new(0, 0), 1).unwrap();

        assert!(floor.pick_up(id, loose).unwrap());
        assert!(!floor.pick_up(id, loose).unwrap());
        assert_eq!(floor.robot(id).unwrap().carried, 1);

        assert!(floor.deposit(id, Position::new(0, 0)).unwrap());
        assert_eq!(floor.robot(id).unwrap().carried, 0);
        assert_eq!(floor.tile_at(Position::new(0, 0)).unwrap().contents, TileContents::Stack(1));
        assert_eq!(floor.total_stored(), 1);
    }

    #[test]
    fn test_claim_and_release_target() {
        let loose = Position::new(2, 2);
        let mut floor = Floor::new(3, 3);
        floor
            .fill_tiles(|p| if p == loose { TileContents::Loose } else { TileContents::Empty })
            .unwrap();
        let a = floor.add_robot(Position::new(0, 0), 1).unwrap();
        let b = floor.add_robot(Position::new(0, 0), 1).unwrap();

        assert!(floor.claim(a, loose).unwrap());
        assert!(!floor.claim(b, loose).unwrap());
        assert_eq!(floor.robot(a).unwrap().target, Some(loose));
        assert_eq!(floor.robot(b).unwrap().target, None);

        floor.release_target(a).unwrap();
        assert!(floor.tile_at(loose).unwrap().is_available());
        assert!(floor.claim(b, loose).unwrap());
    }

    #[test]
    fn test_snapshot_codes() {
        let mut floor = Floor::new(2, 1);
        floor
            .fill_tiles(|p| if p.x == 1 { TileContents::Stack(3) } else { TileContents::Empty })
            .unwrap();
        let id = floor.add_robot(Position::new(0, 0), 5).unwrap();
        floor.robot_mut(id).unwrap().carried = 2;

        let snapshot = floor.snapshot();
        assert_eq!(snapshot.get(0, 0), Some(9));
        assert_eq!(snapshot.get(1, 0), Some(3));
    }
}
