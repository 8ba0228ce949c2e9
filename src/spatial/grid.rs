//! Multi-occupancy grid indexing floor occupants by cell

use ahash::AHashMap;

use crate::core::error::{Result, SimError};
use crate::core::types::Position;
use crate::entity::Occupant;

/// Shape of a neighbourhood query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    /// Moore (square, Chebyshev) when true, von Neumann (diamond, Manhattan) otherwise
    pub moore: bool,
    pub include_center: bool,
    pub radius: u32,
}

impl Neighborhood {
    /// The four orthogonal neighbours, optionally with the centre cell
    pub const fn orthogonal(include_center: bool) -> Self {
        Self {
            moore: false,
            include_center,
            radius: 1,
        }
    }

    pub const fn moore(radius: u32, include_center: bool) -> Self {
        Self {
            moore: true,
            include_center,
            radius,
        }
    }

    /// Same shape with the radius capped at `max_radius`
    pub fn clamped(self, max_radius: u32) -> Self {
        Self {
            radius: self.radius.min(max_radius).min(i32::MAX as u32),
            ..self
        }
    }

    /// Relative offsets in scan order: centre first (if included), then
    /// row by row from the top-left of the bounding square.
    pub fn offsets(&self) -> Vec<(i32, i32)> {
        let r = self.radius as i32;
        let mut offsets = Vec::new();
        if self.include_center {
            offsets.push((0, 0));
        }
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.moore || dx.abs() + dy.abs() <= r {
                    offsets.push((dx, dy));
                }
            }
        }
        offsets
    }
}

/// Fixed-size 2D grid where any number of occupants may share a cell
#[derive(Debug, Clone)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Vec<Occupant>>,
    /// Reverse index, kept in lockstep with `cells`
    locations: AHashMap<Occupant, Position>,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec::new(); width as usize * height as usize],
            locations: AHashMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major cell index
    #[inline]
    pub fn index_of(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn position_of_index(&self, index: usize) -> Position {
        let width = self.width as usize;
        Position::new((index % width) as i32, (index / width) as i32)
    }

    /// Insert an occupant into a cell. An occupant already on the grid is
    /// relocated instead, so it is never indexed twice.
    pub fn place(&mut self, occupant: Occupant, pos: Position) -> Result<()> {
        if self.locations.contains_key(&occupant) {
            return self.move_agent(occupant, pos);
        }
        let index = self.index_of(pos).ok_or(SimError::invalid_position(pos))?;
        self.cells[index].push(occupant);
        self.locations.insert(occupant, pos);
        Ok(())
    }

    pub fn remove(&mut self, occupant: Occupant) -> Result<Position> {
        let pos = self
            .locations
            .remove(&occupant)
            .ok_or_else(|| SimError::UnknownOccupant(occupant.to_string()))?;
        if let Some(index) = self.index_of(pos) {
            self.cells[index].retain(|o| *o != occupant);
        }
        Ok(pos)
    }

    /// Move an occupant to `new_pos`. Bounds are checked before anything
    /// changes, so a failed move leaves the grid untouched.
    pub fn move_agent(&mut self, occupant: Occupant, new_pos: Position) -> Result<()> {
        let new_index = self
            .index_of(new_pos)
            .ok_or(SimError::invalid_position(new_pos))?;
        let old_pos = *self
            .locations
            .get(&occupant)
            .ok_or_else(|| SimError::UnknownOccupant(occupant.to_string()))?;
        if old_pos == new_pos {
            return Ok(());
        }
        if let Some(old_index) = self.index_of(old_pos) {
            self.cells[old_index].retain(|o| *o != occupant);
        }
        self.cells[new_index].push(occupant);
        self.locations.insert(occupant, new_pos);
        Ok(())
    }

    pub fn location(&self, occupant: Occupant) -> Option<Position> {
        self.locations.get(&occupant).copied()
    }

    /// Occupants of one cell in arrival order; empty when out of bounds
    pub fn occupants(&self, pos: Position) -> &[Occupant] {
        match self.index_of(pos) {
            Some(index) => &self.cells[index],
            None => &[],
        }
    }

    /// In-bounds cells of the neighbourhood around `pos`, in scan order
    pub fn neighborhood(&self, pos: Position, shape: Neighborhood) -> Vec<Position> {
        // No in-bounds cell lies further than width + height from another
        shape
            .clamped(self.width.saturating_add(self.height))
            .offsets()
            .into_iter()
            .map(|(dx, dy)| pos.offset(dx, dy))
            .filter(|p| self.in_bounds(*p))
            .collect()
    }

    /// Every occupant located in the neighbourhood around `pos`.
    ///
    /// Cells are visited in `Neighborhood::offsets` order and each cell in
    /// arrival order, so the result is deterministic for a given history.
    pub fn neighbors(&self, pos: Position, shape: Neighborhood) -> Vec<Occupant> {
        self.neighborhood(pos, shape)
            .into_iter()
            .flat_map(|p| self.occupants(p).iter().copied())
            .collect()
    }

    /// Cells with no occupants, lazily
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| self.position_of_index(index))
    }

    /// Every cell with its occupants, row-major
    pub fn coordinates(&self) -> impl Iterator<Item = (Position, &[Occupant])> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.position_of_index(index), cell.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{RobotId, TileId};

    #[test]
    fn test_orthogonal_offsets() {
        let offsets = Neighborhood::orthogonal(true).offsets();
        assert_eq!(offsets, vec![(0, 0), (0, -1), (-1, 0), (1, 0), (0, 1)]);
        assert_eq!(Neighborhood::orthogonal(false).offsets().len(), 4);
    }

    #[test]
    fn test_moore_offsets() {
        assert_eq!(Neighborhood::moore(1, false).offsets().len(), 8);
        assert_eq!(Neighborhood::moore(3, true).offsets().len(), 49);
        assert_eq!(Neighborhood::moore(3, true).offsets()[0], (0, 0));
    }

    #[test]
    fn test_place_and_occupants() {
        let mut grid = Grid::new(3, 2);
        let pos = Position::new(2, 1);
        grid.place(Occupant::Tile(TileId(5)), pos).unwrap();
        grid.place(Occupant::Robot(RobotId(0)), pos).unwrap();
        grid.place(Occupant::Robot(RobotId(1)), pos).unwrap();
        assert_eq!(grid.occupants(pos).len(), 3);
        assert_eq!(grid.location(Occupant::Robot(RobotId(1))), Some(pos));
    }

    #[test]
    fn test_place_out_of_bounds_fails() {
        let mut grid = Grid::new(3, 3);
        let result = grid.place(Occupant::Robot(RobotId(0)), Position::new(3, 0));
        assert!(matches!(result, Err(SimError::InvalidPosition { x: 3, y: 0 })));
        let result = grid.place(Occupant::Robot(RobotId(0)), Position::new(0, -1));
        assert!(result.is_err());
    }

    #[test]
    fn test_move_agent_keeps_index_in_sync() {
        let mut grid = Grid::new(4, 4);
        let robot = Occupant::Robot(RobotId(7));
        grid.place(robot, Position::new(0, 0)).unwrap();
        grid.move_agent(robot, Position::new(1, 0)).unwrap();
        assert!(grid.occupants(Position::new(0, 0)).is_empty());
        assert_eq!(grid.occupants(Position::new(1, 0)), &[robot]);
        assert_eq!(grid.location(robot), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_failed_move_leaves_grid_untouched() {
        let mut grid = Grid::new(2, 2);
        let robot = Occupant::Robot(RobotId(0));
        grid.place(robot, Position::new(1, 1)).unwrap();
        assert!(grid.move_agent(robot, Position::new(2, 1)).is_err());
        assert_eq!(grid.location(robot), Some(Position::new(1, 1)));
        assert_eq!(grid.occupants(Position::new(1, 1)), &[robot]);
    }

    #[test]
    fn test_move_unknown_occupant_fails() {
        let mut grid = Grid::new(2, 2);
        let result = grid.move_agent(Occupant::Robot(RobotId(3)), Position::new(0, 0));
        assert!(matches!(result, Err(SimError::UnknownOccupant(_))));
    }

    #[test]
    fn test_neighbors_at_corner() {
        let mut grid = Grid::new(3, 3);
        for (i, pos) in [(0, 0), (1, 0), (0, 1), (1, 1)].into_iter().enumerate() {
            grid.place(Occupant::Tile(TileId(i as u32)), Position::new(pos.0, pos.1))
                .unwrap();
        }
        let found = grid.neighbors(Position::new(0, 0), Neighborhood::orthogonal(true));
        // Centre, right, below; the diagonal (1, 1) is not orthogonal
        assert_eq!(
            found,
            vec![
                Occupant::Tile(TileId(0)),
                Occupant::Tile(TileId(1)),
                Occupant::Tile(TileId(2)),
            ]
        );
        let moore = grid.neighbors(Position::new(0, 0), Neighborhood::moore(1, false));
        assert_eq!(moore.len(), 3);
    }

    #[test]
    fn test_oversized_radius_is_capped_by_grid() {
        let mut grid = Grid::new(5, 5);
        grid.place(Occupant::Tile(TileId(0)), Position::new(4, 4)).unwrap();
        let center = Position::new(2, 2);

        let wide = grid.neighborhood(center, Neighborhood::moore(20_000, true));
        assert_eq!(wide.len(), 25);
        assert_eq!(wide, grid.neighborhood(center, Neighborhood::moore(5, true)));

        // Beyond i32::MAX the scan still covers the whole floor
        let huge = grid.neighbors(center, Neighborhood::moore(3_000_000_000, true));
        assert_eq!(huge, vec![Occupant::Tile(TileId(0))]);

        let diamond = Neighborhood {
            moore: false,
            include_center: true,
            radius: u32::MAX,
        };
        assert_eq!(grid.neighborhood(Position::new(0, 0), diamond).len(), 25);
    }

    #[test]
    fn test_empty_cells_and_coordinates() {
        let mut grid = Grid::new(2, 2);
        grid.place(Occupant::Tile(TileId(0)), Position::new(0, 0)).unwrap();
        let empties: Vec<Position> = grid.empty_cells().collect();
        assert_eq!(empties, vec![Position::new(1, 0), Position::new(0, 1), Position::new(1, 1)]);
        assert_eq!(grid.coordinates().count(), 4);
        // Restartable
        assert_eq!(grid.coordinates().count(), 4);
    }

    #[test]
    fn test_remove() {
        let mut grid = Grid::new(2, 2);
        let robot = Occupant::Robot(RobotId(0));
        grid.place(robot, Position::new(1, 0)).unwrap();
        assert_eq!(grid.remove(robot).unwrap(), Position::new(1, 0));
        assert!(grid.occupants(Position::new(1, 0)).is_empty());
        assert!(grid.remove(robot).is_err());
    }
}
