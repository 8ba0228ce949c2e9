//! Goal and termination predicates

use crate::world::Floor;

/// True while at least one loose box is still on the floor
pub fn boxes_available(floor: &Floor) -> bool {
    floor
        .grid
        .coordinates()
        .flat_map(|(_, occupants)| occupants.iter())
        .filter_map(|o| o.as_tile())
        .filter_map(|id| floor.tile(id))
        .any(|tile| tile.is_loose())
}

/// Number of tiles holding a stack of more than one box.
///
/// With a capacity of one every full stack is a single box, so a stack tile
/// at exactly `capacity` counts too. A leftover partial stack of one from
/// forced collection never does.
pub fn stack_count(floor: &Floor, capacity: u32) -> u32 {
    floor
        .tiles()
        .iter()
        .filter(|t| t.is_stack() && (t.box_count() > 1 || t.box_count() == capacity))
        .count() as u32
}

/// `ceil(total_boxes / capacity)`; zero when nothing can be carried
pub fn required_stacks(total_boxes: u32, capacity: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    total_boxes.div_ceil(capacity)
}

/// Alternative success criterion: at least as many stacks as the boxes need
pub fn stacks_formed(floor: &Floor, total_boxes: u32, capacity: u32) -> bool {
    stack_count(floor, capacity) >= required_stacks(total_boxes, capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Position;
    use crate::entity::TileContents;

    #[test]
    fn test_required_stacks() {
        assert_eq!(required_stacks(0, 0), 0);
        assert_eq!(required_stacks(25, 5), 5);
        assert_eq!(required_stacks(7, 2), 4);
        assert_eq!(required_stacks(1, 1), 1);
    }

    #[test]
    fn test_boxes_available_only_counts_loose() {
        let mut floor = Floor::new(2, 2);
        floor
            .fill_tiles(|p| if p.x == 0 { TileContents::Stack(1) } else { TileContents::Empty })
            .unwrap();
        assert!(!boxes_available(&floor));

        floor.tile_at_mut(Position::new(1, 1)).unwrap().contents = TileContents::Loose;
        assert!(boxes_available(&floor));
    }

    #[test]
    fn test_stacks_formed() {
        let mut floor = Floor::new(3, 1);
        floor
            .fill_tiles(|p| match p.x {
                0 => TileContents::Stack(2),
                1 => TileContents::Stack(2),
                _ => TileContents::Loose,
            })
            .unwrap();
        assert_eq!(stack_count(&floor, 2), 2);
        assert!(!stacks_formed(&floor, 5, 2));
        assert!(stacks_formed(&floor, 4, 2));
        assert!(stacks_formed(&floor, 0, 0));
    }

    #[test]
    fn test_partial_stack_of_one_is_not_counted() {
        // K = 7 at capacity 2: three full stacks plus one box left over
        let mut floor = Floor::new(4, 1);
        floor
            .fill_tiles(|p| if p.x < 3 { TileContents::Stack(2) } else { TileContents::Stack(1) })
            .unwrap();
        assert_eq!(stack_count(&floor, 2), 3);
        assert_eq!(required_stacks(7, 2), 4);
        assert!(!stacks_formed(&floor, 7, 2));
    }

    #[test]
    fn test_single_box_stacks_count_at_capacity_one() {
        let mut floor = Floor::new(3, 1);
        floor
            .fill_tiles(|p| if p.x < 2 { TileContents::Stack(1) } else { TileContents::Loose })
            .unwrap();
        assert_eq!(stack_count(&floor, 1), 2);
        assert!(stacks_formed(&floor, 2, 1));
        assert!(!stacks_formed(&floor, 3, 1));
    }
}
