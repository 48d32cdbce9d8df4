//! Reference maps.
//!
//! One string per row; see [`GridMap`](crate::GridMap) for the cell legend.

/// 30×10 dungeon with doors (`D`), intended for a small pool block size.
pub const DUNGEON: &[&str] = &[
    "     |      |                |",
    "     |      |----+    |      +",
    "---+ +---DD-+      +--+--+    ",
    "   |                     +-- +",
    "        +----+  +---+         ",
    "---+ +  D    D            |   ",
    "   | |  +----+    +----+  +--+",
    "   D |            |    |      ",
    "   | +-------+  +-+    |--+   ",
    "---+                   |     +",
];

/// 90×20 map with weighted cells, used by the benchmark harness.
pub const SPEED: &[&str] = &[
    "     |      |                |     |      ||               |     |      |                |",
    "     |      |----+    |      +     |      ||---+    |      +     |      |----+    |      +",
    "---+ +---  -+      +--+--+    ---+ +---  -+|     +--+--+    ---+ +---  -+      +--+--+    ",
    "   |                     +-- +   |        ||           +-- +   |                     +-- +",
    "        +----+  +---+                     ||  +---+                 +----+  +---+         ",
    "---+ +  +    +            |   ---+ +                    |  2---+ +  +    +            |   ",
    "   | |  +----+    +----+  +--+   | |      ||    +----+  +--+322| |  +----+    +----+  +--+",
    "     |            |    |           |      ||    |    |   222232  |            |    |      ",
    "   | +-------+  +-+    |------------------+|  +-+    |--+  2223| +-------+  +-+    |--+   ",
    "---+                   |                  ||         |  222+---+                   |     +",
    "     |      |          |                  ||          22233|     |      |                |",
    "     |      |----+    ++                  ||---+3333|    22+     |      |----+    |      +",
    "---+ +---  -+      +--+-------------------||22223+--+--+    ---+ +---  -+      +--+--+    ",
    "   |                     +-- +   |          22223333   +-- +   |                     +-- +",
    "        +----+  +---+                 +---+|  +---+     222         +----+  +---+         ",
    "---+ +  +    +            |   ---+ +  +   +|            |222---+ +  +    +            |   ",
    "   | |  +----+    +----+  +--+   | |  +---+|  22+----+  +--+233|2|  +----+    +----+  +--+",
    "     |            |    |           |      ||2222|    |    2223333|            |    |      ",
    "   | +-------+  +-+    |--+      | +------++  +-+    |--+      |2+-------+  +-+    |--+   ",
    "---+                   |     +---+        ||         |     +---+                   |      ",
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Directions, GridMap, Point};
    use statepath::{SolveError, Solver, SolverConfig};

    fn dungeon_solver() -> Solver<GridMap> {
        let map = GridMap::from_rows(DUNGEON)
            .unwrap()
            .with_directions(Directions::Eight);
        Solver::new(
            map,
            SolverConfig {
                block_size: 20,
                ..Default::default()
            },
        )
    }

    #[test]
    fn maps_parse() {
        let dungeon = GridMap::from_rows(DUNGEON).unwrap();
        assert_eq!((dungeon.width(), dungeon.height()), (30, 10));
        let speed = GridMap::from_rows(SPEED).unwrap();
        assert_eq!((speed.width(), speed.height()), (90, 20));
    }

    #[test]
    fn dungeon_door_requires_reset() {
        let mut s = dungeon_solver();
        let mut path = Vec::new();
        let (room, hall) = (Point::new(1, 7), Point::new(4, 7));
        assert_eq!(s.solve(room, hall, &mut path), Err(SolveError::NoSolution));

        assert!(s.graph_mut().toggle_doors());
        // Still the cached answer: the solver was not told about the door.
        assert_eq!(s.solve(room, hall, &mut path), Err(SolveError::NoSolution));

        s.reset();
        let solved = s.solve(room, hall, &mut path).unwrap();
        assert_eq!(solved.cost(), 3.0);
        assert!(path.contains(&Point::new(3, 7)));

        // Closing again and resetting brings back the closed-door answer.
        s.graph_mut().toggle_doors();
        s.reset();
        assert_eq!(s.solve(room, hall, &mut path), Err(SolveError::NoSolution));
    }

    #[test]
    fn small_blocks_cover_the_dungeon() {
        let mut s = dungeon_solver();
        let mut path = Vec::new();
        let solved = s.solve(Point::new(0, 0), Point::new(28, 0), &mut path).unwrap();
        assert!((solved.cost() - 30.46).abs() < 1e-3);
        let stats = s.stats();
        assert_eq!(stats.block_size, 20);
        assert!(stats.blocks > 1);
        assert!(stats.states <= stats.blocks * 20);

        let mut states = Vec::new();
        s.states_in_pool(&mut states);
        assert_eq!(states.len(), stats.states);
    }

    #[test]
    fn tight_budget_fails_closed_then_recovers() {
        let map = GridMap::from_rows(DUNGEON).unwrap();
        let mut s = Solver::new(
            map,
            SolverConfig {
                block_size: 20,
                max_blocks: 2,
                ..Default::default()
            },
        );
        let mut path = Vec::new();
        let (a, b) = (Point::new(0, 0), Point::new(28, 0));
        assert_eq!(
            s.solve(a, b, &mut path),
            Err(SolveError::OutOfMemory { capacity: 40 })
        );
        assert!(s.stats().states <= 40);

        s.set_max_blocks(64);
        assert!(s.solve(a, b, &mut path).is_ok());
        assert_eq!(path.first(), Some(&a));
        assert_eq!(path.last(), Some(&b));
    }
}
