//! Small grid graph shared by the unit tests.

use std::cell::Cell;

use crate::traits::{Graph, StateCost};

#[derive(Clone, Copy, PartialEq)]
enum Tile {
    Floor(f32),
    Wall,
    Door,
}

/// 4-connected grid. Entering a cell costs its weight; doors cost 1 when
/// open and are impassable otherwise. Counts graph queries.
pub(crate) struct TestGrid {
    w: i32,
    h: i32,
    tiles: Vec<Tile>,
    doors_open: bool,
    neighbor_calls: Cell<usize>,
    estimate_calls: Cell<usize>,
}

impl TestGrid {
    /// `.` floor, `#` wall, `1`-`9` weighted floor.
    pub(crate) fn parse(text: &str) -> Self {
        let lines: Vec<&str> = text.lines().collect();
        let h = lines.len() as i32;
        let w = lines.first().map_or(0, |l| l.len()) as i32;
        let tiles = lines
            .iter()
            .flat_map(|l| l.chars())
            .map(|c| match c {
                '#' => Tile::Wall,
                d @ '1'..='9' => Tile::Floor(d as u8 as f32 - b'0' as f32),
                _ => Tile::Floor(1.0),
            })
            .collect();
        Self::from_tiles(w, h, tiles)
    }

    pub(crate) fn open(w: i32, h: i32) -> Self {
        Self::from_tiles(w, h, vec![Tile::Floor(1.0); (w * h) as usize])
    }

    /// Build from explicit weights; `None` is a wall.
    pub(crate) fn from_weights(w: i32, h: i32, weights: &[Option<f32>]) -> Self {
        let tiles = weights
            .iter()
            .map(|wt| wt.map_or(Tile::Wall, Tile::Floor))
            .collect();
        Self::from_tiles(w, h, tiles)
    }

    fn from_tiles(w: i32, h: i32, tiles: Vec<Tile>) -> Self {
        Self {
            w,
            h,
            tiles,
            doors_open: false,
            neighbor_calls: Cell::new(0),
            estimate_calls: Cell::new(0),
        }
    }

    pub(crate) fn with_door(mut self, p: (i32, i32)) -> Self {
        let i = self.index(p);
        self.tiles[i] = Tile::Door;
        self
    }

    pub(crate) fn set_doors_open(&mut self, open: bool) {
        self.doors_open = open;
    }

    pub(crate) fn door_open(&self) -> bool {
        self.doors_open
    }

    pub(crate) fn neighbor_calls(&self) -> usize {
        self.neighbor_calls.get()
    }

    /// Neighbor and estimate calls so far.
    pub(crate) fn queries(&self) -> usize {
        self.neighbor_calls.get() + self.estimate_calls.get()
    }

    fn index(&self, (x, y): (i32, i32)) -> usize {
        (y * self.w + x) as usize
    }

    /// Cost of entering `p`, `None` for walls and cells outside the grid.
    pub(crate) fn enter_cost(&self, p: (i32, i32)) -> Option<f32> {
        if !self.contains(p) {
            return None;
        }
        match self.tiles[self.index(p)] {
            Tile::Floor(w) => Some(w),
            Tile::Wall => None,
            Tile::Door if self.doors_open => Some(1.0),
            Tile::Door => Some(f32::INFINITY),
        }
    }

    pub(crate) fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

impl Graph for TestGrid {
    type Node = (i32, i32);

    fn estimate(&self, from: (i32, i32), to: (i32, i32)) -> f32 {
        self.estimate_calls.set(self.estimate_calls.get() + 1);
        ((from.0 - to.0).abs() + (from.1 - to.1).abs()) as f32
    }

    fn neighbors(&self, (x, y): (i32, i32), buf: &mut Vec<StateCost<(i32, i32)>>) {
        self.neighbor_calls.set(self.neighbor_calls.get() + 1);
        for p in [(x + 1, y), (x, y - 1), (x - 1, y), (x, y + 1)] {
            if let Some(cost) = self.enter_cost(p) {
                buf.push(StateCost::new(p, cost));
            }
        }
    }

    fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= 0 && x < self.w && y >= 0 && y < self.h
    }
}
