//! ASCII grid maps exposed as a [`Graph`].

use statepath::{Graph, StateCost};

use crate::geom::{Point, manhattan};

/// Contents of one map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terrain {
    /// Walkable; entering costs the step cost times the weight (1–9).
    Floor(u8),
    /// Walkable only while doors are open.
    Door,
    Wall,
}

impl Terrain {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            ' ' => Some(Self::Floor(1)),
            '1'..='9' => Some(Self::Floor(ch as u8 - b'0')),
            'D' => Some(Self::Door),
            '|' | '-' | '+' => Some(Self::Wall),
            _ => None,
        }
    }
}

/// Movement model of a [`GridMap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Directions {
    /// Cardinal moves only.
    #[default]
    Four,
    /// Cardinal and diagonal moves.
    Eight,
}

impl Directions {
    /// Number of directions, as used in reports.
    pub const fn count(self) -> usize {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// Cost of a diagonal step.
pub const DIAGONAL_COST: f32 = 1.41;

// E, N, W, S, then NE, NW, SW, SE: the first four are the cardinal moves.
const STEPS: [(i32, i32, f32); 8] = [
    (1, 0, 1.0),
    (0, -1, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (1, -1, DIAGONAL_COST),
    (-1, -1, DIAGONAL_COST),
    (-1, 1, DIAGONAL_COST),
    (1, 1, DIAGONAL_COST),
];

/// Errors that can occur when parsing a map.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("map has no rows")]
    Empty,
    /// Rows have inconsistent widths.
    #[error("map row {row} is {found} cells wide, expected {expected}")]
    InconsistentSize {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside ` 1-9D|-+` was found.
    #[error("map contains invalid cell \u{201c}{ch}\u{201d} at {pos}")]
    InvalidCell { ch: char, pos: Point },
}

/// A rectangular map of [`Terrain`] with switchable doors.
///
/// Neighbors outside the map and walls are not enumerated; closed doors are
/// enumerated with an infinite cost. Changing the doors or the movement model
/// changes edge costs, so a [`statepath::Solver`] over this map must be reset
/// afterwards.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i32,
    height: i32,
    cells: Vec<Terrain>,
    doors_open: bool,
    directions: Directions,
}

impl GridMap {
    /// Parse a map given one string per row.
    pub fn from_rows(rows: &[&str]) -> Result<Self, MapError> {
        let expected = rows.first().ok_or(MapError::Empty)?.chars().count();
        let mut cells = Vec::with_capacity(expected * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != expected {
                return Err(MapError::InconsistentSize {
                    row: y,
                    expected,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let terrain = Terrain::from_char(ch).ok_or(MapError::InvalidCell {
                    ch,
                    pos: Point::new(x as i32, y as i32),
                })?;
                cells.push(terrain);
            }
        }
        if expected == 0 {
            return Err(MapError::Empty);
        }
        Ok(Self {
            width: expected as i32,
            height: rows.len() as i32,
            cells,
            doors_open: false,
            directions: Directions::default(),
        })
    }

    /// Parse a map given as newline-separated rows.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text.lines().collect();
        Self::from_rows(&rows)
    }

    pub fn with_directions(mut self, directions: Directions) -> Self {
        self.directions = directions;
        self
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Row-major index of `p`, `None` outside the map.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.in_bounds(p)
            .then(|| (p.y * self.width + p.x) as usize)
    }

    /// Point at row-major index `i`.
    #[inline]
    pub fn point(&self, i: usize) -> Point {
        let i = i as i32;
        Point::new(i % self.width, i / self.width)
    }

    /// Terrain at `p`; everything outside the map is wall.
    #[inline]
    pub fn terrain(&self, p: Point) -> Terrain {
        self.index(p).map_or(Terrain::Wall, |i| self.cells[i])
    }

    /// Whether `p` is floor or a door, regardless of the door state.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.terrain(p) != Terrain::Wall
    }

    #[inline]
    pub fn doors_open(&self) -> bool {
        self.doors_open
    }

    pub fn set_doors_open(&mut self, open: bool) {
        self.doors_open = open;
    }

    /// Flip the door state and return the new one.
    pub fn toggle_doors(&mut self) -> bool {
        self.doors_open = !self.doors_open;
        self.doors_open
    }

    #[inline]
    pub fn directions(&self) -> Directions {
        self.directions
    }

    pub fn set_directions(&mut self, directions: Directions) {
        self.directions = directions;
    }
}

impl Graph for GridMap {
    type Node = Point;

    /// Manhattan distance for cardinal movement, octile distance with
    /// [`DIAGONAL_COST`] diagonals otherwise. Both never exceed the cost of
    /// an unobstructed path of weight-1 cells.
    fn estimate(&self, from: Point, to: Point) -> f32 {
        match self.directions {
            Directions::Four => manhattan(from, to) as f32,
            Directions::Eight => {
                let dx = (from.x - to.x).abs();
                let dy = (from.y - to.y).abs();
                let diag = dx.min(dy);
                (dx.max(dy) - diag) as f32 + diag as f32 * DIAGONAL_COST
            }
        }
    }

    fn neighbors(&self, p: Point, buf: &mut Vec<StateCost<Point>>) {
        for &(dx, dy, step) in &STEPS[..self.directions.count()] {
            let q = p.shift(dx, dy);
            let cost = match self.terrain(q) {
                Terrain::Floor(weight) => step * f32::from(weight),
                Terrain::Door if self.doors_open => step,
                Terrain::Door => f32::INFINITY,
                Terrain::Wall => continue,
            };
            buf.push(StateCost::new(q, cost));
        }
    }

    fn contains(&self, p: Point) -> bool {
        self.in_bounds(p)
    }

    fn describe(&self, p: Point) -> String {
        p.to_string()
    }
}
