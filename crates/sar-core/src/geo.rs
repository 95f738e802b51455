//! Grid coordinates and the 8-way compass.
//!
//! The grid uses screen orientation: `x` grows to the east, `y` grows to the
//! south.  `Direction::ALL` lists the compass clockwise starting at north,
//! which is also the order in which proximity probes are reported.

use std::fmt;

// ── Position ──────────────────────────────────────────────────────────────────

/// An integer grid cell.  Equality and hashing are by value.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The cell one step away in `dir`.
    #[inline]
    pub fn step(self, dir: Direction) -> Position {
        let (dx, dy) = dir.delta();
        self.offset(dx, dy)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Position {
        Position::new(self.x + dx, self.y + dy)
    }

    /// `(dx, dy)` from `self` to `other`.
    #[inline]
    pub fn delta_to(self, other: Position) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    #[inline]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[inline]
    pub fn chebyshev(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// `true` if `other` is one of the eight cells surrounding `self`.
    #[inline]
    pub fn is_adjacent8(self, other: Position) -> bool {
        self != other && self.chebyshev(other) == 1
    }

    /// Greedy single step toward `target`: each coordinate moves by at most
    /// one unit in the direction that reduces its delta, so the move is
    /// diagonal whenever both deltas are non-zero.
    ///
    /// Returns `self` unchanged when already at `target`.
    pub fn step_toward(self, target: Position) -> Position {
        let dx = (target.x - self.x).signum();
        let dy = (target.y - self.y).signum();
        self.offset(dx, dy)
    }

    /// Iterator over the eight neighbours in `Direction::ALL` order.
    pub fn neighbors8(self) -> impl Iterator<Item = Position> {
        Direction::ALL.into_iter().map(move |d| self.step(d))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the eight compass moves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// Clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(dx, dy)` unit offset; north is `y - 1`.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North     => (0, -1),
            Direction::NorthEast => (1, -1),
            Direction::East      => (1, 0),
            Direction::SouthEast => (1, 1),
            Direction::South     => (0, 1),
            Direction::SouthWest => (-1, 1),
            Direction::West      => (-1, 0),
            Direction::NorthWest => (-1, -1),
        }
    }

    /// Position of `self` in [`Direction::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Direction::index`], wrapping modulo 8.
    #[inline]
    pub fn from_index(i: usize) -> Direction {
        Direction::ALL[i % 8]
    }

    /// Map a unit offset back to a direction.  `None` for `(0, 0)` or any
    /// offset outside `{-1, 0, 1}²`.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Direction> {
        Direction::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }

    #[inline]
    pub fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }

    /// `Direction::ALL` rotated so that it starts at `self`.
    pub fn rotation_from(self) -> [Direction; 8] {
        let start = self.index();
        std::array::from_fn(|i| Direction::from_index(start + i))
    }
}
