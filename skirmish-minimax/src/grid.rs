//! Grid geometry: positions, the four cardinal directions and the static arena the units fight
//! in.

use std::{collections::HashSet, fmt::Display};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
/// A cell on the map
///
/// Two positions are the same cell iff both coordinates match
pub struct Position {
    #[allow(missing_docs)]
    pub x: i32,
    #[allow(missing_docs)]
    pub y: i32,
}

impl Position {
    /// Construct a new position
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// |Δx| + |Δy|
    pub fn manhattan_distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The larger of |Δx| and |Δy|. This is what ranged attacks are measured in
    pub fn chebyshev_distance(&self, other: &Self) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    /// The position one step away in the given direction
    ///
    /// No bounds checking happens here
    pub fn step(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four cardinal neighbors of this position, paired with the direction that reaches
    /// them. Callers are responsible for filtering out anything off the map
    pub fn neighbors(&self) -> [(Direction, Self); 4] {
        Direction::all().map(|d| (d, self.step(d)))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// One of the four cardinal directions. There are no diagonal moves
pub enum Direction {
    /// Towards y = 0
    North,
    #[allow(missing_docs)]
    East,
    /// Away from y = 0
    South,
    #[allow(missing_docs)]
    West,
}

impl Direction {
    /// All the directions in the order they are tried during move generation
    pub const fn all() -> [Self; 4] {
        [Self::North, Self::East, Self::South, Self::West]
    }

    /// The (dx, dy) a single step in this direction applies
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The static part of the map: its extents and the impassable cells
///
/// Extents are inclusive, so a 5x5 arena is built with `width = 4, height = 4` when the host
/// reports the last valid index, and cells `0..=width` by `0..=height` are all on the map.
pub struct Arena {
    width: i32,
    height: i32,
    obstacles: HashSet<Position>,
}

impl Arena {
    /// Build an arena from its extents and obstacle cells
    pub fn new(width: i32, height: i32, obstacles: impl IntoIterator<Item = Position>) -> Self {
        Self {
            width,
            height,
            obstacles: obstacles.into_iter().collect(),
        }
    }

    /// An arena with no obstacles
    pub fn open(width: i32, height: i32) -> Self {
        Self::new(width, height, [])
    }

    #[allow(missing_docs)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[allow(missing_docs)]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[allow(missing_docs)]
    pub fn obstacles(&self) -> &HashSet<Position> {
        &self.obstacles
    }

    /// `0 <= x <= width` and `0 <= y <= height`
    pub fn in_bounds(&self, p: &Position) -> bool {
        p.x >= 0 && p.x <= self.width && p.y >= 0 && p.y <= self.height
    }

    #[allow(missing_docs)]
    pub fn is_obstacle(&self, p: &Position) -> bool {
        self.obstacles.contains(p)
    }

    /// On the map and not blocked by an obstacle. Units are not considered here
    pub fn is_open(&self, p: &Position) -> bool {
        self.in_bounds(p) && !self.is_obstacle(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(1, 1);
        let b = Position::new(4, -1);

        assert_eq!(a.manhattan_distance(&b), 5);
        assert_eq!(b.manhattan_distance(&a), 5);
        assert_eq!(a.manhattan_distance(&a), 0);
    }

    #[test]
    fn test_chebyshev_distance() {
        let a = Position::new(0, 0);

        assert_eq!(a.chebyshev_distance(&Position::new(3, 7)), 7);
        assert_eq!(a.chebyshev_distance(&Position::new(-4, 2)), 4);
    }

    #[test]
    fn test_neighbors_are_cardinal_and_unfiltered() {
        let neighbors = Position::new(0, 0).neighbors();

        assert_eq!(
            neighbors,
            [
                (Direction::North, Position::new(0, -1)),
                (Direction::East, Position::new(1, 0)),
                (Direction::South, Position::new(0, 1)),
                (Direction::West, Position::new(-1, 0)),
            ]
        );
    }

    #[test]
    fn test_arena_bounds_are_inclusive() {
        let arena = Arena::new(4, 4, [Position::new(2, 2)]);

        assert!(arena.in_bounds(&Position::new(0, 0)));
        assert!(arena.in_bounds(&Position::new(4, 4)));
        assert!(!arena.in_bounds(&Position::new(5, 4)));
        assert!(!arena.in_bounds(&Position::new(0, -1)));

        assert!(arena.is_obstacle(&Position::new(2, 2)));
        assert!(!arena.is_open(&Position::new(2, 2)));
        assert!(arena.is_open(&Position::new(2, 3)));
    }
}
