use std::slice::Iter;

use serde::{Deserialize, Serialize};

/// One of the eight compass directions a word path can take from a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Direction {
    /// Iterates the directions in the fixed exploration order
    pub fn iter() -> Iter<'static, Direction> {
        static DIRS: [Direction; 8] = [
            Direction::NorthWest,
            Direction::North,
            Direction::NorthEast,
            Direction::West,
            Direction::East,
            Direction::SouthWest,
            Direction::South,
            Direction::SouthEast,
        ];
        DIRS.iter()
    }

    /// Row and column delta of a single step in this direction
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Self::NorthWest => (-1, -1),
            Self::North => (-1, 0),
            Self::NorthEast => (-1, 1),
            Self::West => (0, -1),
            Self::East => (0, 1),
            Self::SouthWest => (1, -1),
            Self::South => (1, 0),
            Self::SouthEast => (1, 1),
        }
    }

    pub fn flip(&self) -> Self {
        match self {
            Self::NorthWest => Self::SouthEast,
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::West => Self::East,
            Self::East => Self::West,
            Self::SouthWest => Self::NorthEast,
            Self::South => Self::North,
            Self::SouthEast => Self::NorthWest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns the neighbouring position in the given direction, provided it
    /// lies inside a `rows` x `cols` grid
    pub fn step(&self, dir: Direction, rows: usize, cols: usize) -> Option<Position> {
        let (d_row, d_col) = dir.offset();
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        if row < rows && col < cols {
            Some(Position { row, col })
        } else {
            None
        }
    }

    /// Returns all the in-bounds neighbours of this position, in exploration order
    pub fn adjacent(&self, rows: usize, cols: usize) -> Vec<Position> {
        Direction::iter()
            .filter_map(|&d| self.step(d, rows, cols))
            .collect()
    }

    /// Two cells are adjacent if they differ by at most one row and one column
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self != other && self.row.abs_diff(other.row) <= 1 && self.col.abs_diff(other.col) <= 1
    }

    /// Converts the row/col to a 1d index
    pub fn as_index(&self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_has_three_neighbours() {
        let corner = Position::new(0, 0);
        let adj = corner.adjacent(3, 3);
        assert_eq!(
            adj,
            vec![Position::new(0, 1), Position::new(1, 0), Position::new(1, 1)]
        );
    }

    #[test]
    fn test_centre_has_eight_neighbours_in_order() {
        let centre = Position::new(1, 1);
        let adj = centre.adjacent(3, 3);
        assert_eq!(adj.len(), 8);
        assert_eq!(adj[0], Position::new(0, 0));
        assert_eq!(adj[7], Position::new(2, 2));
    }

    #[test]
    fn test_single_cell_has_no_neighbours() {
        assert!(Position::new(0, 0).adjacent(1, 1).is_empty());
    }

    #[test]
    fn test_step_and_flip() {
        let p = Position::new(2, 2);
        for &d in Direction::iter() {
            let next = p.step(d, 5, 5).unwrap();
            assert!(p.is_adjacent(&next));
            assert_eq!(next.step(d.flip(), 5, 5), Some(p));
        }
    }

    #[test]
    fn test_is_adjacent() {
        let p = Position::new(1, 1);
        assert!(!p.is_adjacent(&p));
        assert!(p.is_adjacent(&Position::new(0, 2)));
        assert!(!p.is_adjacent(&Position::new(3, 1)));
    }
}
