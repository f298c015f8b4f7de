use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use rand::Rng;

use super::error::{BoardError, SolverResult};
use super::util::Position;

/// Rectangular grid of lower-cased letters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Letters on the board, one row per entry
    state: Vec<Vec<char>>,
    cols: usize,
}

impl Board {
    /// Validates the shape of `rows` and lower-cases every cell.
    /// Fails on an empty board, an empty row or rows of unequal length.
    pub fn new(rows: Vec<Vec<char>>) -> Result<Self, BoardError> {
        let cols = match rows.first() {
            None => return Err(BoardError::Empty),
            Some(first) => first.len(),
        };
        for (row, cells) in rows.iter().enumerate() {
            if cells.is_empty() {
                return Err(BoardError::EmptyRow { row });
            }
            if cells.len() != cols {
                return Err(BoardError::Ragged {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }

        let state = rows
            .into_iter()
            .map(|cells| cells.into_iter().map(normalize).collect())
            .collect();
        Ok(Self { state, cols })
    }

    /// Builds a board from string cells, each of which must be a single character
    pub fn from_cells<R, S>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut grid = Vec::with_capacity(rows.len());
        for (row, cells) in rows.iter().enumerate() {
            let mut letters = Vec::with_capacity(cells.as_ref().len());
            for (col, cell) in cells.as_ref().iter().enumerate() {
                let cell = cell.as_ref();
                let mut chars = cell.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => letters.push(c),
                    _ => {
                        return Err(BoardError::InvalidCell {
                            row,
                            col,
                            value: cell.to_string(),
                        })
                    }
                }
            }
            grid.push(letters);
        }
        Self::new(grid)
    }

    /// Reads a board stored as a JSON array of rows of single-letter strings,
    /// e.g. `[["c", "a"], ["t", "s"]]`
    pub fn from_file<P: AsRef<Path>>(path: P) -> SolverResult<Self> {
        let file = File::open(path.as_ref())?;
        let raw_board: Vec<Vec<String>> = serde_json::from_reader(BufReader::new(file))?;
        Ok(Self::from_cells(&raw_board)?)
    }

    /// Fills a board with uniformly random lower case letters.
    /// `rows` and `cols` are clamped to at least 1.
    pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let state = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| rng.gen_range(b'a'..=b'z') as char)
                    .collect()
            })
            .collect();
        Self { state, cols }
    }

    pub fn rows(&self) -> usize {
        self.state.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.rows() * self.cols
    }

    /// Boards always hold at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every position on the board in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.cols).map(move |col| Position { row, col }))
    }

    /// In-bounds neighbours of `pos`
    pub fn adjacent(&self, pos: Position) -> Vec<Position> {
        pos.adjacent(self.rows(), self.cols)
    }

    /// Letters spelled by following `path` across the board
    pub fn spell(&self, path: &[Position]) -> String {
        path.iter().map(|&p| self[p]).collect()
    }
}

fn normalize(c: char) -> char {
    // Letters whose lower case form is several chars keep their first one
    c.to_lowercase().next().unwrap_or(c)
}

impl std::ops::Index<Position> for Board {
    type Output = char;

    fn index(&self, index: Position) -> &Self::Output {
        &self.state[index.row][index.col]
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses rows separated by newlines, commas or whitespace, one cell per character
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|r| !r.is_empty())
            .map(|r| r.chars().collect())
            .collect();
        Self::new(rows)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.state.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let line = row
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}
