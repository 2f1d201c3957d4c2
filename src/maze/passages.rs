//! Passage matrices describing which walls of the grid are open

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MazeError, Result};

/// A grid cell as (row, col)
pub type Cell = (usize, usize);

/// One of the four axis-aligned directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Candidate order used when carving
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// (row, col) delta of a single step
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Open/closed state of every wall between adjacent cells.
///
/// `verticals[row][col]` is the wall between (row, col) and (row, col + 1);
/// `horizontals[row][col]` is the wall between (row, col) and (row + 1, col).
/// `true` means the wall has been removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPassages")]
pub struct Passages {
    rows: usize,
    cols: usize,
    verticals: Vec<Vec<bool>>,
    horizontals: Vec<Vec<bool>>,
}

/// Unchecked serialized form; shapes are verified on conversion
#[derive(Deserialize)]
struct RawPassages {
    rows: usize,
    cols: usize,
    verticals: Vec<Vec<bool>>,
    horizontals: Vec<Vec<bool>>,
}

impl TryFrom<RawPassages> for Passages {
    type Error = MazeError;

    fn try_from(raw: RawPassages) -> Result<Self> {
        let passages = Passages::from_matrices(raw.verticals, raw.horizontals)?;
        if passages.rows != raw.rows || passages.cols != raw.cols {
            return Err(MazeError::MalformedPassages {
                rows: raw.rows,
                cols: raw.cols,
            });
        }
        Ok(passages)
    }
}

impl Passages {
    /// All walls closed
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            verticals: vec![vec![false; cols - 1]; rows],
            horizontals: vec![vec![false; cols]; rows - 1],
        })
    }

    /// Wrap existing matrices, checking that their shapes agree
    pub fn from_matrices(verticals: Vec<Vec<bool>>, horizontals: Vec<Vec<bool>>) -> Result<Self> {
        let rows = verticals.len();
        let cols = verticals.first().map_or(0, |row| row.len() + 1);
        if rows == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        let shaped = verticals.iter().all(|row| row.len() == cols - 1)
            && horizontals.len() == rows - 1
            && horizontals.iter().all(|row| row.len() == cols);
        if !shaped {
            return Err(MazeError::MalformedPassages { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            verticals,
            horizontals,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn verticals(&self) -> &[Vec<bool>] {
        &self.verticals
    }

    pub fn horizontals(&self) -> &[Vec<bool>] {
        &self.horizontals
    }

    /// Neighbor of `cell` in `dir`, if it lies inside the grid
    pub fn neighbor(&self, cell: Cell, dir: Direction) -> Option<Cell> {
        let (dr, dc) = dir.delta();
        let row = cell.0.checked_add_signed(dr)?;
        let col = cell.1.checked_add_signed(dc)?;
        (row < self.rows && col < self.cols).then_some((row, col))
    }

    /// Whether the wall on the `dir` side of `cell` is open.
    /// Walls on the outer edge are never open.
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        let Some(next) = self.neighbor(cell, dir) else {
            return false;
        };
        match dir {
            Direction::Left | Direction::Right => self.verticals[cell.0][cell.1.min(next.1)],
            Direction::Up | Direction::Down => self.horizontals[cell.0.min(next.0)][cell.1],
        }
    }

    /// Remove the wall between `cell` and its neighbor in `dir`.
    /// The entry is indexed by the lower-indexed of the two cells.
    pub(crate) fn open(&mut self, cell: Cell, dir: Direction) {
        let (row, col) = cell;
        match dir {
            Direction::Left => self.verticals[row][col - 1] = true,
            Direction::Right => self.verticals[row][col] = true,
            Direction::Up => self.horizontals[row - 1][col] = true,
            Direction::Down => self.horizontals[row][col] = true,
        }
    }

    /// Cells reachable from `cell` through one open wall
    pub fn open_neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&dir| self.is_open(cell, dir))
            .filter_map(move |dir| self.neighbor(cell, dir))
    }

    pub fn open_vertical_count(&self) -> usize {
        self.verticals.iter().flatten().filter(|&&open| open).count()
    }

    pub fn open_horizontal_count(&self) -> usize {
        self.horizontals.iter().flatten().filter(|&&open| open).count()
    }

    pub fn open_count(&self) -> usize {
        self.open_vertical_count() + self.open_horizontal_count()
    }

    /// Number of interior walls still standing
    pub fn closed_count(&self) -> usize {
        let total = self.rows * (self.cols - 1) + (self.rows - 1) * self.cols;
        total - self.open_count()
    }
}

impl fmt::Display for Passages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+")?;
        for _ in 0..self.cols {
            write!(f, "---+")?;
        }
        writeln!(f)?;

        for row in 0..self.rows {
            write!(f, "|")?;
            for col in 0..self.cols {
                let side = if self.is_open((row, col), Direction::Right) { ' ' } else { '|' };
                write!(f, "   {side}")?;
            }
            writeln!(f)?;

            write!(f, "+")?;
            for col in 0..self.cols {
                let floor = if self.is_open((row, col), Direction::Down) { "   " } else { "---" };
                write!(f, "{floor}+")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
