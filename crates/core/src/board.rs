//! Board module - manages the game grid
//!
//! The board is a square `width x width` grid where each cell is empty or holds a candy.
//! Uses a flat row-major vector: index `i` lives at `(row, col) = (i / width, i % width)`.
//! The length is fixed at construction and is always exactly `width * width`.

use std::fmt;

use crate::error::ConfigError;
use crate::palette::Palette;
use crate::rng::SimpleRng;
use crate::types::{cell_code, CandyKind, Cell, MAX_BOARD_WIDTH, MIN_BOARD_WIDTH};

/// The game board - square grid using flat storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    /// Flat array of cells, row-major order (row * width + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize) -> Result<Self, ConfigError> {
        let width = Self::check_width(width)?;
        Ok(Self {
            width,
            cells: vec![None; width * width],
        })
    }

    /// Create a board filled with uniformly random candies from `palette`
    pub fn random(width: usize, palette: &Palette, rng: &mut SimpleRng) -> Result<Self, ConfigError> {
        let mut board = Self::new(width)?;
        for cell in &mut board.cells {
            *cell = Some(palette.pick(rng));
        }
        Ok(board)
    }

    /// Create from a flat row-major vector of cells
    pub fn from_cells(width: usize, cells: Vec<Cell>) -> Result<Self, ConfigError> {
        let width = Self::check_width(width)?;
        if cells.len() != width * width {
            return Err(ConfigError::CellCount {
                expected: width * width,
                actual: cells.len(),
            });
        }
        Ok(Self { width, cells })
    }

    /// Parse a board from one string per row.
    ///
    /// Candy letters are `R O Y G B P` (any case); `.` is an empty cell.
    /// Whitespace inside a row is ignored.
    pub fn from_rows(rows: &[&str]) -> Result<Self, ConfigError> {
        let width = Self::check_width(rows.len())?;
        let mut cells = Vec::with_capacity(width * width);
        for (row, line) in rows.iter().enumerate() {
            let before = cells.len();
            for (col, ch) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                let cell = match ch {
                    '.' => None,
                    _ => Some(
                        CandyKind::from_char(ch).ok_or(ConfigError::InvalidCell { row, col, ch })?,
                    ),
                };
                cells.push(cell);
            }
            let actual = cells.len() - before;
            if actual != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    actual,
                });
            }
        }
        Ok(Self { width, cells })
    }

    fn check_width(width: usize) -> Result<usize, ConfigError> {
        if width < MIN_BOARD_WIDTH as usize || width > MAX_BOARD_WIDTH as usize {
            return Err(ConfigError::InvalidWidth(width));
        }
        Ok(width)
    }

    /// Get width of the board
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get height of the board (equal to the width)
    pub fn height(&self) -> usize {
        self.width
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a board has at least nine cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Calculate flat index from (row, col) coordinates
    #[inline(always)]
    pub fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.width || col >= self.width {
            return None;
        }
        Some(row * self.width + col)
    }

    /// Calculate (row, col) from a flat index
    #[inline(always)]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.cells.len() {
            return None;
        }
        Some((index / self.width, index % self.width))
    }

    /// Get cell at flat index
    /// Returns None if out of bounds
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Get cell at (row, col)
    pub fn get_at(&self, row: usize, col: usize) -> Option<Cell> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set cell at flat index
    /// Returns false if out of bounds
    pub fn set(&mut self, index: usize, cell: Cell) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchange the values of two cells.
    /// Returns false (and leaves the board untouched) if either index is out of bounds
    pub fn swap(&mut self, a: usize, b: usize) -> bool {
        if a >= self.cells.len() || b >= self.cells.len() {
            return false;
        }
        self.cells.swap(a, b);
        true
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        if row >= self.width {
            return None;
        }
        let start = row * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Number of empty cells
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn has_empty(&self) -> bool {
        self.cells.iter().any(|c| c.is_none())
    }

    /// Write snapshot codes (0 = empty, 1..=6 = candy), reusing `out`'s allocation.
    pub fn write_codes(&self, out: &mut Vec<u8>) {
        out.clear();
        out.extend(self.cells.iter().map(|&c| cell_code(c)));
    }

    /// One string per row, in the format accepted by [`Board::from_rows`]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|c| cell_char(*c)).collect())
            .collect()
    }
}

fn cell_char(cell: Cell) -> char {
    cell.map(|k| k.as_char()).unwrap_or('.')
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.width).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell_char(*cell))?;
            }
        }
        Ok(())
    }
}
