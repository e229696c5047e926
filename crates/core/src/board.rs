//! Board module - manages the game grid
//!
//! The board is a `width x height` grid (12x20 by default) where each cell is
//! empty or holds a cell kind. Cells live in one flat row-major vector sized once
//! at construction; dimensions never change afterwards.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Pieces may hang above the top edge (y < 0) but never past the sides or the floor.

use crate::error::{EngineError, Result};
use crate::pieces::PieceMatrix;
use crate::types::{CellKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_BOARD_DIM, MIN_BOARD_DIM};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: u8,
    height: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<CellKind>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: u8, height: u8) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![CellKind::Empty; width as usize * height as usize],
        })
    }

    /// Build a board from rows of cells (top row first)
    pub fn from_rows(rows: &[Vec<CellKind>]) -> Result<Self> {
        let height = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let width = rows
            .first()
            .map_or(0, |row| u8::try_from(row.len()).unwrap_or(u8::MAX));
        check_dimensions(width, height)?;
        if let Some(y) = rows.iter().position(|row| row.len() != width as usize) {
            return Err(EngineError::RaggedRow {
                row: y,
                expected: width as usize,
                found: rows[y].len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells: rows.concat(),
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<CellKind> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: CellKind) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if cell.is_occupied())
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= self.width as i8 || y < 0 || y >= self.height as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_occupied()))
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> Option<&[CellKind]> {
        if y >= self.height as usize {
            return None;
        }
        let start = y * self.width as usize;
        Some(&self.cells[start..start + self.width as usize])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> + '_ {
        self.cells.chunks_exact(self.width as usize)
    }

    /// Whether `matrix` anchored at (x, y) overlaps the board or its walls
    ///
    /// Only occupied matrix cells count. A cell collides when it lands on an
    /// occupied board cell, left of column 0, right of the last column, or below
    /// the last row. Cells above the top edge are allowed.
    pub fn collides(&self, matrix: &PieceMatrix, x: i8, y: i8) -> bool {
        matrix.minos().iter().any(|&(dx, dy, _)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= self.width as i8 || py >= self.height as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Write the occupied cells of `matrix` anchored at (x, y) into the board
    ///
    /// Cells above the top edge have nowhere to go and are discarded. Returns the
    /// number of cells written.
    pub fn merge(&mut self, matrix: &PieceMatrix, x: i8, y: i8) -> usize {
        let mut written = 0;
        for &(dx, dy, cell) in matrix.minos().iter() {
            if self.set(x + dx, y + dy, cell) {
                written += 1;
            }
        }
        written
    }

    /// Remove every full row, shift the rest down and refill the top with empty rows
    ///
    /// Rows are scanned bottom to top with a read and a write cursor, so each row is
    /// examined exactly once no matter how many rows are removed below it.
    /// Returns the number of rows removed.
    pub fn sweep(&mut self) -> usize {
        let width = self.width as usize;
        let mut write_y = self.height as usize;
        let mut cleared = 0;

        for read_y in (0..self.height as usize).rev() {
            if self.is_row_full(read_y) {
                cleared += 1;
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        self.cells[..write_y * width].fill(CellKind::Empty);

        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[CellKind] {
        &self.cells
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(CellKind::Empty);
    }

    /// Copy the grid into one vector per row
    pub fn to_rows(&self) -> Vec<Vec<CellKind>> {
        self.rows().map(<[CellKind]>::to_vec).collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![CellKind::Empty; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
        }
    }
}

/// Reject boards the engine cannot address or spawn pieces on
pub(crate) fn check_dimensions(width: u8, height: u8) -> Result<()> {
    let range = MIN_BOARD_DIM..=MAX_BOARD_DIM;
    if !range.contains(&width) || !range.contains(&height) {
        return Err(EngineError::InvalidDimensions { width, height });
    }
    Ok(())
}
