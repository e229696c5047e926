//! Pieces module - tetromino catalog, matrix rotation and wall kicks
//!
//! Every piece is a square matrix of cell kinds (2x2 for O, 4x4 for I, 3x3 for
//! the rest) so a single transpose-based rotation works for the whole catalog.
//! Matrices are stored inline in a fixed 4x4 array; only the top-left
//! `size x size` block is meaningful.

use arrayvec::ArrayVec;

use crate::types::{CellKind, PieceKind, RotateDir, MAX_PIECE_SIZE};

/// Occupied cell of a piece: column and row offset from the anchor plus its kind
pub type Mino = (i8, i8, CellKind);

/// Upper bound on occupied cells of any matrix
pub const MAX_MINOS: usize = MAX_PIECE_SIZE * MAX_PIECE_SIZE;

type Grid = [[CellKind; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];

/// Square matrix of cell kinds describing a piece in one orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceMatrix {
    /// Row-major cells, `cells[y][x]`
    cells: Grid,
    size: u8,
}

impl PieceMatrix {
    const fn from_grid(size: u8, cells: Grid) -> Self {
        Self { cells, size }
    }

    /// Build a matrix from square rows
    ///
    /// Returns None unless `rows` is square with a side of 1 to 4.
    pub fn from_rows(rows: &[&[CellKind]]) -> Option<Self> {
        let size = rows.len();
        if size == 0 || size > MAX_PIECE_SIZE || rows.iter().any(|row| row.len() != size) {
            return None;
        }
        let mut cells = [[CellKind::Empty; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in rows.iter().enumerate() {
            cells[y][..size].copy_from_slice(row);
        }
        Some(Self::from_grid(size as u8, cells))
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at (x, y); empty outside the matrix
    pub fn get(&self, x: usize, y: usize) -> CellKind {
        if x >= self.size() || y >= self.size() {
            return CellKind::Empty;
        }
        self.cells[y][x]
    }

    /// Rows of the meaningful `size x size` block
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> + '_ {
        let size = self.size();
        self.cells[..size].iter().map(move |row| &row[..size])
    }

    /// Occupied cells with their offsets from the anchor
    pub fn minos(&self) -> ArrayVec<Mino, MAX_MINOS> {
        let mut minos = ArrayVec::new();
        for (y, row) in self.rows().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell.is_occupied() {
                    minos.push((x as i8, y as i8, cell));
                }
            }
        }
        minos
    }

    /// Same shape with every occupied cell recoloured as [`CellKind::Special`]
    pub fn to_special(&self) -> Self {
        let mut out = *self;
        for row in out.cells.iter_mut() {
            for cell in row.iter_mut() {
                if cell.is_occupied() {
                    *cell = CellKind::Special;
                }
            }
        }
        out
    }

    /// Matrix rotated by 90° in `dir`
    ///
    /// Clockwise is a transpose followed by reversing each row; counter-clockwise
    /// is a transpose followed by reversing the row order. The two are exact
    /// inverses.
    pub fn rotated(&self, dir: RotateDir) -> Self {
        let n = self.size();
        let mut out = [[CellKind::Empty; MAX_PIECE_SIZE]; MAX_PIECE_SIZE];
        for (y, row) in out.iter_mut().enumerate().take(n) {
            for (x, cell) in row.iter_mut().enumerate().take(n) {
                *cell = match dir {
                    RotateDir::Clockwise => self.cells[n - 1 - x][y],
                    RotateDir::CounterClockwise => self.cells[x][n - 1 - y],
                };
            }
        }
        Self::from_grid(self.size, out)
    }
}

const E: CellKind = CellKind::Empty;

const T_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::T;
    PieceMatrix::from_grid(3, [[E, C, E, E], [C, C, C, E], [E, E, E, E], [E, E, E, E]])
};

const J_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::J;
    PieceMatrix::from_grid(3, [[E, C, E, E], [E, C, E, E], [C, C, E, E], [E, E, E, E]])
};

const L_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::L;
    PieceMatrix::from_grid(3, [[E, C, E, E], [E, C, E, E], [E, C, C, E], [E, E, E, E]])
};

const O_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::O;
    PieceMatrix::from_grid(2, [[C, C, E, E], [C, C, E, E], [E, E, E, E], [E, E, E, E]])
};

const S_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::S;
    PieceMatrix::from_grid(3, [[E, C, C, E], [C, C, E, E], [E, E, E, E], [E, E, E, E]])
};

const Z_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::Z;
    PieceMatrix::from_grid(3, [[C, C, E, E], [E, C, C, E], [E, E, E, E], [E, E, E, E]])
};

const I_MATRIX: PieceMatrix = {
    const C: CellKind = CellKind::I;
    PieceMatrix::from_grid(4, [[E, C, E, E], [E, C, E, E], [E, C, E, E], [E, C, E, E]])
};

/// Spawn-orientation matrix for a piece kind
pub fn get_shape(kind: PieceKind) -> PieceMatrix {
    match kind {
        PieceKind::T => T_MATRIX,
        PieceKind::J => J_MATRIX,
        PieceKind::L => L_MATRIX,
        PieceKind::O => O_MATRIX,
        PieceKind::S => S_MATRIX,
        PieceKind::Z => Z_MATRIX,
        PieceKind::I => I_MATRIX,
    }
}

/// Spawn row of every new piece
pub const SPAWN_Y: i8 = 0;

/// Spawn column that centres a matrix of `size` on a board of `board_width`
pub fn spawn_x(board_width: u8, size: usize) -> i8 {
    (board_width / 2) as i8 - (size / 2) as i8
}

/// Horizontal shifts tried, in order, after rotating a matrix of `size`
///
/// The search walks increments +1, -2, +3, -4, ... from the rotated position,
/// so the positions visited are 0, +1, -1, +2, -2, ... relative to the start.
/// It stops before the increment whose magnitude would exceed `size + 1`, which
/// leaves `size + 1` candidates: 3 for O, 4 for the 3x3 pieces, 5 for I.
pub fn kick_offsets(size: usize) -> impl Iterator<Item = i8> {
    (0..=size as i8).map(|k| if k % 2 == 1 { (k + 1) / 2 } else { -(k / 2) })
}

/// Try to rotate a matrix anchored at column `x`, kicking it sideways if needed
///
/// `fits(matrix, x)` reports whether the matrix can sit at column `x` (the row
/// is fixed by the caller). Returns the rotated matrix and the kick that made it
/// fit, or None when every candidate collides.
pub fn try_rotate(
    matrix: &PieceMatrix,
    x: i8,
    dir: RotateDir,
    fits: impl Fn(&PieceMatrix, i8) -> bool,
) -> Option<(PieceMatrix, i8)> {
    let rotated = matrix.rotated(dir);
    kick_offsets(rotated.size())
        .find(|&dx| fits(&rotated, x + dx))
        .map(|dx| (rotated, dx))
}
