//! Board module - manages the game grid
//!
//! The grid is 10 columns x 24 rows stored as a flat array. The top
//! `HIDDEN_ROWS` rows sit above the visible playfield and act as spawn buffer;
//! a filled cell there means the stack reached the top.
//!
//! Coordinates: `(x, y)` where x ranges 0..9 (left to right) and y ranges 0..23
//! (top of the hidden region to the bottom). Visible row `v` is grid row
//! `v + HIDDEN_ROWS`.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{
    BlockColor, Cell, ParseError, ShapeKind, BOARD_WIDTH, GRID_HEIGHT, HIDDEN_ROWS,
    VISIBLE_HEIGHT,
};

/// Total number of cells on the grid
const GRID_SIZE: usize = BOARD_WIDTH as usize * GRID_HEIGHT as usize;

/// Row indices removed by one [`Board::clear_full_rows`] call
pub type ClearedRows = ArrayVec<usize, { GRID_HEIGHT as usize }>;

/// The game grid - 10 columns x 24 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// The last string is the bottom grid row. `.` is an empty cell, a shape
    /// letter (`I`, `O`, `T`, `S`, `Z`, `J`, `L`, any case) a filled one.
    /// Rows above the given ones stay empty.
    ///
    /// ```
    /// use blockfall_core::Board;
    ///
    /// let board = Board::from_rows(&[
    ///     "T.........",
    ///     "IIIIIIIII.",
    /// ])
    /// .unwrap();
    /// assert!(board.block_at(0, 18).is_some());
    /// assert!(board.block_at(9, 19).is_none());
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<Self, ParseError> {
        let height = GRID_HEIGHT as usize;
        let width = BOARD_WIDTH as usize;
        if rows.len() > height {
            return Err(ParseError::TooManyRows {
                rows: rows.len(),
                max: height,
            });
        }

        let mut board = Self::new();
        let top = height - rows.len();
        for (i, row) in rows.iter().enumerate() {
            let len = row.chars().count();
            if len != width {
                return Err(ParseError::RowWidth {
                    row: i,
                    len,
                    expected: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(other.to_string().parse::<ShapeKind>()?),
                };
                board.cells[(top + i) * width + x] = cell;
            }
        }
        Ok(board)
    }

    /// Calculate flat index from (x, y) grid coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get total grid height, hidden rows included
    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at grid position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at grid position (x, y)
    /// Returns false if out of bounds
    pub(crate) fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if grid position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether every occupied cell of `piece` may sit on the grid.
    ///
    /// Cells left of column 0, right of the last column or below the bottom
    /// row are rejected, as are cells on occupied grid cells. Cells above the
    /// grid (negative rows) are accepted.
    pub fn can_place(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 || y >= GRID_HEIGHT as i8 {
                return false;
            }
            y < 0 || !self.is_occupied(x, y)
        })
    }

    /// Commit every in-grid cell of `piece` with its shape.
    ///
    /// Cells outside the grid are dropped.
    pub fn place(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind()));
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= GRID_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared (sorted bottom to top)
    /// Uses a two-pointer algorithm with zero-allocation: every full row is
    /// dropped in a single pass and the rest compact downward in order.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = GRID_HEIGHT as usize;

        // Scan from bottom to top
        for read_y in (0..GRID_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
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

        // Empty the rows freed at the top
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared_rows
    }

    /// Clear all full rows, returning how many were removed
    pub fn clear_lines(&mut self) -> usize {
        self.clear_full_rows().len()
    }

    /// True when any hidden-row cell is occupied
    pub fn is_game_over(&self) -> bool {
        let end = HIDDEN_ROWS as usize * BOARD_WIDTH as usize;
        self.cells[..end].iter().any(|cell| cell.is_some())
    }

    /// Shape at visible position (x, y), `None` if empty or out of range
    pub fn cell_at(&self, x: i8, y: i8) -> Cell {
        if y < 0 || y >= VISIBLE_HEIGHT as i8 {
            return None;
        }
        self.get(x, y + HIDDEN_ROWS as i8).flatten()
    }

    /// Color at visible position (x, y), `None` if empty or out of range
    pub fn block_at(&self, x: i8, y: i8) -> Option<BlockColor> {
        self.cell_at(x, y).map(|kind| kind.color())
    }

    /// The visible rows, top to bottom
    pub fn visible_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells[HIDDEN_ROWS as usize * BOARD_WIDTH as usize..].chunks(BOARD_WIDTH as usize)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
