//! Piece module - tetromino shapes and clockwise rotation
//!
//! Each shape is stored once as an NxN occupancy matrix in its spawn
//! orientation (N = 2 for O, 4 for I, 3 for the rest). The matrix for any other
//! orientation is derived by rotating 90° clockwise `rotation` times, so a
//! [`Piece`] only carries its rotation index, never a cached matrix.

use crate::types::ShapeKind;

/// Largest matrix side (the I piece)
pub const MAX_MASK_SIZE: usize = 4;

/// Offset of a single mino relative to the piece anchor, as `(dx, dy)`
pub type MinoOffset = (i8, i8);

/// Square occupancy matrix of a piece in one orientation.
///
/// `rows[r][c]` is the cell `c` columns right of and `r` rows below the anchor.
/// Only the top-left `size x size` corner is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mask {
    size: usize,
    rows: [[bool; MAX_MASK_SIZE]; MAX_MASK_SIZE],
}

impl Mask {
    const fn from_rows<const N: usize>(matrix: [[bool; N]; N]) -> Self {
        let mut rows = [[false; MAX_MASK_SIZE]; MAX_MASK_SIZE];
        let mut r = 0;
        while r < N {
            let mut c = 0;
            while c < N {
                rows[r][c] = matrix[r][c];
                c += 1;
            }
            r += 1;
        }
        Self { size: N, rows }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the cell at column `c`, row `r` is occupied
    pub fn get(&self, c: usize, r: usize) -> bool {
        c < self.size && r < self.size && self.rows[r][c]
    }

    /// The matrix rotated 90° clockwise: `out[j][n-1-i] = self[i][j]`
    pub fn rotated_clockwise(&self) -> Self {
        let n = self.size;
        let mut rows = [[false; MAX_MASK_SIZE]; MAX_MASK_SIZE];
        for (i, row) in self.rows.iter().enumerate().take(n) {
            for (j, &filled) in row.iter().enumerate().take(n) {
                rows[j][n - 1 - i] = filled;
            }
        }
        Self { size: n, rows }
    }

    /// Occupied cells as `(dx, dy)` offsets, row-major
    pub fn offsets(&self) -> impl Iterator<Item = MinoOffset> + '_ {
        let n = self.size;
        self.rows
            .iter()
            .take(n)
            .enumerate()
            .flat_map(move |(r, row)| {
                row.iter()
                    .take(n)
                    .enumerate()
                    .filter(|&(_, filled)| *filled)
                    .map(move |(c, _)| (c as i8, r as i8))
            })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.offsets().count()
    }
}

const X: bool = true;
const O: bool = false;

const I_MASK: Mask = Mask::from_rows([[O, O, O, O], [X, X, X, X], [O, O, O, O], [O, O, O, O]]);
const O_MASK: Mask = Mask::from_rows([[X, X], [X, X]]);
const T_MASK: Mask = Mask::from_rows([[O, X, O], [X, X, X], [O, O, O]]);
const S_MASK: Mask = Mask::from_rows([[O, X, X], [X, X, O], [O, O, O]]);
const Z_MASK: Mask = Mask::from_rows([[X, X, O], [O, X, X], [O, O, O]]);
const J_MASK: Mask = Mask::from_rows([[X, O, O], [X, X, X], [O, O, O]]);
const L_MASK: Mask = Mask::from_rows([[O, O, X], [X, X, X], [O, O, O]]);

/// Spawn-orientation matrix of a shape
pub fn base_mask(kind: ShapeKind) -> Mask {
    match kind {
        ShapeKind::I => I_MASK,
        ShapeKind::O => O_MASK,
        ShapeKind::T => T_MASK,
        ShapeKind::S => S_MASK,
        ShapeKind::Z => Z_MASK,
        ShapeKind::J => J_MASK,
        ShapeKind::L => L_MASK,
    }
}

/// A tetromino value: shape, grid anchor and rotation index.
///
/// Pieces are immutable. [`Piece::moved`] and [`Piece::rotated_clockwise`]
/// return new values and never check the board, so a candidate can be built
/// and tested with [`Board::can_place`](crate::Board::can_place) before it
/// replaces the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    x: i8,
    y: i8,
    rotation: u8,
}

impl Piece {
    /// Create a piece at the staging position `(0, 0)` in spawn orientation
    pub fn new(kind: ShapeKind) -> Self {
        Self::at(kind, 0, 0)
    }

    /// Create a piece anchored at grid position `(x, y)` in spawn orientation
    pub fn at(kind: ShapeKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    /// Rotation index in `0..4`, counted in clockwise quarter turns
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Occupancy matrix for the current rotation
    pub fn occupied_cells(&self) -> Mask {
        let mut mask = base_mask(self.kind);
        for _ in 0..self.rotation {
            mask = mask.rotated_clockwise();
        }
        mask
    }

    /// Mino offsets relative to the anchor for the current rotation
    pub fn offsets(&self) -> [MinoOffset; 4] {
        let mut out = [(0, 0); 4];
        for (slot, offset) in out.iter_mut().zip(self.occupied_cells().offsets()) {
            *slot = offset;
        }
        out
    }

    /// Absolute grid coordinates of every occupied cell
    ///
    /// Coordinates saturate at the `i8` range; a saturated cell keeps its sign,
    /// so it stays off the board.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.offsets()
            .map(|(dx, dy)| (self.x.saturating_add(dx), self.y.saturating_add(dy)))
    }

    /// Same piece shifted by `(dx, dy)`, saturating at the `i8` range
    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..*self
        }
    }

    /// Same piece turned one quarter clockwise, anchor unchanged
    pub fn rotated_clockwise(&self) -> Self {
        Self {
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }

    /// Same piece and rotation re-anchored at `(x, y)`
    pub fn with_position(&self, x: i8, y: i8) -> Self {
        Self { x, y, ..*self }
    }
}
