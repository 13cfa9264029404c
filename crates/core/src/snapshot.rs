use serde::Serialize;

use crate::piece::Piece;
use crate::types::{Cell, GameStatus, ShapeKind, BOARD_WIDTH, VISIBLE_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub shape: ShapeKind,
    pub rotation: u8,
    /// Anchor in grid coordinates (hidden rows included).
    pub x: i8,
    pub y: i8,
    /// Occupied cells relative to the anchor.
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            shape: value.kind(),
            rotation: value.rotation(),
            x: value.x(),
            y: value.y(),
            cells: value.offsets(),
        }
    }
}

/// Point-in-time copy of everything a renderer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub status: GameStatus,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    /// Visible rows only, top to bottom.
    pub board: [[Cell; BOARD_WIDTH as usize]; VISIBLE_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub next: PieceSnapshot,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Number of settled blocks in the visible rows
    pub fn filled_cells(&self) -> usize {
        self.board.iter().flatten().filter(|c| c.is_some()).count()
    }
}
