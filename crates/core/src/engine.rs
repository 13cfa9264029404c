//! Engine module - the game controller
//!
//! Owns the board, the active and next pieces, the counters and the
//! Ready/Playing/Paused/GameOver state machine. The engine has no clock and
//! no thread: a front-end feeds it time through [`Engine::advance`] and player
//! input through the command methods (or [`Engine::apply`]).
//!
//! Every command returns `true` when it changed observable state and `false`
//! when it was rejected. Rejected commands (wrong state, collisions) leave the
//! engine exactly as it was; nothing here reports an error.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use log::{debug, info};

use crate::board::Board;
use crate::piece::{Mask, Piece};
use crate::rng::{PieceSource, UniformSource};
use crate::scoring::{fall_interval, level_for_lines, line_clear_score};
use crate::snapshot::{GameSnapshot, PieceSnapshot};
use crate::types::{
    BlockColor, Command, GameStatus, LockEvent, BOARD_WIDTH, GRID_HEIGHT, HIDDEN_ROWS, SPAWN_X,
    SPAWN_Y, VISIBLE_HEIGHT, WALL_KICKS,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Engine<S: PieceSource = UniformSource> {
    status: GameStatus,
    board: Board,
    active: Option<Piece>,
    next: Piece,
    score: u32,
    level: u32,
    lines_cleared: u32,
    /// Instant of the last automatic fall; `None` while the fall timer is
    /// stopped. The first `advance` after (re)starting only records a baseline.
    last_fall: Option<Instant>,
    /// Last lock result (consumed by observers).
    last_lock: Option<LockEvent>,
    source: S,
}

impl Engine<UniformSource> {
    /// Create a new game seeded from entropy
    pub fn new() -> Self {
        Self::with_source(UniformSource::from_entropy())
    }

    /// Create a new game whose piece order is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(UniformSource::new(seed))
    }
}

impl Default for Engine<UniformSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PieceSource> Engine<S> {
    /// Create a new game in `Ready` drawing pieces from `source`
    pub fn with_source(mut source: S) -> Self {
        let next = Piece::new(source.next_shape());
        let mut engine = Self {
            status: GameStatus::Ready,
            board: Board::new(),
            active: None,
            next,
            score: 0,
            level: 1,
            lines_cleared: 0,
            last_fall: None,
            last_lock: None,
            source,
        };
        engine.spawn_piece();
        engine
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn next(&self) -> Piece {
        self.next
    }

    /// Occupancy matrix of the active piece
    pub fn active_mask(&self) -> Option<Mask> {
        self.active.map(|p| p.occupied_cells())
    }

    /// Occupancy matrix of the queued piece
    pub fn next_mask(&self) -> Mask {
        self.next.occupied_cells()
    }

    /// Current time between automatic falls
    pub fn fall_interval(&self) -> Duration {
        fall_interval(self.level)
    }

    /// Color of the settled block at visible position (x, y)
    pub fn block_at(&self, x: i8, y: i8) -> Option<BlockColor> {
        self.board.block_at(x, y)
    }

    /// Active piece cells in visible coordinates, clipped to the visible area
    pub fn active_visible_cells(&self) -> ArrayVec<(i8, i8), 4> {
        let mut out = ArrayVec::new();
        let Some(active) = self.active else {
            return out;
        };
        for (x, y) in active.cells() {
            let vy = y.saturating_sub(HIDDEN_ROWS as i8);
            if (0..VISIBLE_HEIGHT as i8).contains(&vy) {
                out.push((x, vy));
            }
        }
        out
    }

    pub fn last_lock(&self) -> Option<LockEvent> {
        self.last_lock
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[None; BOARD_WIDTH as usize]; VISIBLE_HEIGHT as usize];
        for (dst, src) in board.iter_mut().zip(self.board.visible_rows()) {
            dst.copy_from_slice(src);
        }
        GameSnapshot {
            status: self.status,
            score: self.score,
            level: self.level,
            lines: self.lines_cleared,
            board,
            active: self.active.map(PieceSnapshot::from),
            next: PieceSnapshot::from(self.next),
        }
    }

    /// Begin play.
    ///
    /// From `Ready` this just starts; from `Paused` or `GameOver` the game is
    /// reset first. No-op while already playing.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Playing => return false,
            GameStatus::Ready => {}
            GameStatus::Paused | GameStatus::GameOver => {
                self.reset();
            }
        }
        self.status = GameStatus::Playing;
        self.last_fall = None;
        info!("game started");
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        self.last_fall = None;
        info!("game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        self.last_fall = None;
        info!("game resumed");
        true
    }

    /// Pause when playing, resume when paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.status {
            GameStatus::Playing => self.pause(),
            GameStatus::Paused => self.resume(),
            GameStatus::Ready | GameStatus::GameOver => false,
        }
    }

    /// Discard the board, counters and pieces and return to `Ready`
    pub fn reset(&mut self) -> bool {
        self.board = Board::new();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.last_fall = None;
        self.last_lock = None;
        self.next = Piece::new(self.source.next_shape());
        self.status = GameStatus::Ready;
        self.spawn_piece();
        info!("game reset");
        true
    }

    /// Drive the automatic fall.
    ///
    /// Moves the active piece down one row (locking it if it cannot move) once
    /// at least `fall_interval()` has passed since the last fall. Returns
    /// whether a fall happened.
    ///
    /// The fall timer is stopped by `start`, `pause` and `resume`. The first
    /// call after any of them only records `now` as the baseline and never
    /// moves the piece; the first fall comes one interval later.
    pub fn advance(&mut self, now: Instant) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(last) = self.last_fall else {
            self.last_fall = Some(now);
            return false;
        };
        if now.saturating_duration_since(last) < self.fall_interval() {
            return false;
        }
        self.last_fall = Some(now);
        self.step_down();
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// Move down one row, or lock the piece where it is if it cannot move
    pub fn move_down(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.step_down()
    }

    /// Rotate clockwise, trying each wall kick in order if the plain
    /// rotation collides
    pub fn rotate_clockwise(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let rotated = active.rotated_clockwise();
        let accepted = std::iter::once((0, 0))
            .chain(WALL_KICKS)
            .map(|(dx, dy)| rotated.moved(dx, dy))
            .find(|candidate| self.board.can_place(candidate));

        match accepted {
            Some(piece) => {
                self.active = Some(piece);
                true
            }
            None => false,
        }
    }

    /// Drop the active piece as far as it goes and lock it immediately
    pub fn hard_drop(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        for _ in 0..GRID_HEIGHT {
            let candidate = piece.moved(0, 1);
            if !self.board.can_place(&candidate) {
                break;
            }
            piece = candidate;
        }
        self.active = Some(piece);
        self.lock_piece();
        true
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::Reset => self.reset(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down(),
            Command::RotateClockwise => self.rotate_clockwise(),
            Command::HardDrop => self.hard_drop(),
        }
    }

    /// Try to move the active piece
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.moved(dx, dy);
        if !self.board.can_place(&candidate) {
            return false;
        }
        self.active = Some(candidate);
        true
    }

    /// One row down; locks when blocked. Shared by soft drop and the fall timer.
    fn step_down(&mut self) -> bool {
        if self.try_move(0, 1) {
            return true;
        }
        if self.active.is_none() {
            return false;
        }
        self.lock_piece();
        true
    }

    /// Commit the active piece, clear lines, score and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        self.board.place(&active);
        let lines = self.board.clear_lines();

        let mut points = 0;
        if lines > 0 {
            points = line_clear_score(lines, self.level);
            self.score = self.score.saturating_add(points);
            self.lines_cleared += lines as u32;
            self.level = level_for_lines(self.lines_cleared);
        }
        debug!(
            "locked {:?} at {:?}: {} lines, {} points",
            active.kind(),
            active.position(),
            lines,
            points
        );

        let game_over = if self.board.is_game_over() {
            // The locked piece stays visible as the active piece.
            self.end_game("stack reached the hidden rows");
            true
        } else {
            !self.spawn_piece()
        };

        self.last_lock = Some(LockEvent {
            lines_cleared: lines as u32,
            points,
            game_over,
        });
    }

    /// Promote `next` to active at the spawn position and draw a new `next`.
    ///
    /// Returns false (and ends the game) when the spawn position is blocked.
    fn spawn_piece(&mut self) -> bool {
        let piece = self.next.with_position(SPAWN_X, SPAWN_Y);
        self.next = Piece::new(self.source.next_shape());

        if !self.board.can_place(&piece) {
            self.active = None;
            self.end_game("spawn position blocked");
            return false;
        }
        self.active = Some(piece);
        true
    }

    fn end_game(&mut self, reason: &str) {
        self.status = GameStatus::GameOver;
        self.last_fall = None;
        info!(
            "game over ({reason}): score {}, level {}, lines {}",
            self.score, self.level, self.lines_cleared
        );
    }
}
