//! Core types module - shared data structures and constants
//!
//! This module defines the vocabulary shared by the rules engine and whatever
//! front-end drives it: board geometry, timing and scoring constants, the seven
//! shapes with their colors, the game status and the command set.
//!
//! # Board Geometry
//!
//! The grid is 10 columns wide and 24 rows tall. The top 4 rows are hidden and
//! act as a spawn buffer; the remaining 20 rows are the visible playfield.
//!
//! - **Grid coordinates**: `(0, 0)` is the top-left cell of the hidden region.
//! - **Visible coordinates**: visible row `y` is grid row `y + HIDDEN_ROWS`.
//! - **Spawn anchor**: `(SPAWN_X, SPAWN_Y)` in grid coordinates, i.e. the
//!   horizontal center at the first visible row.
//!
//! # Timing
//!
//! A piece falls one row every `BASE_FALL_INTERVAL / level`. Level 1 falls once
//! per second, level 2 twice per second, and so on.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, GameStatus, ShapeKind, BOARD_WIDTH, GRID_HEIGHT};
//!
//! let shape: ShapeKind = "t".parse().unwrap();
//! assert_eq!(shape, ShapeKind::T);
//!
//! let command: Command = "hardDrop".parse().unwrap();
//! assert_eq!(command, Command::HardDrop);
//!
//! assert_eq!(GameStatus::GameOver.as_str(), "gameOver");
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 24);
//! ```

use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

mod error;

pub use error::ParseError;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Number of rows a player can see (20 rows)
pub const VISIBLE_HEIGHT: u8 = 20;

/// Rows above the visible playfield used as spawn buffer (4 rows)
pub const HIDDEN_ROWS: u8 = 4;

/// Total grid rows, hidden buffer included
pub const GRID_HEIGHT: u8 = VISIBLE_HEIGHT + HIDDEN_ROWS;

/// Column of the spawn anchor (horizontal center)
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 1;

/// Grid row of the spawn anchor (first visible row)
pub const SPAWN_Y: i8 = HIDDEN_ROWS as i8;

/// Fall interval at level 1; divided by the level for higher levels
pub const BASE_FALL_INTERVAL: Duration = Duration::from_secs(1);

/// Lines needed per level step
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (classic scoring)
///
/// Base points for clearing N lines in one lock:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the current level (which starts at 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Offsets tried, in order, when a plain clockwise rotation collides.
///
/// This is a single table shared by every shape, not a per-shape kick table.
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-1, -1), (1, -1)];


/// The seven tetromino shapes
///
/// Each shape has a distinct color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes in canonical order
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Convert to lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::I.as_str(), "i");
    /// assert_eq!(ShapeKind::O.as_str(), "o");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }

    /// Intrinsic color of the shape
    pub fn color(&self) -> BlockColor {
        match self {
            ShapeKind::I => BlockColor::CYAN,
            ShapeKind::O => BlockColor::YELLOW,
            ShapeKind::T => BlockColor::PURPLE,
            ShapeKind::S => BlockColor::GREEN,
            ShapeKind::Z => BlockColor::RED,
            ShapeKind::J => BlockColor::BLUE,
            ShapeKind::L => BlockColor::ORANGE,
        }
    }
}

impl FromStr for ShapeKind {
    type Err = ParseError;

    /// Parse a shape from its letter (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" => Ok(ShapeKind::I),
            "o" => Ok(ShapeKind::O),
            "t" => Ok(ShapeKind::T),
            "s" => Ok(ShapeKind::S),
            "z" => Ok(ShapeKind::Z),
            "j" => Ok(ShapeKind::J),
            "l" => Ok(ShapeKind::L),
            _ => Err(ParseError::UnknownShape(s.to_string())),
        }
    }
}

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BlockColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl BlockColor {
    pub const CYAN: BlockColor = BlockColor::opaque(0.0, 1.0, 1.0);
    pub const YELLOW: BlockColor = BlockColor::opaque(1.0, 1.0, 0.0);
    pub const PURPLE: BlockColor = BlockColor::opaque(0.5, 0.0, 0.5);
    pub const GREEN: BlockColor = BlockColor::opaque(0.0, 1.0, 0.0);
    pub const RED: BlockColor = BlockColor::opaque(1.0, 0.0, 0.0);
    pub const BLUE: BlockColor = BlockColor::opaque(0.0, 0.0, 1.0);
    pub const ORANGE: BlockColor = BlockColor::opaque(1.0, 0.5, 0.0);

    pub const fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }
}

/// Game lifecycle states
///
/// ```text
/// Ready --start--> Playing <--pause/resume--> Paused
/// Playing --(lock into hidden rows | blocked spawn)--> GameOver
/// any --reset--> Ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ready => "ready",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Commands a front-end can issue to the engine
///
/// Each command maps to exactly one engine operation. Commands issued in the
/// wrong state are ignored by the engine rather than reported as errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Begin play (resets first when coming from Paused or GameOver)
    Start,
    /// Suspend play
    Pause,
    /// Continue a paused game
    Resume,
    /// Pause when playing, resume when paused
    TogglePause,
    /// Discard the game and return to Ready
    Reset,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    MoveDown,
    /// Rotate piece 90° clockwise with wall kicks
    RotateClockwise,
    /// Drop piece to the lowest reachable row and lock it
    HardDrop,
}

impl Command {
    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::TogglePause => "togglePause",
            Command::Reset => "reset",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::MoveDown => "moveDown",
            Command::RotateClockwise => "rotateClockwise",
            Command::HardDrop => "hardDrop",
        }
    }
}

impl FromStr for Command {
    type Err = ParseError;

    /// Parse a command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!("moveLeft".parse::<Command>(), Ok(Command::MoveLeft));
    /// assert_eq!("rotateclockwise".parse::<Command>(), Ok(Command::RotateClockwise));
    /// assert!("unknown".parse::<Command>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(Command::Start),
            "pause" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "togglepause" => Ok(Command::TogglePause),
            "reset" => Ok(Command::Reset),
            "moveleft" => Ok(Command::MoveLeft),
            "moveright" => Ok(Command::MoveRight),
            "movedown" => Ok(Command::MoveDown),
            "rotateclockwise" => Ok(Command::RotateClockwise),
            "harddrop" => Ok(Command::HardDrop),
            _ => Err(ParseError::UnknownCommand(s.to_string())),
        }
    }
}

/// Outcome of the most recent lock.
///
/// Emitted by the engine after a piece is committed to the board so a
/// front-end can flash cleared rows or show points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub game_over: bool,
}

/// A cell on the grid
///
/// - `None`: Empty cell
/// - `Some(ShapeKind)`: Cell filled by a piece of that shape
pub type Cell = Option<ShapeKind>;
