//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block game: the playing field,
//! the pieces, collision and placement, line clearing, scoring, leveling and
//! the Ready → Playing → Paused → GameOver state machine. It has **no
//! dependencies** on rendering, input or I/O:
//!
//! - **Deterministic**: pieces come from an injectable [`PieceSource`], and
//!   time only enters through [`Engine::advance`]
//! - **Synchronous**: every operation completes immediately; callers serialize
//!   commands and ticks on one context
//! - **Forgiving**: commands in the wrong state or into a collision are
//!   ignored, never reported as errors
//!
//! # Module Structure
//!
//! - [`piece`]: shape matrices, clockwise rotation, immutable [`Piece`] values
//! - [`board`]: 10x24 grid (20 visible + 4 hidden rows), placement and line clears
//! - [`rng`]: piece sources (uniform random, fixed sequence)
//! - [`scoring`]: line-clear points, level and fall speed
//! - [`engine`]: the game controller
//! - [`snapshot`]: serializable copy of the observable state
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//!
//! use blockfall_core::{Engine, SequenceSource};
//! use blockfall_core::types::{Command, GameStatus, ShapeKind};
//!
//! let mut game = Engine::with_source(SequenceSource::repeat(ShapeKind::O));
//! game.start();
//!
//! game.apply(Command::MoveLeft);
//! game.apply(Command::RotateClockwise);
//! game.apply(Command::HardDrop);
//!
//! let t0 = Instant::now();
//! game.advance(t0);
//! game.advance(t0 + Duration::from_secs(1));
//!
//! assert_eq!(game.status(), GameStatus::Playing);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod engine;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use engine::Engine;
pub use piece::{base_mask, Mask, Piece};
pub use rng::{PieceSource, SequenceSource, UniformSource};
pub use scoring::{fall_interval, level_for_lines, line_clear_score};
pub use snapshot::{GameSnapshot, PieceSnapshot};
