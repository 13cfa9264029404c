//! Blockfall (workspace facade crate).
//!
//! Re-exports the rules engine under `blockfall::{core, types}` while the
//! implementation lives in dedicated crates under `crates/`. Rendering, input
//! capture and the window loop belong to whatever front-end embeds this crate.

pub use blockfall_core as core;
pub use blockfall_types as types;
