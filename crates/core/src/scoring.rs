//! Scoring module - classic line-clear scoring, leveling and fall speed
//!
//! Points for a lock depend only on how many rows it cleared and the level at
//! the moment of the lock. The level itself is never incremented on its own;
//! it is always derived from the total number of cleared lines.

use std::time::Duration;

use crate::types::{BASE_FALL_INTERVAL, LINES_PER_LEVEL, LINE_SCORES};

/// Calculate line clear score (classic rules)
/// lines: number of lines cleared in one lock
/// level: current level (1-based)
///
/// ```
/// use blockfall_core::line_clear_score;
///
/// assert_eq!(line_clear_score(1, 3), 120);
/// assert_eq!(line_clear_score(4, 1), 1200);
/// assert_eq!(line_clear_score(0, 9), 0);
/// ```
pub fn line_clear_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .map_or(0, |&base| base.saturating_mul(level))
}

/// Level reached after clearing `lines` lines in total
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Time between automatic one-row falls at `level`
pub fn fall_interval(level: u32) -> Duration {
    BASE_FALL_INTERVAL / level.max(1)
}
