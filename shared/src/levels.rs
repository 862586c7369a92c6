//! Level resolution from cumulative experience points
//!
//! Levels are never stored: they are re-derived from the profile's lifetime
//! XP on every read, so the decomposition must be deterministic.

use serde::{Deserialize, Serialize};

/// XP required to clear level 1
pub const BASE_LEVEL_XP: f64 = 100.0;

/// Growth factor of the threshold per level
pub const LEVEL_GROWTH: f64 = 1.5;

/// Level and progress within it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelState {
    pub level: u32,
    /// XP accumulated inside the current level
    pub current_xp: u64,
    /// XP needed to advance from `level` to `level + 1`
    pub xp_for_next_level: u64,
}

impl LevelState {
    /// Fraction of the current level completed, in [0, 1)
    pub fn progress(&self) -> f64 {
        self.current_xp as f64 / self.xp_for_next_level as f64
    }
}

/// Calculate experience points needed to clear a level
///
/// Formula: ⌊100 × 1.5^(level-1)⌋
pub fn calculate_xp_for_level(level: u32) -> u64 {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX).saturating_sub(1);
    (BASE_LEVEL_XP * LEVEL_GROWTH.powi(exponent)).floor() as u64
}

/// Calculate current level based on total experience points
pub fn calculate_level_from_xp(total_xp: u64) -> LevelState {
    let mut level = 1;
    let mut remaining = total_xp;

    while remaining >= calculate_xp_for_level(level) {
        remaining -= calculate_xp_for_level(level);
        level += 1;
    }

    LevelState {
        level,
        current_xp: remaining,
        xp_for_next_level: calculate_xp_for_level(level),
    }
}

/// Total XP consumed by clearing every level below `level`
pub fn total_xp_to_reach(level: u32) -> u64 {
    (1..level).map(calculate_xp_for_level).sum()
}
