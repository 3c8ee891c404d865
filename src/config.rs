//! Tunables applied to every session the service creates.

use crate::game::{LetterWeights, DEFAULT_COLS, DEFAULT_ROWS};
use std::time::Duration;

/// Shared score that ends the game in a win.
pub const DEFAULT_TARGET_SCORE: u32 = 50;

/// Countdown length in seconds (3 minutes).
pub const DEFAULT_ROUND_TIME_SECS: u32 = 180;

/// Seconds the FREEZE power adds to the clock.
pub const DEFAULT_FREEZE_BONUS_SECS: u32 = 10;

/// How long an ended session stays readable before the sweeper evicts it.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Grid shape.
    pub rows: usize,
    pub cols: usize,
    /// Letter pool distribution for generated boards.
    pub letter_weights: LetterWeights,
    /// Score at which the session ends in a win.
    pub target_score: u32,
    /// Starting countdown in seconds.
    pub round_time_secs: u32,
    /// Seconds added per FREEZE use.
    pub freeze_bonus_secs: u32,
    /// Grace period before ended sessions are evicted.
    pub retention: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            letter_weights: LetterWeights::default(),
            target_score: DEFAULT_TARGET_SCORE,
            round_time_secs: DEFAULT_ROUND_TIME_SECS,
            freeze_bonus_secs: DEFAULT_FREEZE_BONUS_SECS,
            retention: DEFAULT_RETENTION,
        }
    }
}
