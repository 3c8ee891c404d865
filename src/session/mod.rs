//! One session's full game state and the operations that advance it.
//!
//! The session is the sole writer of its own state: joins, selections, powers,
//! submissions and clock ticks all pass through here. Every rejected operation
//! leaves the state untouched, and both endings (score reached, clock expired)
//! funnel through one idempotent terminal transition.

mod snapshot;

pub use snapshot::{FoundWordView, PlayerView, SessionSnapshot};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::dictionary::{word_score, Lexicon, MIN_WORD_LENGTH};
use crate::game::path::SelectedPath;
use crate::game::power::{PowerEffect, PowerError, PowerKind};
use crate::game::{Grid, Position};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Unique identifier for a session.
pub type SessionId = String;

/// Unique identifier for a player.
pub type PlayerId = String;

/// Seats per session; the third join starts the game.
pub const MAX_PLAYERS: usize = 3;

/// Session lifecycle. Transitions run one way: waiting → playing → ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Seats still open.
    #[default]
    Waiting,
    /// All three players seated, countdown running.
    Playing,
    /// Target score reached or clock expired. Terminal.
    Ended,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Ended => "ended",
        }
    }
}

/// A seated player. Identity is fixed at join; only `power_ready` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub power: PowerKind,
    pub power_ready: bool,
}

/// A word on the shared found list, immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundWord {
    pub text: String,
    pub points: u32,
    pub player_id: PlayerId,
}

/// One game session: board, seats, path, found words, score and clock.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    grid: Grid,
    players: Vec<Player>,
    path: SelectedPath,
    words_found: Vec<FoundWord>,
    score: u32,
    target_score: u32,
    time_left: u32,
    freeze_bonus: u32,
    status: GameStatus,
    ended_at: Option<Instant>,
}

impl Session {
    pub fn new(id: SessionId, grid: Grid, config: &GameConfig) -> Self {
        Self {
            id,
            grid,
            players: Vec::with_capacity(MAX_PLAYERS),
            path: SelectedPath::new(),
            words_found: Vec::new(),
            score: 0,
            target_score: config.target_score,
            time_left: config.round_time_secs,
            freeze_bonus: config.freeze_bonus_secs,
            status: GameStatus::Waiting,
            ended_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn words_found(&self) -> &[FoundWord] {
        &self.words_found
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    /// The word the current path spells, recomputed from the grid.
    pub fn current_word(&self) -> String {
        self.path.word(&self.grid)
    }

    /// Seat a player and hand them the next power in join order. The third
    /// join flips the session to playing.
    pub fn add_player(&mut self, id: PlayerId, name: String) -> Result<(), GameError> {
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::Full);
        }
        if self.status != GameStatus::Waiting {
            return Err(GameError::AlreadyStarted);
        }
        let power = PowerKind::for_slot(self.players.len()).ok_or(GameError::Full)?;
        self.players.push(Player {
            id,
            name,
            power,
            power_ready: true,
        });
        if self.players.len() == MAX_PLAYERS {
            self.status = GameStatus::Playing;
        }
        Ok(())
    }

    /// Select (or toggle off) one cell for the shared path.
    pub fn select_cell(&mut self, player_id: &str, pos: Position) -> Result<(), GameError> {
        self.require_playing()?;
        self.require_player(player_id)?;
        if !self.grid.contains(pos) {
            return Err(GameError::InvalidInput {
                reason: format!("Cell ({}, {}) is outside the grid", pos.row, pos.col),
            });
        }
        self.path.select(pos).map_err(GameError::InvalidSelection)?;
        Ok(())
    }

    /// Fire the invoking player's one-shot power.
    pub fn apply_power(
        &mut self,
        player_id: &str,
        effect: &PowerEffect,
    ) -> Result<String, GameError> {
        self.require_playing()?;
        let idx = self
            .players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or(GameError::UnknownPlayer)?;
        if effect.kind() != self.players[idx].power {
            return Err(GameError::PowerMismatch);
        }
        if !self.players[idx].power_ready {
            return Err(GameError::PowerNotReady);
        }

        let description = effect
            .apply(&mut self.grid, &mut self.time_left, self.freeze_bonus)
            .map_err(|e| GameError::InvalidInput {
                reason: match e {
                    PowerError::OutOfBounds => "Target cell is outside the grid".to_string(),
                    PowerError::NotALetter => "Replacement must be a single letter".to_string(),
                },
            })?;
        self.players[idx].power_ready = false;
        Ok(description)
    }

    /// Submit the current path as a word. On success the word is scored and
    /// appended exactly once and the path clears; reaching the target score
    /// ends the session.
    pub fn submit_word(&mut self, player_id: &str, lexicon: &Lexicon) -> Result<u32, GameError> {
        self.require_playing()?;
        self.require_player(player_id)?;

        let word = self.current_word();
        if word.len() < MIN_WORD_LENGTH {
            return Err(GameError::WordTooShort { length: word.len() });
        }
        if !lexicon.is_valid(&word) {
            return Err(GameError::WordNotRecognized);
        }
        if self
            .words_found
            .iter()
            .any(|w| w.text.eq_ignore_ascii_case(&word))
        {
            return Err(GameError::WordAlreadyFound);
        }

        let points = word_score(&word);
        self.words_found.push(FoundWord {
            text: word,
            points,
            player_id: player_id.to_string(),
        });
        self.score += points;
        self.path.reset();
        if self.score >= self.target_score {
            self.finish();
        }
        Ok(points)
    }

    /// One second of countdown. Returns the status after the tick, or `None`
    /// when the session is not playing and nothing changed.
    pub fn tick(&mut self) -> Option<GameStatus> {
        if self.status != GameStatus::Playing {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.finish();
        }
        Some(self.status)
    }

    /// Terminal transition; idempotent so the score check and the countdown
    /// can race without a second effect.
    fn finish(&mut self) {
        if self.status != GameStatus::Ended {
            self.status = GameStatus::Ended;
            self.ended_at = Some(Instant::now());
        }
    }

    /// How long ago the session ended, if it has.
    pub(crate) fn ended_since(&self) -> Option<std::time::Duration> {
        self.ended_at.map(|at| at.elapsed())
    }

    fn require_playing(&self) -> Result<(), GameError> {
        if self.status == GameStatus::Playing {
            Ok(())
        } else {
            Err(GameError::NotInProgress)
        }
    }

    fn require_player(&self, player_id: &str) -> Result<(), GameError> {
        if self.player(player_id).is_some() {
            Ok(())
        } else {
            Err(GameError::UnknownPlayer)
        }
    }

    #[cfg(test)]
    pub(crate) fn replace_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    #[cfg(test)]
    pub(crate) fn set_time_left(&mut self, secs: u32) {
        self.time_left = secs;
    }
}
