//! Rejection taxonomy for session operations.
//!
//! Every rejected operation leaves session state unchanged; the variant tells
//! the caller exactly what went wrong.

use crate::game::dictionary::MIN_WORD_LENGTH;
use crate::game::path::SelectError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Malformed request data (blank name, out-of-range cell, bad letter).
    InvalidInput { reason: String },
    /// Unknown or already-evicted session.
    NotFound,
    /// Session already seats its three players.
    Full,
    /// Session is past the waiting phase and cannot be joined.
    AlreadyStarted,
    /// Session is not in its playing phase.
    NotInProgress,
    /// Player id is not part of this session.
    UnknownPlayer,
    /// Selection broke the path rules.
    InvalidSelection(SelectError),
    /// The player's one-shot power is already spent.
    PowerNotReady,
    /// Effect kind does not match the player's assigned power.
    PowerMismatch,
    /// Current word is under the minimum length.
    WordTooShort { length: usize },
    /// Word is not in the lexicon.
    WordNotRecognized,
    /// Word was already found in this session.
    WordAlreadyFound,
}

impl GameError {
    /// User-facing message for the rejection.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { reason } => reason.clone(),
            Self::NotFound => "Game not found".to_string(),
            Self::Full => "Game is full".to_string(),
            Self::AlreadyStarted => "Game has already started".to_string(),
            Self::NotInProgress => "Game is not in progress".to_string(),
            Self::UnknownPlayer => "Player not in this game".to_string(),
            Self::InvalidSelection(SelectError::AlreadySelected) => {
                "Cell already selected".to_string()
            }
            Self::InvalidSelection(SelectError::NotAdjacent) => {
                "Cell must be adjacent to the last selected cell".to_string()
            }
            Self::PowerNotReady => "Power is not ready".to_string(),
            Self::PowerMismatch => "That power belongs to another player".to_string(),
            Self::WordTooShort { length } => {
                format!("Too short ({} chars, need {}+)", length, MIN_WORD_LENGTH)
            }
            Self::WordNotRecognized => "Not a valid word".to_string(),
            Self::WordAlreadyFound => "Word already found".to_string(),
        }
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Error for GameError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_format() {
        assert_eq!(GameError::NotFound.message(), "Game not found");
        assert_eq!(
            GameError::WordTooShort { length: 2 }.message(),
            "Too short (2 chars, need 3+)"
        );
        assert_eq!(
            GameError::InvalidSelection(SelectError::NotAdjacent).message(),
            "Cell must be adjacent to the last selected cell"
        );
        assert_eq!(
            GameError::InvalidInput {
                reason: "Player name is required".to_string()
            }
            .message(),
            "Player name is required"
        );
    }

    #[test]
    fn test_display_matches_message() {
        let err = GameError::WordAlreadyFound;
        assert_eq!(err.to_string(), err.message());
    }
}
