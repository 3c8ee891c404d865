//! GRIDRUSH — cooperative word-hunt session core.
//!
//! Up to three players share one letter grid in real time: trace a path,
//! submit the word, spend your one power, beat the clock together.
//!
//! This crate owns the shared session state machine — board generation, the
//! selection path, word validation and scoring, power effects, lifecycle and
//! countdown — and hands every state change to a [`notify::Broadcaster`] for
//! fan-out. Rendering and transport live elsewhere.

pub mod config;
pub mod error;
pub mod game;
pub mod notify;
pub mod registry;
pub mod service;
pub mod session;

pub use config::GameConfig;
pub use error::GameError;
pub use game::dictionary::{word_score, Lexicon};
pub use game::path::{SelectAction, SelectError, SelectedPath};
pub use game::power::{PowerEffect, PowerKind};
pub use game::{Grid, LetterWeights, Position};
pub use notify::{Broadcaster, MemoryBroadcaster, NullBroadcaster};
pub use registry::SessionRegistry;
pub use service::{CreateSessionResponse, GameService, JoinSessionResponse};
pub use session::{
    FoundWord, FoundWordView, GameStatus, Player, PlayerId, PlayerView, Session, SessionId,
    SessionSnapshot,
};
