//! Point-in-time view of a session, shaped for observers.
//!
//! Snapshots are cloned out under the session lock and handed to the
//! notification seam, so observers never see a torn state. Field names follow
//! the client wire shape.

use super::{GameStatus, Session};
use crate::game::power::PowerKind;
use crate::game::Position;
use serde::Serialize;

/// Everything an observer needs to render the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub grid: Vec<Vec<char>>,
    pub players: Vec<PlayerView>,
    pub selected_cells: Vec<Position>,
    pub current_word: String,
    pub words_found: Vec<FoundWordView>,
    pub score: u32,
    pub target_score: u32,
    pub time_left: u32,
    pub status: GameStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    #[serde(rename = "powerType")]
    pub power: PowerKind,
    pub power_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundWordView {
    pub text: String,
    pub points: u32,
    pub player_id: String,
}

impl Session {
    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id().to_string(),
            grid: self.grid().to_rows(),
            players: self
                .players()
                .iter()
                .map(|p| PlayerView {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    power: p.power,
                    power_ready: p.power_ready,
                })
                .collect(),
            selected_cells: self.path.cells().to_vec(),
            current_word: self.current_word(),
            words_found: self
                .words_found()
                .iter()
                .map(|w| FoundWordView {
                    text: w.text.clone(),
                    points: w.points,
                    player_id: w.player_id.clone(),
                })
                .collect(),
            score: self.score(),
            target_score: self.target_score(),
            time_left: self.time_left(),
            status: self.status(),
        }
    }
}
