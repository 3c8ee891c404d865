//! The request surface consumed by the UI layer.
//!
//! Resolves sessions through the registry, serializes every mutation behind
//! the session's lock, fans the fresh snapshot out after each success, and
//! drives each playing session's one-second countdown. Cloning the service is
//! cheap; clones share the same registry.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::dictionary::Lexicon;
use crate::game::power::PowerEffect;
use crate::game::{Grid, Position};
use crate::notify::Broadcaster;
use crate::registry::SessionRegistry;
use crate::session::{GameStatus, PlayerId, Session, SessionId, SessionSnapshot};
use rand::Rng;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Successful create: the host's credentials plus the opening state.
#[derive(Debug, Clone)]
pub struct CreateSessionResponse {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub session: SessionSnapshot,
}

/// Successful join.
#[derive(Debug, Clone)]
pub struct JoinSessionResponse {
    pub player_id: PlayerId,
    pub session: SessionSnapshot,
}

#[derive(Clone)]
pub struct GameService {
    registry: Arc<SessionRegistry>,
    lexicon: Arc<Lexicon>,
    broadcaster: Arc<dyn Broadcaster>,
    config: GameConfig,
}

impl GameService {
    /// Service with default config and the embedded wordlist.
    pub fn new(broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self::with_config(GameConfig::default(), Lexicon::embedded(), broadcaster)
    }

    pub fn with_config(
        config: GameConfig,
        lexicon: Lexicon,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            lexicon: Arc::new(lexicon),
            broadcaster,
            config,
        }
    }

    /// Open a session with a fresh board and the host in the SWAP seat.
    pub fn create_session(&self, host_name: &str) -> Result<CreateSessionResponse, GameError> {
        let host_name = required_name(host_name)?;
        let player_id = new_player_id();

        // Retry on the (unlikely) short-id collision.
        let (session_id, snapshot) = loop {
            let id = new_session_id();
            let grid = Grid::generate(self.config.rows, self.config.cols, self.config.letter_weights);
            let mut session = Session::new(id.clone(), grid, &self.config);
            session.add_player(player_id.clone(), host_name.to_string())?;
            let snapshot = session.snapshot();
            if self.registry.insert(session) {
                break (id, snapshot);
            }
        };

        info!(session_id = %session_id, host = host_name, "Session created");
        self.publish(&snapshot);
        Ok(CreateSessionResponse {
            session_id,
            player_id,
            session: snapshot,
        })
    }

    /// Take the next open seat. The third join starts the game and its
    /// countdown.
    pub fn join_session(
        &self,
        session_id: &str,
        player_name: &str,
    ) -> Result<JoinSessionResponse, GameError> {
        let player_name = required_name(player_name)?;
        let player_id = new_player_id();

        let (snapshot, status) = self.registry.with_session(session_id, |session| {
            session.add_player(player_id.clone(), player_name.to_string())?;
            Ok((session.snapshot(), session.status()))
        })?;

        info!(
            session_id,
            player = player_name,
            status = status.as_str(),
            "Player joined"
        );
        self.publish(&snapshot);
        if status == GameStatus::Playing {
            self.spawn_countdown(session_id.to_string());
        }
        Ok(JoinSessionResponse {
            player_id,
            session: snapshot,
        })
    }

    /// Select (or toggle off) a cell on the shared path.
    pub fn select_cell(
        &self,
        session_id: &str,
        player_id: &str,
        row: usize,
        col: usize,
    ) -> Result<(), GameError> {
        let snapshot = self.registry.with_session(session_id, |session| {
            session.select_cell(player_id, Position::new(row, col))?;
            Ok(session.snapshot())
        })?;

        debug!(session_id, player_id, row, col, "Cell selection applied");
        self.publish(&snapshot);
        Ok(())
    }

    /// Fire a player's one-shot power. Returns the display description.
    pub fn apply_power(
        &self,
        session_id: &str,
        player_id: &str,
        effect: PowerEffect,
    ) -> Result<String, GameError> {
        let (description, snapshot) = self.registry.with_session(session_id, |session| {
            let description = session.apply_power(player_id, &effect)?;
            Ok((description, session.snapshot()))
        })?;

        debug!(
            session_id,
            player_id,
            power = effect.kind().as_str(),
            "Power applied"
        );
        self.publish(&snapshot);
        Ok(description)
    }

    /// Submit the current path as a word. Returns the points awarded.
    pub fn submit_word(&self, session_id: &str, player_id: &str) -> Result<u32, GameError> {
        let (points, snapshot) = self.registry.with_session(session_id, |session| {
            let points = session.submit_word(player_id, &self.lexicon)?;
            Ok((points, session.snapshot()))
        })?;

        if let Some(found) = snapshot.words_found.last() {
            info!(session_id, player_id, word = %found.text, points, "Word accepted");
        }
        self.publish(&snapshot);
        Ok(points)
    }

    /// Current state for an observer.
    pub fn session(&self, session_id: &str) -> Result<SessionSnapshot, GameError> {
        self.registry.snapshot(session_id)
    }

    /// One countdown step. Publishes only when the clock actually moved, so a
    /// driver racing a score-triggered ending stays silent.
    pub fn tick(&self, session_id: &str) -> Result<GameStatus, GameError> {
        let (status, snapshot) = self.registry.with_session(session_id, |session| {
            match session.tick() {
                Some(status) => Ok((status, Some(session.snapshot()))),
                None => Ok((session.status(), None)),
            }
        })?;

        if let Some(snapshot) = snapshot {
            self.publish(&snapshot);
        }
        Ok(status)
    }

    /// Evict sessions ended longer than the configured retention.
    pub fn sweep(&self) -> usize {
        self.registry.sweep(self.config.retention)
    }

    /// Background sweep over the whole registry at a fixed interval.
    pub fn spawn_sweeper(&self, every: Duration) -> thread::JoinHandle<()> {
        let service = self.clone();
        thread::spawn(move || loop {
            thread::sleep(every);
            let evicted = service.sweep();
            if evicted > 0 {
                info!(evicted, "Swept ended sessions");
            }
        })
    }

    /// One countdown driver per playing session; exits as soon as the session
    /// ends by any path, or disappears.
    fn spawn_countdown(&self, session_id: SessionId) {
        debug!(session_id = %session_id, "Countdown started");
        let service = self.clone();
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(1));
            match service.tick(&session_id) {
                Ok(GameStatus::Playing) => {}
                Ok(_) => {
                    debug!(session_id = %session_id, "Countdown finished");
                    break;
                }
                Err(_) => break,
            }
        });
    }

    fn publish(&self, snapshot: &SessionSnapshot) {
        let topic = format!("session-{}", snapshot.session_id);
        if let Err(error) = self.broadcaster.publish(&topic, snapshot) {
            warn!(topic = %topic, error = %error, "Dropping state broadcast");
        }
    }
}

fn required_name(name: &str) -> Result<&str, GameError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(GameError::InvalidInput {
            reason: "Player name is required".to_string(),
        });
    }
    Ok(name)
}

fn new_session_id() -> SessionId {
    format!("{:08x}", rand::rng().random::<u32>())
}

fn new_player_id() -> PlayerId {
    format!("{:032x}", rand::rng().random::<u128>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryBroadcaster;
    use crate::session::MAX_PLAYERS;
    use std::time::Instant;

    fn word_grid() -> Grid {
        Grid::from_rows(&[
            vec!['C', 'A', 'R', 'S'],
            vec!['T', 'E', 'N', 'O'],
            vec!['L', 'I', 'M', 'D'],
            vec!['B', 'U', 'G', 'Y'],
        ])
        .unwrap()
    }

    fn test_service() -> (GameService, Arc<MemoryBroadcaster>) {
        let broadcaster = Arc::new(MemoryBroadcaster::new());
        let service = GameService::with_config(
            GameConfig::default(),
            Lexicon::with_words(["cat", "care", "ten"]),
            Arc::clone(&broadcaster) as Arc<dyn Broadcaster>,
        );
        (service, broadcaster)
    }

    /// Create a session, fill all three seats, and pin the board to a known
    /// grid. Returns (session_id, player_ids).
    fn full_session(service: &GameService) -> (String, Vec<String>) {
        let created = service.create_session("Ana").unwrap();
        let mut player_ids = vec![created.player_id];
        for name in ["Ben", "Cleo"] {
            player_ids.push(service.join_session(&created.session_id, name).unwrap().player_id);
        }
        service
            .registry
            .with_session(&created.session_id, |s| {
                s.replace_grid(word_grid());
                Ok(())
            })
            .unwrap();
        (created.session_id, player_ids)
    }

    #[test]
    fn test_create_requires_host_name() {
        let (service, _) = test_service();
        assert!(matches!(
            service.create_session(""),
            Err(GameError::InvalidInput { .. })
        ));
        assert!(matches!(
            service.create_session("   "),
            Err(GameError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_create_seeds_host_with_swap() {
        let (service, broadcaster) = test_service();
        let created = service.create_session("Ana").unwrap();

        assert_eq!(created.session_id.len(), 8);
        assert_eq!(created.player_id.len(), 32);
        let session = &created.session;
        assert_eq!(session.status, GameStatus::Waiting);
        assert_eq!(session.players.len(), 1);
        assert_eq!(session.players[0].name, "Ana");
        assert_eq!(session.players[0].power.as_str(), "SWAP");
        assert_eq!(session.grid.len(), 4);
        assert_eq!(session.score, 0);

        let published = broadcaster.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].0, format!("session-{}", created.session_id));
    }

    #[test]
    fn test_join_unknown_session_not_found() {
        let (service, _) = test_service();
        assert_eq!(
            service.join_session("deadbeef", "Ben").map(|_| ()),
            Err(GameError::NotFound)
        );
    }

    #[test]
    fn test_third_join_starts_playing() {
        let (service, _) = test_service();
        let created = service.create_session("Ana").unwrap();

        let second = service.join_session(&created.session_id, "Ben").unwrap();
        assert_eq!(second.session.status, GameStatus::Waiting);

        let third = service.join_session(&created.session_id, "Cleo").unwrap();
        assert_eq!(third.session.status, GameStatus::Playing);
        assert_eq!(third.session.players.len(), MAX_PLAYERS);
        assert_eq!(third.session.players[2].power.as_str(), "FREEZE");

        assert_eq!(
            service.join_session(&created.session_id, "Dee").map(|_| ()),
            Err(GameError::Full)
        );
    }

    #[test]
    fn test_broadcasts_follow_mutation_order() {
        let (service, broadcaster) = test_service();
        let created = service.create_session("Ana").unwrap();
        service.join_session(&created.session_id, "Ben").unwrap();

        let published = broadcaster.published();
        assert_eq!(published.len(), 2);
        assert!(published.iter().all(|(topic, _)| {
            topic == &format!("session-{}", created.session_id)
        }));
        assert_eq!(published[0].1.players.len(), 1);
        assert_eq!(published[1].1.players.len(), 2);
    }

    #[test]
    fn test_select_and_submit_flow() {
        let (service, _) = test_service();
        let (session_id, players) = full_session(&service);

        // Different players extend the same shared path.
        service.select_cell(&session_id, &players[0], 0, 0).unwrap();
        service.select_cell(&session_id, &players[1], 0, 1).unwrap();
        service.select_cell(&session_id, &players[2], 1, 0).unwrap();
        assert_eq!(service.session(&session_id).unwrap().current_word, "CAT");

        let points = service.submit_word(&session_id, &players[0]).unwrap();
        assert_eq!(points, 1);

        let snapshot = service.session(&session_id).unwrap();
        assert_eq!(snapshot.score, 1);
        assert_eq!(snapshot.current_word, "");
        assert!(snapshot.selected_cells.is_empty());
        assert_eq!(snapshot.words_found[0].text, "CAT");
    }

    #[test]
    fn test_select_rejections_pass_through() {
        let (service, _) = test_service();
        let (session_id, players) = full_session(&service);

        service.select_cell(&session_id, &players[0], 0, 0).unwrap();
        assert!(matches!(
            service.select_cell(&session_id, &players[0], 3, 3),
            Err(GameError::InvalidSelection(_))
        ));
        assert_eq!(
            service.select_cell(&session_id, "ghost", 0, 1),
            Err(GameError::UnknownPlayer)
        );
    }

    #[test]
    fn test_power_round_trip() {
        let (service, _) = test_service();
        let (session_id, players) = full_session(&service);

        // Seat 2 holds TRANSFORM.
        let description = service
            .apply_power(
                &session_id,
                &players[1],
                PowerEffect::Transform {
                    cell: Position::new(0, 3),
                    letter: 'e',
                },
            )
            .unwrap();
        assert_eq!(description, "Letter transformed!");

        let snapshot = service.session(&session_id).unwrap();
        assert_eq!(snapshot.grid[0][3], 'E');
        assert!(!snapshot.players[1].power_ready);

        assert_eq!(
            service.apply_power(&session_id, &players[1], PowerEffect::Freeze),
            Err(GameError::PowerMismatch)
        );
    }

    #[test]
    fn test_manual_tick_ends_session() {
        let (service, _) = test_service();
        let (session_id, players) = full_session(&service);

        service
            .registry
            .with_session(&session_id, |s| {
                s.set_time_left(1);
                Ok(())
            })
            .unwrap();

        assert_eq!(service.tick(&session_id), Ok(GameStatus::Ended));
        assert_eq!(
            service.select_cell(&session_id, &players[0], 0, 0),
            Err(GameError::NotInProgress)
        );

        // Further ticks are no-ops and publish nothing new.
        let before = service.session(&session_id).unwrap();
        assert_eq!(service.tick(&session_id), Ok(GameStatus::Ended));
        assert_eq!(service.session(&session_id).unwrap(), before);
    }

    #[test]
    fn test_countdown_driver_ends_short_round() {
        let broadcaster = Arc::new(MemoryBroadcaster::new());
        let config = GameConfig {
            round_time_secs: 1,
            ..GameConfig::default()
        };
        let service = GameService::with_config(
            config,
            Lexicon::with_words(["cat"]),
            Arc::clone(&broadcaster) as Arc<dyn Broadcaster>,
        );

        let created = service.create_session("Ana").unwrap();
        service.join_session(&created.session_id, "Ben").unwrap();
        service.join_session(&created.session_id, "Cleo").unwrap();

        // The driver ticks once a second; poll until it lands.
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let status = service.session(&created.session_id).unwrap().status;
            if status == GameStatus::Ended {
                break;
            }
            assert!(Instant::now() < deadline, "countdown never finished");
            thread::sleep(Duration::from_millis(50));
        }

        let snapshot = service.session(&created.session_id).unwrap();
        assert_eq!(snapshot.time_left, 0);
        assert_eq!(snapshot.status, GameStatus::Ended);
    }

    #[test]
    fn test_sweep_evicts_expired_sessions() {
        let config = GameConfig {
            retention: Duration::ZERO,
            ..GameConfig::default()
        };
        let service = GameService::with_config(
            config,
            Lexicon::with_words(["cat"]),
            Arc::new(MemoryBroadcaster::new()) as Arc<dyn Broadcaster>,
        );
        let (session_id, _) = full_session(&service);

        // Live sessions survive any sweep.
        assert_eq!(service.sweep(), 0);

        service
            .registry
            .with_session(&session_id, |s| {
                s.set_time_left(1);
                s.tick();
                Ok(())
            })
            .unwrap();

        assert_eq!(service.sweep(), 1);
        assert_eq!(service.session(&session_id), Err(GameError::NotFound));
    }
}
