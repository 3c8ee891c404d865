//! Session arena: id → session, each behind its own lock.
//!
//! The registry is the concurrency boundary. The outer map lock is held only
//! long enough to resolve an id; every read or mutation then runs under that
//! session's own mutex, so distinct sessions never contend and operations on
//! one session linearize into a single order.

use crate::error::GameError;
use crate::session::{Session, SessionSnapshot};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use tracing::debug;

#[derive(Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fresh session. Returns false if the id is already taken.
    pub fn insert(&self, session: Session) -> bool {
        let mut map = self.sessions.write().unwrap();
        if map.contains_key(session.id()) {
            return false;
        }
        map.insert(session.id().to_string(), Arc::new(Mutex::new(session)));
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.read().unwrap().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run one operation against a session, serialized with every other
    /// operation on the same session. The closure's rejection propagates
    /// untouched; absent sessions report `NotFound`.
    pub fn with_session<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut Session) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let entry = self.entry(id).ok_or(GameError::NotFound)?;
        let mut session = entry.lock().unwrap();
        f(&mut session)
    }

    /// Atomically-consistent read of the current state.
    pub fn snapshot(&self, id: &str) -> Result<SessionSnapshot, GameError> {
        let entry = self.entry(id).ok_or(GameError::NotFound)?;
        let session = entry.lock().unwrap();
        Ok(session.snapshot())
    }

    /// Evict sessions that ended more than `retention` ago. Returns how many
    /// were removed.
    pub fn sweep(&self, retention: Duration) -> usize {
        let mut map = self.sessions.write().unwrap();
        let before = map.len();
        map.retain(|id, entry| {
            let expired = entry
                .lock()
                .unwrap()
                .ended_since()
                .is_some_and(|since| since >= retention);
            if expired {
                debug!(session_id = %id, "Evicting ended session");
            }
            !expired
        });
        before - map.len()
    }

    fn entry(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().unwrap().get(id).cloned()
    }
}
