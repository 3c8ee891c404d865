//! Outbound notification seam.
//!
//! After every successful mutation the service hands the fresh snapshot to a
//! [`Broadcaster`] under the session's topic. Delivery is fire-and-forget:
//! the service logs failures and moves on; a lost broadcast never stalls or
//! rolls back session state.

use crate::session::SessionSnapshot;
use std::sync::Mutex;

/// Fan-out hook implemented by the real-time transport living outside this
/// crate.
pub trait Broadcaster: Send + Sync {
    /// Deliver one snapshot to one topic. The error is only ever logged by
    /// the caller.
    fn publish(&self, topic: &str, snapshot: &SessionSnapshot) -> Result<(), String>;
}

/// Discards every snapshot. For embedders that wire fan-out up later, and for
/// tests that don't observe it.
#[derive(Debug, Default)]
pub struct NullBroadcaster;

impl Broadcaster for NullBroadcaster {
    fn publish(&self, _topic: &str, _snapshot: &SessionSnapshot) -> Result<(), String> {
        Ok(())
    }
}

/// Records every publish in memory, in delivery order. Test double for
/// observing the fan-out.
#[derive(Debug, Default)]
pub struct MemoryBroadcaster {
    published: Mutex<Vec<(String, SessionSnapshot)>>,
}

impl MemoryBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, oldest first.
    pub fn published(&self) -> Vec<(String, SessionSnapshot)> {
        self.published.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.published.lock().unwrap().len()
    }
}

impl Broadcaster for MemoryBroadcaster {
    fn publish(&self, topic: &str, snapshot: &SessionSnapshot) -> Result<(), String> {
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), snapshot.clone()));
        Ok(())
    }
}
