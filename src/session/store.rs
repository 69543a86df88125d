//! Server-side session storage.
//!
//! Each session is kept as the JSON encoding of [`SessionState`] with an
//! expiry. Reads decode the payload; anything missing, expired or malformed
//! decodes as the default state.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, SystemTime};

use super::SessionState;

#[derive(Debug, Clone)]
struct SessionRecord {
    payload: String,
    expires_at: SystemTime,
}

impl SessionRecord {
    fn is_valid(&self) -> bool {
        SystemTime::now() < self.expires_at
    }
}

#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
    ttl: Duration,
}

impl SessionStore {
    /// Expired sessions are swept once the store grows past this many entries.
    const CLEANUP_THRESHOLD: usize = 10_000;

    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// True when `id` names a live session.
    pub fn contains(&self, id: &str) -> bool {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.get(id).is_some_and(SessionRecord::is_valid)
    }

    /// Extends the lifetime of a live session. Unknown ids are ignored.
    pub fn touch(&self, id: &str) {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        if let Some(record) = sessions.get_mut(id).filter(|r| r.is_valid()) {
            record.expires_at = SystemTime::now() + self.ttl;
        }
    }

    pub fn load(&self, id: &str) -> SessionState {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        match sessions.get(id) {
            Some(record) if record.is_valid() => decode(id, &record.payload),
            _ => SessionState::default(),
        }
    }

    /// Read-modify-write of one session under a single write lock.
    ///
    /// A session that does not exist yet is only stored once `f` leaves
    /// something in it.
    pub fn update<R>(&self, id: &str, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let mut sessions = self.sessions.write().unwrap_or_else(|e| e.into_inner());
        let (existed, mut state) = match sessions.get(id) {
            Some(record) if record.is_valid() => (true, decode(id, &record.payload)),
            _ => (false, SessionState::default()),
        };

        let result = f(&mut state);

        if !existed && state == SessionState::default() {
            return result;
        }
        if let Some(payload) = encode(id, &state) {
            sessions.insert(
                id.to_string(),
                SessionRecord {
                    payload,
                    expires_at: SystemTime::now() + self.ttl,
                },
            );
        }
        if !existed && sessions.len() > Self::CLEANUP_THRESHOLD {
            sessions.retain(|_, s| s.is_valid());
        }
        result
    }

    /// Number of stored sessions, expired ones included until swept.
    pub fn count(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(|e| e.into_inner());
        sessions.len()
    }
}

fn decode(id: &str, payload: &str) -> SessionState {
    if payload.is_empty() {
        return SessionState::default();
    }
    serde_json::from_str(payload).unwrap_or_else(|e| {
        tracing::warn!(session.id = %id, error = %e, "Discarding malformed session payload");
        SessionState::default()
    })
}

fn encode(id: &str, state: &SessionState) -> Option<String> {
    match serde_json::to_string(state) {
        Ok(payload) => Some(payload),
        Err(e) => {
            tracing::error!(session.id = %id, error = %e, "Failed to encode session payload");
            None
        }
    }
}
