//! In-memory session store.

use std::collections::HashMap;

use bridge_auth_identity_core::Identity;
use tokio::sync::RwLock;
use tracing::debug;

use super::types::{Session, SessionId};

/// Session store keyed by the browser-supplied cookie value.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
    ttl_secs: u64,
}

impl SessionStore {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl_secs,
        }
    }

    /// Open a new session for an authenticated identity.
    pub async fn create(&self, identity: Identity) -> Session {
        let session = Session::new(identity, self.ttl_secs);
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id, session.clone());
        debug!(active = sessions.len(), "Session created");
        session
    }

    /// Look up a session, evicting it if its deadline has passed.
    pub async fn get(&self, id: SessionId) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(session) if session.is_expired() => {
                sessions.remove(&id);
                None
            }
            Some(session) => Some(session.clone()),
            None => None,
        }
    }

    /// Destroy a session (logout). Returns whether it existed.
    pub async fn delete(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Remove all expired sessions. Returns the number evicted.
    pub async fn evict_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired());
        before - sessions.len()
    }

    /// Number of live sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
