use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::models::chat::SessionId;
use super::types::ConversationState;

/// A session's state behind its own lock, so one submission runs at a time.
pub type SharedConversation = Arc<Mutex<ConversationState>>;

/// Thread-safe in-memory session store.
/// Uses DashMap so independent sessions never contend on one lock.
#[derive(Clone)]
pub struct SessionStore {
    /// Session storage: session_id -> conversation
    storage: Arc<DashMap<SessionId, SharedConversation>>,

    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Self {
        info!(
            "Initializing session store (idle timeout {}s)",
            idle_timeout.as_secs()
        );
        Self {
            storage: Arc::new(DashMap::new()),
            idle_timeout,
        }
    }

    /// Get a live session.
    /// Returns None if not found or idle for longer than the timeout.
    pub fn get(&self, session_id: SessionId) -> Option<SharedConversation> {
        let conversation = self.storage.get(&session_id).map(|entry| entry.value().clone())?;

        // A session whose lock is held is in use, hence never idle.
        let expired = conversation
            .try_lock()
            .map(|state| state.is_idle(self.idle_timeout))
            .unwrap_or(false);

        if expired {
            self.storage.remove(&session_id);
            debug!("Session {} expired, removed from store", session_id);
            return None;
        }

        Some(conversation)
    }

    pub fn get_or_create(&self, session_id: SessionId) -> SharedConversation {
        if let Some(conversation) = self.get(session_id) {
            return conversation;
        }

        self.storage
            .entry(session_id)
            .or_insert_with(|| {
                info!("Creating session {}", session_id);
                Arc::new(Mutex::new(ConversationState::new(session_id)))
            })
            .value()
            .clone()
    }

    pub fn remove(&self, session_id: SessionId) -> Option<SharedConversation> {
        self.storage.remove(&session_id).map(|(_, conversation)| conversation)
    }

    /// Get number of sessions held
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Drop idle sessions. Returns number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        let start_len = self.storage.len();
        let idle_timeout = self.idle_timeout;
        self.storage.retain(|_, conversation| {
            conversation
                .try_lock()
                .map(|state| !state.is_idle(idle_timeout))
                .unwrap_or(true)
        });
        let count = start_len.saturating_sub(self.storage.len());

        if count > 0 {
            info!("Cleaned up {} expired sessions", count);
        }

        count
    }

    /// Sweep idle sessions every `interval` until the runtime shuts down.
    pub fn spawn_cleanup_task(&self, interval: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // First tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.cleanup_expired();
                debug!(
                    "Session sweep: removed={}, active={}",
                    removed,
                    store.len()
                );
            }
        })
    }
}
