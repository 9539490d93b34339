//! Session-keyed conversation contexts.
//!
//! Each session owns its own `ConversationContext` behind a mutex, so two
//! learners never share topic state and one session's messages are handled
//! one at a time.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};
use tutorbot_core::TutorConfig;

use crate::context::ConversationContext;

/// Shared handle to one session's context.
pub type SessionHandle = Arc<Mutex<ConversationContext>>;

struct SessionSlot {
    context: SessionHandle,
    last_active: u64,
}

struct StoreInner {
    slots: HashMap<String, SessionSlot>,
    tick: u64,
}

/// Maps session ids to conversation contexts with least-recently-active eviction.
pub struct SessionStore {
    inner: Mutex<StoreInner>,
    max_sessions: usize,
    history_limit: usize,
}

impl SessionStore {
    /// Create a store holding at most `max_sessions` contexts.
    pub fn new(max_sessions: usize, history_limit: usize) -> Self {
        Self {
            inner: Mutex::new(StoreInner {
                slots: HashMap::new(),
                tick: 0,
            }),
            max_sessions: max_sessions.max(1),
            history_limit,
        }
    }

    pub fn from_config(config: &TutorConfig) -> Self {
        Self::new(config.max_sessions, config.history_limit)
    }

    /// Start a new session and return its id.
    pub fn create_session(&self) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.session(&id);
        info!("Session created: {}", id);
        id
    }

    /// Get the context for `id`, creating an empty one if it does not exist.
    pub fn session(&self, id: &str) -> SessionHandle {
        let mut inner = self.inner.lock();
        inner.tick += 1;
        let tick = inner.tick;

        if let Some(slot) = inner.slots.get_mut(id) {
            slot.last_active = tick;
            return slot.context.clone();
        }

        if inner.slots.len() >= self.max_sessions {
            if let Some(oldest) = inner
                .slots
                .iter()
                .min_by_key(|(_, slot)| slot.last_active)
                .map(|(id, _)| id.clone())
            {
                inner.slots.remove(&oldest);
                debug!("Evicted idle session {}", oldest);
            }
        }

        let context = Arc::new(Mutex::new(ConversationContext::with_history_limit(
            self.history_limit,
        )));
        inner.slots.insert(
            id.to_string(),
            SessionSlot {
                context: context.clone(),
                last_active: tick,
            },
        );
        context
    }

    /// Context for `id` if the session exists; does not create or touch it.
    pub fn get(&self, id: &str) -> Option<SessionHandle> {
        self.inner.lock().slots.get(id).map(|s| s.context.clone())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.lock().slots.contains_key(id)
    }

    /// Clear a session's context while keeping the session. Returns false if unknown.
    pub fn reset(&self, id: &str) -> bool {
        match self.get(id) {
            Some(ctx) => {
                ctx.lock().clear();
                true
            }
            None => false,
        }
    }

    /// Drop a session entirely.
    pub fn remove(&self, id: &str) -> bool {
        self.inner.lock().slots.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::from_config(&TutorConfig::default())
    }
}
