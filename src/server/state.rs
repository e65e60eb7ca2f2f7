use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::tracker::TrackerConfig;

/// Shared server state. Holds no tracker state: every session owns its own.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    config: TrackerConfig,
    next_session_id: AtomicU64,
    active_sessions: AtomicUsize,
}

impl AppState {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                config,
                next_session_id: AtomicU64::new(0),
                active_sessions: AtomicUsize::new(0),
            }),
        }
    }

    pub fn tracker_config(&self) -> &TrackerConfig {
        &self.inner.config
    }

    pub fn active_sessions(&self) -> usize {
        self.inner.active_sessions.load(Ordering::SeqCst)
    }

    /// Register a new session. The guard unregisters it on drop.
    pub fn open_session(&self) -> SessionGuard {
        let id = self.inner.next_session_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.active_sessions.fetch_add(1, Ordering::SeqCst);
        SessionGuard {
            id,
            state: self.clone(),
        }
    }
}

pub struct SessionGuard {
    id: u64,
    state: AppState,
}

impl SessionGuard {
    pub fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.state.inner.active_sessions.fetch_sub(1, Ordering::SeqCst);
    }
}
