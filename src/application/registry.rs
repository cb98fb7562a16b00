//! Session registry keyed by channel.
//!
//! Holds every live session in the process. One channel holds at most
//! one session; opening a second fails until the first reaches a
//! terminal phase and is removed.
//!
//! # Thread Safety
//!
//! The map sits behind a `RwLock` and each session behind its own
//! `Mutex`, so operations on different channels never contend. The map
//! lock is released before any session lock is taken; lookups hand out
//! `Arc<SessionCell>` clones instead of holding the map open.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::domain::foundation::ChannelId;
use crate::domain::session::{Session, SessionError, SessionView};

/// One registered session behind its own lock.
///
/// Every transition is a single lock-guarded read-validate-mutate
/// section, which is what keeps concurrent joins race-free.
#[derive(Debug)]
pub struct SessionCell {
    session: Mutex<Session>,
}

impl SessionCell {
    fn new(session: Session) -> Self {
        Self {
            session: Mutex::new(session),
        }
    }

    /// Acquire the session for one guarded operation.
    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().await
    }
}

/// Registry of live sessions, one per channel.
#[derive(Debug)]
pub struct SessionRegistry {
    /// Map of channel_id → session cell.
    sessions: RwLock<HashMap<ChannelId, Arc<SessionCell>>>,
    /// Roster size for newly opened sessions.
    capacity: usize,
}

impl SessionRegistry {
    /// Create a registry whose sessions want `capacity` players.
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    /// Open a new session in a channel.
    ///
    /// Fails with `AlreadyOpen` while the channel still holds a live
    /// session; the check and insert happen under one write lock.
    pub async fn open(&self, channel_id: ChannelId) -> Result<SessionView, SessionError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&channel_id) {
            return Err(SessionError::already_open(channel_id));
        }

        let session = Session::new(channel_id.clone(), self.capacity);
        let view = session.view();
        sessions.insert(channel_id, Arc::new(SessionCell::new(session)));

        Ok(view)
    }

    /// Look up the session cell for a channel.
    pub async fn get(&self, channel_id: &ChannelId) -> Result<Arc<SessionCell>, SessionError> {
        self.sessions
            .read()
            .await
            .get(channel_id)
            .cloned()
            .ok_or_else(|| SessionError::not_found(channel_id.clone()))
    }

    /// Remove a channel's session, returning the cell if one was registered.
    pub async fn remove(&self, channel_id: &ChannelId) -> Option<Arc<SessionCell>> {
        self.sessions.write().await.remove(channel_id)
    }

    /// Remove a channel's session only if it is still the given cell.
    ///
    /// Protects sweepers holding a stale cell from evicting a session
    /// that was opened on the channel after their snapshot.
    pub async fn remove_if_same(&self, channel_id: &ChannelId, cell: &Arc<SessionCell>) -> bool {
        let mut sessions = self.sessions.write().await;
        match sessions.get(channel_id) {
            Some(current) if Arc::ptr_eq(current, cell) => {
                sessions.remove(channel_id);
                true
            }
            _ => false,
        }
    }

    /// Snapshot of all registered cells, for sweep passes.
    pub async fn cells(&self) -> Vec<(ChannelId, Arc<SessionCell>)> {
        self.sessions
            .read()
            .await
            .iter()
            .map(|(channel_id, cell)| (channel_id.clone(), Arc::clone(cell)))
            .collect()
    }

    /// Whether a channel currently holds a session.
    pub async fn contains(&self, channel_id: &ChannelId) -> bool {
        self.sessions.read().await.contains_key(channel_id)
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are registered.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
