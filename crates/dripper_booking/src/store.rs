// --- File: crates/dripper_booking/src/store.rs ---
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::BookingError;
use crate::wizard::BookingWizard;

#[derive(Debug)]
struct SessionEntry {
    wizard: BookingWizard,
    last_active: DateTime<Utc>,
}

/// In-memory wizard sessions keyed by id. Nothing survives a restart.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Stores `wizard` and returns its id. Expired sessions are dropped first.
    pub async fn create(&self, wizard: BookingWizard) -> Uuid {
        self.create_at(wizard, Utc::now()).await
    }

    pub async fn create_at(&self, wizard: BookingWizard, now: DateTime<Utc>) -> Uuid {
        let mut sessions = self.sessions.write().await;
        let ttl = self.ttl;
        let before = sessions.len();
        sessions.retain(|_, entry| now - entry.last_active <= ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!(pruned, "Dropped expired booking sessions");
        }

        let id = wizard.id();
        sessions.insert(
            id,
            SessionEntry {
                wizard,
                last_active: now,
            },
        );
        id
    }

    /// Returns a copy of the session's wizard.
    pub async fn get(&self, id: Uuid) -> Result<BookingWizard, BookingError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let entry = self.live_entry(&mut sessions, id, now)?;
        entry.last_active = now;
        Ok(entry.wizard.clone())
    }

    /// Applies `f` to the session's wizard. The change is kept only when `f`
    /// succeeds, so a rejected operation never leaves a half-updated wizard.
    pub async fn update<T, F>(&self, id: Uuid, f: F) -> Result<(T, BookingWizard), BookingError>
    where
        F: FnOnce(&mut BookingWizard) -> Result<T, BookingError>,
    {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let entry = self.live_entry(&mut sessions, id, now)?;
        entry.last_active = now;

        let mut draft = entry.wizard.clone();
        let value = f(&mut draft)?;
        entry.wizard = draft.clone();
        Ok((value, draft))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), BookingError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(BookingError::SessionNotFound(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn live_entry<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, SessionEntry>,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<&'a mut SessionEntry, BookingError> {
        let expired = match sessions.get(&id) {
            None => return Err(BookingError::SessionNotFound(id)),
            Some(entry) => now - entry.last_active > self.ttl,
        };
        if expired {
            sessions.remove(&id);
            return Err(BookingError::SessionNotFound(id));
        }
        sessions
            .get_mut(&id)
            .ok_or(BookingError::SessionNotFound(id))
    }
}
