use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use tokio::sync::RwLock;

use crate::vocab::{VocabEntry, VocabError, VocabTable};

use super::{record_answer, SessionError, SessionState};

/// A session as held by the host: learning state plus its rank filter.
#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub state: SessionState,
    pub max_rank: Option<u32>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl SessionEntry {
    pub fn new(state: SessionState, max_rank: Option<u32>) -> Self {
        let now = Utc::now();
        Self {
            state,
            max_rank,
            created_at: now,
            last_active: now,
        }
    }

    /// Judges the shown card. Returns the card that was answered; the entry
    /// then holds the next, hidden card.
    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        known: bool,
        pool: &VocabTable,
        rng: &mut R,
    ) -> Result<VocabEntry, SessionError> {
        if !self.state.is_revealed() {
            return Err(SessionError::NotRevealed);
        }
        let answered = self.state.current_card().clone();
        self.state = record_answer(&self.state, known, pool, self.max_rank, rng)?;
        Ok(answered)
    }

    /// Changes the rank filter used for the next draws. A filter that would
    /// leave nothing to draw is refused and the old one stays.
    pub fn set_filter(
        &mut self,
        max_rank: Option<u32>,
        pool: &VocabTable,
    ) -> Result<(), SessionError> {
        if pool.pool_size(max_rank) == 0 {
            return Err(VocabError::EmptyPool { max_rank }.into());
        }
        self.max_rank = max_rank;
        Ok(())
    }

    /// Discards all progress and starts over on a new card.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        pool: &VocabTable,
        rng: &mut R,
    ) -> Result<(), SessionError> {
        self.state = SessionState::start(pool, self.max_rank, rng)?;
        Ok(())
    }
}

/// Isolated sessions keyed by id. Bounded; the least recently used session
/// is dropped to make room for a new one.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionEntry>>,
    capacity: usize,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn insert(&self, entry: SessionEntry) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let mut sessions = self.sessions.write().await;

        while sessions.len() >= self.capacity {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, e)| e.last_active)
                .map(|(k, _)| k.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::info!(session_id = %oldest, "Evicted least recently used session");
        }

        sessions.insert(id.clone(), entry);
        id
    }

    /// Runs `f` on the session under the registry's write lock, so each
    /// action completes before the next one is looked at.
    pub async fn with_session<T, F>(&self, id: &str, f: F) -> Result<T, SessionError>
    where
        F: FnOnce(&mut SessionEntry) -> Result<T, SessionError>,
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(id)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))?;
        entry.last_active = Utc::now();
        f(entry)
    }

    pub async fn remove(&self, id: &str) -> bool {
        self.sessions.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
