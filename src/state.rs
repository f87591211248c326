use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::session::SessionRegistry;
use crate::vocab::VocabTable;

#[derive(Clone)]
pub struct AppState {
    vocab: Arc<VocabTable>,
    sessions: Arc<SessionRegistry>,
    config: Arc<Config>,
    started_at: Instant,
}

impl AppState {
    pub fn new(vocab: Arc<VocabTable>, config: &Config) -> Self {
        Self {
            vocab,
            sessions: Arc::new(SessionRegistry::new(config.max_sessions)),
            config: Arc::new(config.clone()),
            started_at: Instant::now(),
        }
    }

    pub fn vocab(&self) -> &VocabTable {
        &self.vocab
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

#[cfg(test)]
mod tests {
    use crate::vocab::VocabEntry;

    use super::*;

    #[tokio::test]
    async fn clones_share_vocab_and_sessions() {
        let mut cfg = Config::from_env();
        cfg.max_sessions = 3;
        let vocab = Arc::new(VocabTable::from_entries(vec![VocabEntry::new(
            1, "être", "ser",
        )]));
        let state = AppState::new(vocab.clone(), &cfg);
        let other = state.clone();

        assert_eq!(other.vocab().len(), 1);
        assert_eq!(other.sessions().capacity(), 3);
        assert_eq!(Arc::strong_count(&vocab), 3);
        assert!(state.sessions().is_empty().await);
    }
}
