pub mod registry;
pub mod scoring;
pub mod stats;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::vocab::{VocabEntry, VocabError, VocabTable};

pub use registry::{SessionEntry, SessionRegistry};
pub use scoring::record_answer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    Known,
    Unstudied,
}

impl Outcome {
    pub fn from_known(known: bool) -> Self {
        if known {
            Outcome::Known
        } else {
            Outcome::Unstudied
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    pub timestamp: DateTime<Utc>,
    pub xp_total_after: u64,
    pub outcome: Outcome,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(String),
    #[error("card must be revealed before it can be answered")]
    NotRevealed,
    #[error(transparent)]
    Vocab(#[from] VocabError),
}

/// Learning state of one study session.
///
/// Fields are only reachable through accessors so that the score, the
/// mastered set and the history can only move forward together via
/// [`record_answer`].
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    current_card: VocabEntry,
    revealed: bool,
    xp_total: u64,
    mastered_words: BTreeSet<String>,
    history: Vec<ReviewRecord>,
}

impl SessionState {
    /// Fresh session showing `first_card`, hidden, with no progress.
    pub fn new(first_card: VocabEntry) -> Self {
        Self {
            current_card: first_card,
            revealed: false,
            xp_total: 0,
            mastered_words: BTreeSet::new(),
            history: Vec::new(),
        }
    }

    /// Starts a session on a card drawn from `pool`.
    pub fn start<R: Rng + ?Sized>(
        pool: &VocabTable,
        max_rank: Option<u32>,
        rng: &mut R,
    ) -> Result<Self, VocabError> {
        pool.sample_one(max_rank, rng).map(Self::new)
    }

    pub fn current_card(&self) -> &VocabEntry {
        &self.current_card
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn xp_total(&self) -> u64 {
        self.xp_total
    }

    pub fn mastered_words(&self) -> &BTreeSet<String> {
        &self.mastered_words
    }

    pub fn history(&self) -> &[ReviewRecord] {
        &self.history
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub fn advance(&mut self, new_card: VocabEntry) {
        self.current_card = new_card;
        self.revealed = false;
    }

    fn apply(&mut self, xp_gain: u64, outcome: Outcome, at: DateTime<Utc>) {
        self.xp_total += xp_gain;
        if outcome == Outcome::Known {
            self.mastered_words
                .insert(self.current_card.source_word.clone());
        }
        self.history.push(ReviewRecord {
            timestamp: at,
            xp_total_after: self.xp_total,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_hidden_and_empty() {
        let state = SessionState::new(VocabEntry::new(3, "faire", "fazer"));
        assert!(!state.is_revealed());
        assert_eq!(state.xp_total(), 0);
        assert!(state.mastered_words().is_empty());
        assert!(state.history().is_empty());
        assert_eq!(state.current_card().source_word, "faire");
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut state = SessionState::new(VocabEntry::new(3, "faire", "fazer"));
        state.reveal();
        state.reveal();
        assert!(state.is_revealed());
    }

    #[test]
    fn advance_hides_new_card_and_keeps_progress() {
        let mut state = SessionState::new(VocabEntry::new(3, "faire", "fazer"));
        state.apply(10, Outcome::Known, Utc::now());
        state.reveal();
        state.advance(VocabEntry::new(4, "dire", "dizer"));
        assert!(!state.is_revealed());
        assert_eq!(state.current_card().source_word, "dire");
        assert_eq!(state.xp_total(), 10);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn outcome_serializes_camel_case() {
        assert_eq!(serde_json::to_value(Outcome::Known).unwrap(), "known");
        assert_eq!(serde_json::to_value(Outcome::Unstudied).unwrap(), "unstudied");
    }
}
