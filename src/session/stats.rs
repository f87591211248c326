//! Read-only figures derived from a session. Nothing here is stored; every
//! value is recomputed from [`SessionState`] on demand.

use serde::Serialize;

use crate::constants::XP_PER_LEVEL;

use super::{Outcome, ReviewRecord, SessionState};

pub fn level(xp_total: u64) -> u64 {
    xp_total / XP_PER_LEVEL + 1
}

/// Fraction of the current level already earned, in `[0, 1)`.
pub fn progress_to_next_level(xp_total: u64) -> f64 {
    (xp_total % XP_PER_LEVEL) as f64 / XP_PER_LEVEL as f64
}

/// Share of answers judged known; `None` when nothing was answered yet.
pub fn accuracy(history: &[ReviewRecord]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let known = history
        .iter()
        .filter(|r| r.outcome == Outcome::Known)
        .count();
    Some(known as f64 / history.len() as f64)
}

pub fn reviewed_count(history: &[ReviewRecord]) -> usize {
    history.len()
}

pub fn mastered_count(state: &SessionState) -> usize {
    state.mastered_words().len()
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpPoint {
    pub index: usize,
    pub xp_total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub xp_total: u64,
    pub level: u64,
    pub progress_to_next_level: f64,
    pub reviewed_count: usize,
    pub mastered_count: usize,
    pub accuracy: Option<f64>,
    pub xp_evolution: Vec<XpPoint>,
}

impl SessionStats {
    pub fn from_state(state: &SessionState) -> Self {
        let history = state.history();
        Self {
            xp_total: state.xp_total(),
            level: level(state.xp_total()),
            progress_to_next_level: progress_to_next_level(state.xp_total()),
            reviewed_count: reviewed_count(history),
            mastered_count: mastered_count(state),
            accuracy: accuracy(history),
            xp_evolution: history
                .iter()
                .enumerate()
                .map(|(i, r)| XpPoint {
                    index: i + 1,
                    xp_total: r.xp_total_after,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::vocab::VocabEntry;

    fn record(outcome: Outcome) -> ReviewRecord {
        ReviewRecord {
            timestamp: Utc::now(),
            xp_total_after: 0,
            outcome,
        }
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level(0), 1);
        assert_eq!(level(99), 1);
        assert_eq!(level(100), 2);
        assert_eq!(level(250), 3);
    }

    #[test]
    fn progress_wraps_each_level() {
        assert_eq!(progress_to_next_level(0), 0.0);
        assert!((progress_to_next_level(250) - 0.5).abs() < 1e-12);
        assert!((progress_to_next_level(99) - 0.99).abs() < 1e-12);
        assert_eq!(progress_to_next_level(300), 0.0);
    }

    #[test]
    fn accuracy_of_mixed_history() {
        let history = vec![
            record(Outcome::Known),
            record(Outcome::Known),
            record(Outcome::Unstudied),
        ];
        let acc = accuracy(&history).unwrap();
        assert!((acc - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(reviewed_count(&history), 3);
    }

    #[test]
    fn accuracy_without_history_is_none() {
        assert_eq!(accuracy(&[]), None);
    }

    #[test]
    fn snapshot_of_fresh_session() {
        let state = SessionState::new(VocabEntry::new(1, "être", "ser"));
        let stats = SessionStats::from_state(&state);
        assert_eq!(stats.level, 1);
        assert_eq!(stats.reviewed_count, 0);
        assert_eq!(stats.mastered_count, 0);
        assert!(stats.accuracy.is_none());
        assert!(stats.xp_evolution.is_empty());

        let json = serde_json::to_value(&stats).unwrap();
        assert!(json["accuracy"].is_null());
        assert_eq!(json["progressToNextLevel"], 0.0);
    }
}
