use chrono::{DateTime, Utc};
use rand::Rng;

use crate::constants::{XP_KNOWN, XP_UNSTUDIED};
use crate::vocab::{VocabError, VocabTable};

use super::{Outcome, SessionState};

pub fn xp_gain(known: bool) -> u64 {
    if known {
        XP_KNOWN
    } else {
        XP_UNSTUDIED
    }
}

/// Scores the current card and moves on to a freshly drawn one.
///
/// The input state is never modified. On `EmptyPool` nothing is returned
/// but the error, so a caller keeping `state` observes no partial answer.
pub fn record_answer<R: Rng + ?Sized>(
    state: &SessionState,
    known: bool,
    pool: &VocabTable,
    max_rank: Option<u32>,
    rng: &mut R,
) -> Result<SessionState, VocabError> {
    record_answer_at(state, known, pool, max_rank, Utc::now(), rng)
}

pub fn record_answer_at<R: Rng + ?Sized>(
    state: &SessionState,
    known: bool,
    pool: &VocabTable,
    max_rank: Option<u32>,
    at: DateTime<Utc>,
    rng: &mut R,
) -> Result<SessionState, VocabError> {
    // Draw first: the only fallible step must precede every mutation.
    let next_card = pool.sample_one(max_rank, rng)?;

    let mut next = state.clone();
    next.apply(xp_gain(known), Outcome::from_known(known), at);
    next.advance(next_card);

    tracing::debug!(
        word = %state.current_card().source_word,
        known,
        xp_total = next.xp_total(),
        "Answer recorded"
    );
    Ok(next)
}
