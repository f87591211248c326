//! Request input checks shared by the HTTP routes.

use crate::constants::{MAX_RANK_FILTER, MIN_RANK_FILTER};

/// A rank filter is either absent (whole table) or within the accepted bounds.
pub fn validate_max_rank(max_rank: Option<u32>) -> Result<(), &'static str> {
    match max_rank {
        Some(r) if !(MIN_RANK_FILTER..=MAX_RANK_FILTER).contains(&r) => {
            Err("maxRank must be between 1 and 1000000")
        }
        _ => Ok(()),
    }
}

/// Session ids are UUIDs; anything else cannot name a session.
pub fn is_valid_session_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}
