/// XP awarded when the learner already knew the word
pub const XP_KNOWN: u64 = 10;

/// XP awarded when the learner still has to study the word
pub const XP_UNSTUDIED: u64 = 2;

/// XP needed to climb one level
pub const XP_PER_LEVEL: u64 = 100;

/// Number of columns per dataset row: rank, source word, target word
pub const VOCAB_COLUMNS: usize = 3;

/// Default dataset location
pub const DEFAULT_VOCAB_PATH: &str = "./data/frances_verbs.tsv";

/// Smallest rank filter accepted over HTTP
pub const MIN_RANK_FILTER: u32 = 1;

/// Largest rank filter accepted over HTTP
pub const MAX_RANK_FILTER: u32 = 1_000_000;

/// Default number of concurrently held sessions
pub const DEFAULT_MAX_SESSIONS: usize = 1_000;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Maximum page size for list endpoints
pub const MAX_PAGE_SIZE: u64 = 100;
