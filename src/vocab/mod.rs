pub mod loader;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use loader::{load, parse};

/// One row of the ranked word list. Lower rank means more frequent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabEntry {
    pub rank: u32,
    pub source_word: String,
    pub target_word: String,
}

impl VocabEntry {
    pub fn new(rank: u32, source_word: &str, target_word: &str) -> Self {
        Self {
            rank,
            source_word: source_word.to_string(),
            target_word: target_word.to_string(),
        }
    }

    fn within(&self, max_rank: Option<u32>) -> bool {
        max_rank.map_or(true, |max| self.rank <= max)
    }
}

#[derive(Debug, Error)]
pub enum VocabError {
    #[error("failed to read vocabulary file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed vocabulary data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: expected 3 columns, found {found}")]
    ColumnCount { line: u64, found: usize },
    #[error("line {line}: invalid rank {value:?}")]
    InvalidRank { line: u64, value: String },
    #[error("vocabulary table has no entries")]
    EmptyTable,
    #[error("no vocabulary entry within the rank filter (max_rank={max_rank:?})")]
    EmptyPool { max_rank: Option<u32> },
}

impl VocabError {
    /// Everything except an empty sampling pool is fatal to startup.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, VocabError::EmptyPool { .. })
    }
}

/// Immutable, ordered vocabulary table. Built once per process and shared
/// read-only between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabTable {
    entries: Vec<VocabEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankBounds {
    pub min_rank: u32,
    pub max_rank: u32,
}

impl VocabTable {
    pub fn from_entries(entries: Vec<VocabEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VocabEntry> {
        self.entries.iter()
    }

    /// Entries with `rank <= max_rank` in table order; all of them for `None`.
    pub fn iter_within(&self, max_rank: Option<u32>) -> impl Iterator<Item = &VocabEntry> {
        self.entries.iter().filter(move |e| e.within(max_rank))
    }

    /// Subsequence of entries with `rank <= max_rank`, original order kept.
    pub fn filter_by_rank(&self, max_rank: u32) -> VocabTable {
        VocabTable {
            entries: self.iter_within(Some(max_rank)).cloned().collect(),
        }
    }

    /// Counts the entries a sampling call with `max_rank` could draw from.
    pub fn pool_size(&self, max_rank: Option<u32>) -> usize {
        self.iter_within(max_rank).count()
    }

    /// Draws one entry uniformly from those with `rank <= max_rank`
    /// (the whole table when `max_rank` is `None`).
    pub fn sample_one<R: Rng + ?Sized>(
        &self,
        max_rank: Option<u32>,
        rng: &mut R,
    ) -> Result<VocabEntry, VocabError> {
        self.iter_within(max_rank)
            .choose(rng)
            .cloned()
            .ok_or(VocabError::EmptyPool { max_rank })
    }

    pub fn rank_bounds(&self) -> Option<RankBounds> {
        let min_rank = self.entries.iter().map(|e| e.rank).min()?;
        let max_rank = self.entries.iter().map(|e| e.rank).max()?;
        Some(RankBounds { min_rank, max_rank })
    }
}

impl<'a> IntoIterator for &'a VocabTable {
    type Item = &'a VocabEntry;
    type IntoIter = std::slice::Iter<'a, VocabEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
