//! High-score table
//!
//! A fixed table of ten `(name, score)` entries, best first. A fresh table
//! holds ten blank entries scoring zero. Storing the table is up to the
//! caller; it serializes with `serde`.

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::HISCORE_ENTRIES;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HiScoreEntry {
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiScoreTable {
    entries: Vec<HiScoreEntry>,
}

impl Default for HiScoreTable {
    fn default() -> Self {
        Self {
            entries: vec![HiScoreEntry::default(); HISCORE_ENTRIES],
        }
    }
}

impl HiScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from stored entries
    ///
    /// Entries are sorted best first; the table is padded with blanks or cut
    /// to ten entries.
    pub fn from_entries<I: IntoIterator<Item = HiScoreEntry>>(entries: I) -> Self {
        let mut entries: Vec<HiScoreEntry> = entries.into_iter().collect();
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.resize(HISCORE_ENTRIES, HiScoreEntry::default());
        Self { entries }
    }

    pub fn entries(&self) -> &[HiScoreEntry] {
        &self.entries
    }

    /// Rank a new `score` would take, `None` if it does not beat the last entry
    ///
    /// Ties lose: a score must be strictly greater than an entry to pass it.
    pub fn rank_for(&self, score: u32) -> Option<usize> {
        self.entries.iter().position(|entry| score > entry.score)
    }

    /// Insert at `rank`, shifting lower entries down and dropping the last one
    pub fn insert(&mut self, name: impl Into<String>, score: u32, rank: usize) -> Result<(), BoardError> {
        if rank >= HISCORE_ENTRIES {
            return Err(BoardError::InvalidRank {
                rank,
                len: HISCORE_ENTRIES,
            });
        }
        self.entries.insert(
            rank,
            HiScoreEntry {
                name: name.into(),
                score,
            },
        );
        self.entries.truncate(HISCORE_ENTRIES);
        Ok(())
    }

    /// Rank and insert in one step; returns the rank taken, if any
    pub fn record(&mut self, name: impl Into<String>, score: u32) -> Option<usize> {
        let rank = self.rank_for(score)?;
        self.insert(name, score, rank).ok()?;
        Some(rank)
    }
}
