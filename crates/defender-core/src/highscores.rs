//! High-score table and the persistence contract behind it.
//!
//! The table itself is pure: entries sorted descending by score, capped at
//! `HIGH_SCORE_CAPACITY`. Where the entries live on disk is up to whoever
//! implements `HighScoreStore`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::HIGH_SCORE_CAPACITY;

/// One (name, score) row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: i64,
}

impl ScoreEntry {
    pub fn new(name: impl Into<String>, score: i64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreTable {
    entries: Vec<ScoreEntry>,
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from loaded rows, restoring order and capacity.
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut table = Self { entries };
        table.normalize();
        table
    }

    /// Insert an entry and return its zero-based rank, or `None` when it
    /// fell off the bottom of a full table. Equal scores keep insertion
    /// order, so a newcomer ranks below existing ties.
    pub fn add_entry(&mut self, name: impl Into<String>, score: i64) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= score);
        if rank >= HIGH_SCORE_CAPACITY {
            return None;
        }
        self.entries.insert(rank, ScoreEntry::new(name, score));
        self.entries.truncate(HIGH_SCORE_CAPACITY);
        Some(rank)
    }

    /// Whether `score` would make the table.
    pub fn qualifies(&self, score: i64) -> bool {
        self.entries.len() < HIGH_SCORE_CAPACITY
            || self.entries.last().is_some_and(|e| score > e.score)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn normalize(&mut self) {
        // Stable sort keeps file order among equal scores.
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(HIGH_SCORE_CAPACITY);
    }
}

#[derive(Debug, Error)]
pub enum HighScoreError {
    #[error("high-score file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("high-score file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Backing store for the high-score list.
pub trait HighScoreStore {
    fn load(&self) -> Result<Vec<ScoreEntry>, HighScoreError>;
    fn save(&self, entries: &[ScoreEntry]) -> Result<(), HighScoreError>;
}
