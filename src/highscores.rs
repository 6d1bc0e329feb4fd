//! High score leaderboard
//!
//! The simulation emits a [`RunRecord`] when a run ends; the host merges it
//! into a [`HighScores`] table and persists the JSON wherever it likes. Only
//! the top 10 records are kept.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Final score
    pub score: u64,
    /// Whole seconds survived
    pub time_secs: u64,
    /// Wave reached
    pub wave: u32,
    /// Display name of the chosen weapon, or "None"
    pub weapon: String,
}

impl RunRecord {
    /// Ordering key: score, then wave, then time, all descending
    fn sort_key(&self) -> (u64, u32, u64) {
        (self.score, self.wave, self.time_secs)
    }
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<RunRecord>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a record would make the table
    pub fn qualifies(&self, record: &RunRecord) -> bool {
        if record.score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries
            .last()
            .map(|e| record.sort_key() > e.sort_key())
            .unwrap_or(true)
    }

    /// Get the rank a record would achieve (1-indexed, None if it doesn't qualify)
    pub fn potential_rank(&self, record: &RunRecord) -> Option<usize> {
        if !self.qualifies(record) {
            return None;
        }
        let rank = self
            .entries
            .iter()
            .position(|e| record.sort_key() > e.sort_key());
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Add a record to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if it didn't qualify
    pub fn add(&mut self, record: RunRecord) -> Option<usize> {
        if !self.qualifies(&record) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| record.sort_key() > e.sort_key());
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, record);
                i + 1
            }
            None => {
                self.entries.push(record);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Serialize for the host's storage
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{\"entries\":[]}".to_string())
    }

    /// Deserialize a stored table; corrupt input yields an empty leaderboard
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(scores) => scores,
            Err(err) => {
                log::warn!("Discarding unreadable high score table: {err}");
                Self::new()
            }
        }
    }
}
