//! Top-N leaderboard shared by the store backends
//!
//! One row per (player, mode), holding the player's best score. Rows are kept
//! best-first; ties go to whoever set the score first.

use serde::{Deserialize, Serialize};

use super::ScoreRow;

/// Default number of rows kept per mode
pub const MAX_ENTRIES_PER_MODE: usize = 10;

fn default_max_entries() -> usize {
    MAX_ENTRIES_PER_MODE
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaderboard {
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    #[serde(default)]
    pub entries: Vec<ScoreRow>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new(MAX_ENTRIES_PER_MODE)
    }
}

impl Leaderboard {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            entries: Vec::new(),
        }
    }

    fn mode_rows<'a>(&'a self, mode: &'a str) -> impl Iterator<Item = &'a ScoreRow> + 'a {
        self.entries.iter().filter(move |r| r.mode == mode)
    }

    /// Check if a new player's score would make the board
    pub fn qualifies(&self, score: u32, mode: &str) -> bool {
        if score == 0 {
            return false;
        }
        if self.mode_rows(mode).count() < self.max_entries {
            return true;
        }
        // Must beat the lowest entry
        self.mode_rows(mode).last().map(|r| score > r.score).unwrap_or(true)
    }

    /// Record `score` for `name`, keeping only the player's best.
    /// Returns the player's rank (1-indexed) if the board changed.
    pub fn upsert(&mut self, name: &str, score: u32, mode: &str, timestamp: u64) -> Option<usize> {
        let existing = self
            .entries
            .iter_mut()
            .find(|r| r.mode == mode && r.name == name);

        match existing {
            Some(row) => {
                if score <= row.score {
                    return None;
                }
                row.score = score;
                row.timestamp = timestamp;
            }
            None => {
                if !self.qualifies(score, mode) {
                    return None;
                }
                self.entries.push(ScoreRow {
                    name: name.to_string(),
                    score,
                    timestamp,
                    mode: mode.to_string(),
                });
            }
        }

        self.normalize();
        self.rank_of(name, mode)
    }

    /// Sort best-first and trim every mode to `max_entries`
    pub fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(a.timestamp.cmp(&b.timestamp)));

        let max = self.max_entries;
        let mut kept: Vec<(String, usize)> = Vec::new();
        self.entries.retain(|r| {
            match kept.iter_mut().find(|(m, _)| *m == r.mode) {
                Some((_, n)) => {
                    *n += 1;
                    *n <= max
                }
                None => {
                    kept.push((r.mode.clone(), 1));
                    max > 0
                }
            }
        });
    }

    pub fn rank_of(&self, name: &str, mode: &str) -> Option<usize> {
        self.mode_rows(mode).position(|r| r.name == name).map(|i| i + 1)
    }

    /// Up to `limit` rows for `mode`, best first
    pub fn top(&self, limit: usize, mode: &str) -> Vec<ScoreRow> {
        self.mode_rows(mode).take(limit).cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
