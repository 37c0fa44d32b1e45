//! In-process score store
//!
//! Keeps the leaderboard in memory and records every submission, so the
//! session can still show a board when nothing is persisted.

use super::{
    Clock, ConfigSource, DEFAULT_MODE, Leaderboard, ScoreRow, ScoreStore, StoreError, SystemClock,
    validate_player,
};

pub struct MemoryStore {
    board: Leaderboard,
    submissions: Vec<ScoreRow>,
    clock: Box<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            board: Leaderboard::default(),
            submissions: Vec::new(),
            clock,
        }
    }

    /// Every accepted submission, in order (including ones that missed the board)
    pub fn submissions(&self) -> &[ScoreRow] {
        &self.submissions
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.board
    }
}

impl ScoreStore for MemoryStore {
    /// Only `max_entries` is taken from the config. Fails if the config
    /// can't be read or is invalid; the store stays usable either way.
    fn connect(&mut self, source: &ConfigSource) -> Result<(), StoreError> {
        let config = source.resolve()?;
        self.board.max_entries = config.max_entries;
        self.board.normalize();
        Ok(())
    }

    fn upsert_player_score(&mut self, player: &str, score: u32, mode: Option<&str>) -> Result<(), StoreError> {
        let player = validate_player(player)?;
        let mode = mode.unwrap_or(DEFAULT_MODE);
        let now = self.clock.now_epoch_seconds();

        self.submissions.push(ScoreRow {
            name: player.to_string(),
            score,
            timestamp: now,
            mode: mode.to_string(),
        });
        if let Some(rank) = self.board.upsert(player, score, mode, now) {
            log::debug!("{player} now ranked #{rank} in {mode}");
        }
        Ok(())
    }

    fn top_scores(&self, limit: usize, mode: Option<&str>) -> Vec<ScoreRow> {
        self.board.top(limit, mode.unwrap_or(DEFAULT_MODE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    struct FixedClock(u64);

    impl Clock for FixedClock {
        fn now_epoch_seconds(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_default_mode_is_demo() {
        let mut store = MemoryStore::with_clock(Box::new(FixedClock(1000)));
        store.upsert_player_score("TestPilot", 30, None).unwrap();

        let rows = store.top_scores(5, Some("demo"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].timestamp, 1000);
        assert_eq!(rows[0].mode, DEFAULT_MODE);
        assert_eq!(store.top_scores(5, None), rows);
    }

    #[test]
    fn test_records_every_submission() {
        let mut store = MemoryStore::new();
        store.upsert_player_score("a", 0, None).unwrap();
        store.upsert_player_score("a", 10, None).unwrap();
        assert_eq!(store.submissions().len(), 2);
        // Zero never reaches the board
        assert_eq!(store.top_scores(5, None).len(), 1);
    }

    #[test]
    fn test_rejects_empty_name() {
        let mut store = MemoryStore::new();
        assert!(store.upsert_player_score(" ", 10, None).is_err());
        assert!(store.submissions().is_empty());
    }

    #[test]
    fn test_connect_applies_max_entries() {
        let mut store = MemoryStore::new();
        for (i, name) in ["a", "b", "c"].iter().enumerate() {
            store.upsert_player_score(name, (i as u32 + 1) * 10, None).unwrap();
        }
        let config = StoreConfig {
            max_entries: 2,
            ..Default::default()
        };
        store.connect(&ConfigSource::Inline(config)).unwrap();
        assert_eq!(store.top_scores(10, None).len(), 2);
        assert_eq!(store.leaderboard().max_entries, 2);
    }

    #[test]
    fn test_connect_reports_bad_config_but_store_still_works() {
        let mut store = MemoryStore::new();
        let missing = ConfigSource::File("/nonexistent/db.json".into());
        assert!(matches!(store.connect(&missing), Err(StoreError::Io { .. })));

        let zero = ConfigSource::Inline(StoreConfig {
            max_entries: 0,
            ..Default::default()
        });
        assert!(matches!(store.connect(&zero), Err(StoreError::InvalidConfig(_))));

        store.upsert_player_score("ace", 10, None).unwrap();
        assert_eq!(store.top_scores(5, None).len(), 1);
    }
}
