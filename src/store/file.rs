//! JSON-file score store
//!
//! The whole leaderboard lives in one JSON file. Writes go to a `.tmp`
//! sibling first and are renamed over the real file.

use std::fs;
use std::path::{Path, PathBuf};

use super::{
    Clock, ConfigSource, DEFAULT_MODE, Leaderboard, ScoreRow, ScoreStore, StoreConfig, StoreError,
    SystemClock, ensure_parent_dir, validate_player,
};

pub struct JsonFileStore {
    config: Option<StoreConfig>,
    board: Leaderboard,
    clock: Box<dyn Clock>,
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonFileStore {
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            config: None,
            board: Leaderboard::default(),
            clock,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.config.is_some()
    }

    /// Leaderboard file, once connected
    pub fn path(&self) -> Option<&Path> {
        self.config.as_ref().map(|c| c.path.as_path())
    }

    fn load(path: &Path, max_entries: usize) -> Result<Leaderboard, StoreError> {
        if !path.exists() {
            log::info!("No leaderboard at {}, starting fresh", path.display());
            return Ok(Leaderboard::new(max_entries));
        }
        let json = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut board: Leaderboard = serde_json::from_str(&json).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        board.max_entries = max_entries;
        board.normalize();
        log::info!("Loaded {} leaderboard rows from {}", board.len(), path.display());
        Ok(board)
    }

    fn save(&self, path: &Path) -> Result<(), StoreError> {
        ensure_parent_dir(path)?;
        let json = serde_json::to_string_pretty(&self.board).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut tmp = path.as_os_str().to_owned();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl ScoreStore for JsonFileStore {
    fn connect(&mut self, source: &ConfigSource) -> Result<(), StoreError> {
        let config = source.resolve()?;
        self.board = Self::load(&config.path, config.max_entries)?;
        self.config = Some(config);
        Ok(())
    }

    fn upsert_player_score(&mut self, player: &str, score: u32, mode: Option<&str>) -> Result<(), StoreError> {
        let path = self.config.as_ref().ok_or(StoreError::NotConnected)?.path.clone();
        let player = validate_player(player)?;
        let mode = mode.unwrap_or(DEFAULT_MODE);
        let now = self.clock.now_epoch_seconds();

        match self.board.upsert(player, score, mode, now) {
            Some(rank) => {
                log::info!("{player} ranked #{rank} in {mode} with {score}");
                self.save(&path)
            }
            None => {
                log::debug!("{score} for {player} did not change the {mode} board");
                Ok(())
            }
        }
    }

    fn top_scores(&self, limit: usize, mode: Option<&str>) -> Vec<ScoreRow> {
        if !self.is_connected() {
            return Vec::new();
        }
        self.board.top(limit, mode.unwrap_or(DEFAULT_MODE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inline(path: PathBuf) -> ConfigSource {
        ConfigSource::Inline(StoreConfig {
            path,
            max_entries: 10,
        })
    }

    #[test]
    fn test_upsert_before_connect_fails() {
        let mut store = JsonFileStore::new();
        let err = store.upsert_player_score("a", 10, None).unwrap_err();
        assert!(matches!(err, StoreError::NotConnected));
        assert!(store.top_scores(5, None).is_empty());
    }

    #[test]
    fn test_scores_survive_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("leaderboard.json");

        let mut store = JsonFileStore::new();
        store.connect(&inline(path.clone())).unwrap();
        store.upsert_player_score("ace", 40, None).unwrap();
        store.upsert_player_score("bob", 70, Some("survival")).unwrap();
        assert!(path.exists());

        let mut reopened = JsonFileStore::new();
        reopened.connect(&inline(path)).unwrap();
        assert_eq!(reopened.top_scores(5, None)[0].name, "ace");
        assert_eq!(reopened.top_scores(5, Some("survival"))[0].score, 70);
    }

    #[test]
    fn test_connect_via_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let board_path = dir.path().join("board.json");
        let cfg_path = dir.path().join("db.json");
        let cfg = serde_json::json!({ "path": board_path, "max_entries": 3 });
        fs::write(&cfg_path, cfg.to_string()).unwrap();

        let mut store = JsonFileStore::new();
        store.connect(&ConfigSource::File(cfg_path)).unwrap();
        assert_eq!(store.path(), Some(board_path.as_path()));
    }

    #[test]
    fn test_corrupt_board_fails_connect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        fs::write(&path, "{ broken").unwrap();

        let mut store = JsonFileStore::new();
        let err = store.connect(&inline(path)).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(!store.is_connected());
    }

    #[test]
    fn test_non_improving_score_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let mut store = JsonFileStore::new();
        store.connect(&inline(path.clone())).unwrap();

        store.upsert_player_score("ace", 40, None).unwrap();
        let before = fs::read_to_string(&path).unwrap();
        store.upsert_player_score("ace", 10, None).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
