//! Score store contract
//!
//! The game hands its final score to a `ScoreStore` once per run and reads a
//! best-first leaderboard back for the results screen. Store failures never
//! reach the simulation: callers log them and carry on.

mod file;
mod leaderboard;
mod memory;

pub use file::JsonFileStore;
pub use leaderboard::{Leaderboard, MAX_ENTRIES_PER_MODE};
pub use memory::MemoryStore;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Mode used when the caller doesn't name one
pub const DEFAULT_MODE: &str = "demo";

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub name: String,
    pub score: u32,
    /// Unix seconds when the score was recorded
    pub timestamp: u64,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    DEFAULT_MODE.to_string()
}

/// Store connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Leaderboard file (file-backed stores only)
    pub path: PathBuf,
    /// Rows kept per mode
    pub max_entries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("Assets/leaderboard.json"),
            max_entries: MAX_ENTRIES_PER_MODE,
        }
    }
}

/// Where `connect` reads its configuration from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// JSON file containing a `StoreConfig`
    File(PathBuf),
    Inline(StoreConfig),
}

impl ConfigSource {
    pub fn resolve(&self) -> Result<StoreConfig, StoreError> {
        let config = match self {
            ConfigSource::Inline(config) => config.clone(),
            ConfigSource::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&json).map_err(|source| StoreError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
        };
        if config.max_entries == 0 {
            return Err(StoreError::InvalidConfig("max_entries must be > 0".into()));
        }
        Ok(config)
    }
}

#[derive(Debug)]
pub enum StoreError {
    /// `upsert_player_score` before a successful `connect`
    NotConnected,
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
    InvalidConfig(String),
    EmptyPlayerName,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "score store is not connected"),
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Parse { path, source } => write!(f, "{}: invalid JSON: {}", path.display(), source),
            Self::InvalidConfig(msg) => write!(f, "invalid store config: {msg}"),
            Self::EmptyPlayerName => write!(f, "player name is empty"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Persistent leaderboard backend
pub trait ScoreStore {
    fn connect(&mut self, source: &ConfigSource) -> Result<(), StoreError>;

    /// Record a finished run. `mode` defaults to [`DEFAULT_MODE`].
    fn upsert_player_score(&mut self, player: &str, score: u32, mode: Option<&str>) -> Result<(), StoreError>;

    /// Up to `limit` rows, best first. Empty on no data or failure.
    fn top_scores(&self, limit: usize, mode: Option<&str>) -> Vec<ScoreRow>;
}

/// Source of "now" for timestamps
pub trait Clock {
    fn now_epoch_seconds(&self) -> u64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_seconds(&self) -> u64 {
        now_unix_s()
    }
}

pub fn now_unix_s() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Connect `store`, logging the outcome. Returns whether it succeeded.
pub fn connect_or_warn(store: &mut dyn ScoreStore, source: &ConfigSource) -> bool {
    match store.connect(source) {
        Ok(()) => {
            log::info!("[DB] connected");
            true
        }
        Err(e) => {
            log::warn!("[DB] connect failed: {e}; continuing without persistence");
            false
        }
    }
}

/// JSON file store from `source`, or an in-memory board if it can't connect
pub fn open_store(source: &ConfigSource) -> Box<dyn ScoreStore> {
    let mut json = JsonFileStore::new();
    if connect_or_warn(&mut json, source) {
        Box::new(json)
    } else {
        log::warn!("[DB] scores kept in memory for this session");
        Box::new(MemoryStore::new())
    }
}

fn validate_player(player: &str) -> Result<&str, StoreError> {
    let trimmed = player.trim();
    if trimmed.is_empty() {
        return Err(StoreError::EmptyPlayerName);
    }
    Ok(trimmed)
}

fn ensure_parent_dir(path: &Path) -> Result<(), StoreError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_inline() {
        let config = StoreConfig {
            path: PathBuf::from("x.json"),
            max_entries: 3,
        };
        let source = ConfigSource::Inline(config.clone());
        assert_eq!(source.resolve().unwrap(), config);
    }

    #[test]
    fn test_resolve_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("db.json");
        std::fs::write(&cfg, r#"{ "path": "scores.json" }"#).unwrap();

        let config = ConfigSource::File(cfg).resolve().unwrap();
        assert_eq!(config.path, PathBuf::from("scores.json"));
        assert_eq!(config.max_entries, MAX_ENTRIES_PER_MODE);
    }

    #[test]
    fn test_resolve_missing_file() {
        let err = ConfigSource::File(PathBuf::from("/nonexistent/db.json"))
            .resolve()
            .unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn test_resolve_bad_json_and_zero_entries() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("db.json");
        std::fs::write(&cfg, "not json").unwrap();
        assert!(matches!(
            ConfigSource::File(cfg.clone()).resolve(),
            Err(StoreError::Parse { .. })
        ));

        std::fs::write(&cfg, r#"{ "max_entries": 0 }"#).unwrap();
        assert!(matches!(
            ConfigSource::File(cfg).resolve(),
            Err(StoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_open_store_persists_when_connected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.json");
        let mut store = open_store(&ConfigSource::Inline(StoreConfig {
            path: path.clone(),
            max_entries: 5,
        }));
        store.upsert_player_score("ace", 30, None).unwrap();
        assert!(path.exists());
        assert_eq!(store.top_scores(5, None)[0].score, 30);
    }

    #[test]
    fn test_open_store_falls_back_to_memory() {
        let mut store = open_store(&ConfigSource::File(PathBuf::from("/nonexistent/db.json")));
        store.upsert_player_score("ace", 30, None).unwrap();
        assert_eq!(store.top_scores(5, None).len(), 1);
    }

    #[test]
    fn test_validate_player() {
        assert_eq!(validate_player("  Ace ").unwrap(), "Ace");
        assert!(matches!(validate_player("   "), Err(StoreError::EmptyPlayerName)));
    }
}
