//! Game settings and preferences
//!
//! Persisted as JSON next to the binary. Missing or broken files fall back to
//! defaults; a few environment variables override individual fields.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};
use crate::store::DEFAULT_MODE;

/// Settings file used when `ALIEN_FORCE_SETTINGS` is unset
pub const DEFAULT_SETTINGS_PATH: &str = "alien_force.json";

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            Self::Parse { path, source } => write!(f, "{}: invalid settings: {}", path.display(), source),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,

    // === Leaderboard ===
    /// Name submitted with each run
    pub player_name: String,
    /// Leaderboard mode
    pub mode: String,
    /// Store config (JSON `StoreConfig`)
    pub store_config: PathBuf,

    // === Assets ===
    pub asset_dir: PathBuf,

    // === Simulation ===
    /// Fixed run seed; random when unset
    pub seed: Option<u64>,
    /// Frames the headless demo runs before closing
    pub demo_frames: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,

            player_name: "TestPilot".to_string(),
            mode: DEFAULT_MODE.to_string(),
            store_config: PathBuf::from("Assets/db.json"),

            asset_dir: PathBuf::from("Assets"),

            seed: None,
            demo_frames: 120 * 60,
        }
    }
}

impl Settings {
    pub fn window_size(&self) -> Vec2 {
        Vec2::new(self.window_width as f32, self.window_height as f32)
    }

    /// Run seed: configured, or fresh from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| rand::random())
    }

    /// Read settings from `path`
    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            log::info!("Using default settings");
            return Self::default();
        }
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings to `path` as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }

    /// Load from `ALIEN_FORCE_SETTINGS` (or the default path) and apply
    /// environment overrides
    pub fn from_env() -> Self {
        let path = std::env::var("ALIEN_FORCE_SETTINGS").unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_string());
        let mut settings = Self::load(Path::new(&path));
        settings.apply_overrides(|key| std::env::var(key).ok());
        settings
    }

    /// Apply `ALIEN_FORCE_PLAYER` / `ALIEN_FORCE_MODE` / `ALIEN_FORCE_SEED`
    pub fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(name) = var("ALIEN_FORCE_PLAYER").filter(|v| !v.trim().is_empty()) {
            self.player_name = name;
        }
        if let Some(mode) = var("ALIEN_FORCE_MODE").filter(|v| !v.trim().is_empty()) {
            self.mode = mode;
        }
        if let Some(seed) = var("ALIEN_FORCE_SEED") {
            match seed.parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring ALIEN_FORCE_SEED={seed:?}: not a u64"),
            }
        }
    }
}
