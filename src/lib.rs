//! Alien Force - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, game phases)
//! - `store`: Score store contract plus in-memory and JSON-file leaderboards
//! - `assets`: Asset probing and sprite/shape visual selection
//! - `scene`: Per-frame render snapshot handed to the platform
//! - `platform`: Windowing/input substrate abstraction
//! - `session`: Wires simulation, store and platform together

pub mod assets;
pub mod platform;
pub mod scene;
pub mod session;
pub mod settings;
pub mod sim;
pub mod store;
pub mod ui;

pub use session::Session;
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single simulation step (~30 fps)
    pub const MAX_FRAME_DT: f32 = 0.033;
    /// Fixed step used by the headless driver (120 Hz)
    pub const HEADLESS_DT: f32 = 1.0 / 120.0;

    /// Default window dimensions
    pub const DEFAULT_WINDOW_WIDTH: u32 = 960;
    pub const DEFAULT_WINDOW_HEIGHT: u32 = 540;

    /// Run bookkeeping
    pub const START_LIVES: u8 = 3;
    pub const SCORE_PER_KILL: u32 = 10;
    /// Player cannot be hit again for this long after a hit
    pub const INVULN_TIME_SEC: f32 = 1.0;
    /// White overlay after a hit (cosmetic only)
    pub const HURT_FLASH_TIME_SEC: f32 = 0.15;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 300.0;
    pub const PLAYER_RADIUS: f32 = 18.0;
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Muzzle sits this far ahead of the ship center
    pub const MUZZLE_OFFSET: f32 = 28.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 600.0;
    pub const PROJECTILE_RADIUS: f32 = 3.0;
    pub const FIRE_COOLDOWN_SEC: f32 = 0.12;
    pub const PROJECTILE_POOL_RESERVE: usize = 128;

    /// Enemy defaults
    pub const ENEMY_SPEED: f32 = 80.0;
    pub const ENEMY_RADIUS: f32 = 16.0;
    pub const ENEMY_SPAWN_INTERVAL_SEC: f32 = 1.75;
    /// Enemies appear this far outside the visible rectangle
    pub const SPAWN_MARGIN: f32 = 40.0;

    /// Leaderboard shown on the results screen
    pub const RESULTS_BOARD_SIZE: usize = 5;
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`.
///
/// Non-finite deltas (clock glitches) collapse to zero.
#[inline]
pub fn clamp_frame_dt(dt: f32) -> f32 {
    if !dt.is_finite() {
        return 0.0;
    }
    dt.clamp(0.0, consts::MAX_FRAME_DT)
}

/// Normalize a vector, returning zero for near-zero input
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len > 0.0001 { v / len } else { Vec2::ZERO }
}

/// Unit vector for an angle in radians (screen coordinates, y down)
#[inline]
pub fn angle_to_dir(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
