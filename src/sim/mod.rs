//! Frame-stepped simulation module
//!
//! All gameplay logic lives here:
//! - Clamped variable timestep
//! - Seeded RNG only
//! - Stable iteration order (container order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod entity;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{circle_hit, resolve_player_hit, resolve_projectile_hits};
pub use enemy::{Edge, Enemy, Spawner, random_spawn_on_edge};
pub use entity::{Body, Kinematic, Rect};
pub use player::{MoveKeys, Player};
pub use projectile::{Projectile, ProjectilePool};
pub use state::{GameEvent, GamePhase, GameState, RunState};
pub use tick::{TickInput, tick};
