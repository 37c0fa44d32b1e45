//! Circle-circle hit testing
//!
//! Brute-force pair checks in container order. Entity counts stay small
//! (one spawn every 1.75s), so there is no spatial partitioning.

use glam::Vec2;

use super::enemy::Enemy;
use super::entity::{Body, Kinematic};
use super::projectile::Projectile;

/// Circles overlap or touch (squared distance, no sqrt)
#[inline]
pub fn circle_hit(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let r = ra + rb;
    a.distance_squared(b) <= r * r
}

/// Resolve shots against enemies.
///
/// Each live enemy takes the first live shot that touches it; both die.
/// A shot dies on its first hit so it can never be credited twice.
/// Returns the indices of the enemies killed, in container order.
pub fn resolve_projectile_hits(shots: &mut [Projectile], enemies: &mut [Enemy]) -> Vec<usize> {
    let mut killed = Vec::new();
    for (idx, enemy) in enemies.iter_mut().enumerate() {
        if !enemy.is_alive() {
            continue;
        }
        let hit = shots
            .iter_mut()
            .find(|p| p.is_alive() && p.body().overlaps(enemy.body()));
        if let Some(shot) = hit {
            shot.kill();
            enemy.kill();
            killed.push(idx);
        }
    }
    killed
}

/// First live enemy touching the player (kills it). At most one per call.
pub fn resolve_player_hit(player_pos: Vec2, player_radius: f32, enemies: &mut [Enemy]) -> Option<usize> {
    let player = Body::new(player_pos, player_radius);
    let (idx, enemy) = enemies
        .iter_mut()
        .enumerate()
        .find(|(_, e)| e.is_alive() && e.body().overlaps(&player))?;
    enemy.kill();
    Some(idx)
}
