//! Per-frame simulation step
//!
//! Order inside the arena: timers, player, fire, shots, spawn, enemies,
//! collisions, purge, game-over check.

use glam::Vec2;

use super::collision::{resolve_player_hit, resolve_projectile_hits};
use super::entity::Kinematic;
use super::player::MoveKeys;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp_frame_dt;
use crate::consts::*;

/// Input polled for a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Held directional keys
    pub movement: MoveKeys,
    /// Fire held (space or left mouse)
    pub fire: bool,
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
    /// Confirm pressed this frame (Enter)
    pub confirm: bool,
    /// Escape pressed this frame: pause in the arena, quit elsewhere
    pub escape: bool,
    /// Reset pressed this frame (R)
    pub reset: bool,
    /// Window lost focus this frame
    pub focus_lost: bool,
    /// Window close requested
    pub close_requested: bool,
}

/// Advance the game by one frame. `raw_dt` is clamped before use.
pub fn tick(state: &mut GameState, input: &TickInput, raw_dt: f32) {
    let dt = clamp_frame_dt(raw_dt);

    if input.close_requested {
        state.request_quit();
        return;
    }

    match state.phase {
        GamePhase::Menu => {
            if input.escape {
                state.request_quit();
            } else if input.confirm || input.fire {
                state.start_run();
            }
        }
        GamePhase::Results => {
            if input.escape {
                state.request_quit();
            } else if input.confirm {
                state.start_run();
            }
        }
        GamePhase::Arena => {
            if input.focus_lost {
                state.set_paused(true);
            }
            if input.escape {
                let paused = !state.run.paused;
                state.set_paused(paused);
            }
            if input.reset {
                state.reset_run();
                state.push_event(GameEvent::RunStarted);
            }
            if !state.run.paused {
                step_arena(state, input, dt);
            }
        }
    }
}

fn step_arena(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;
    state.run.tick_timers(dt);

    // Player
    state.player.handle_input(dt, &input.movement);
    state.player.update(dt, input.pointer);

    // Fire control
    if input.fire && state.run.fire_ready() {
        let muzzle = state.player.muzzle();
        let forward = state.player.forward();
        state.projectiles.fire(muzzle, forward);
        state.run.fire_cooldown = FIRE_COOLDOWN_SEC;
    }

    // Shots
    state.projectiles.update(dt);
    let arena = state.arena;
    state.projectiles.cull_outside(&arena);

    // Enemies home toward the muzzle
    let target = state.player.muzzle();
    if state.spawner.advance(dt) {
        state.spawn_enemy();
    }
    for enemy in &mut state.enemies {
        enemy.update(dt, target);
    }

    // Shots vs enemies
    let killed = resolve_projectile_hits(state.projectiles.slots_mut(), &mut state.enemies);
    for idx in killed {
        state.run.award_kill();
        let pos = state.enemies[idx].position();
        state.push_event(GameEvent::EnemyKilled { pos });
    }

    // Enemies vs player
    if !state.run.is_invulnerable()
        && resolve_player_hit(state.player.pos, PLAYER_RADIUS, &mut state.enemies).is_some()
    {
        state.run.take_hit();
        log::debug!("player hit, {} lives left", state.run.lives);
        state.push_event(GameEvent::PlayerHit {
            lives_left: state.run.lives,
        });
    }

    // Purge the dead before the next collision pass
    state.enemies.retain(|e| e.is_alive());
    state.projectiles.sweep();

    if state.run.is_over() {
        state.end_run();
    }
}
