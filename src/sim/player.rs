//! The player's ship
//!
//! Movement comes from four-way keys; facing tracks the pointer independently.

use glam::Vec2;

use crate::consts::{MUZZLE_OFFSET, PLAYER_SPEED};
use crate::{angle_to_dir, safe_normalize};

/// Directional keys held this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveKeys {
    /// Combined unit direction (diagonals normalized, opposing keys cancel)
    pub fn direction(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        if self.up {
            v.y -= 1.0;
        }
        if self.down {
            v.y += 1.0;
        }
        safe_normalize(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in radians; 0 points right, -PI/2 points up
    pub facing: f32,
    pub speed: f32,
}

impl Player {
    /// Ship at `pos`, facing up
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            facing: -std::f32::consts::FRAC_PI_2,
            speed: PLAYER_SPEED,
        }
    }

    /// Move by `speed * dt` along the held direction
    pub fn handle_input(&mut self, dt: f32, keys: &MoveKeys) {
        let dir = keys.direction();
        if dir != Vec2::ZERO {
            self.pos += dir * self.speed * dt;
        }
    }

    /// Turn to face `pointer`. Facing is kept when the pointer sits on the ship.
    pub fn update(&mut self, _dt: f32, pointer: Vec2) {
        let to_pointer = pointer - self.pos;
        if to_pointer.length_squared() > 0.0 {
            self.facing = to_pointer.y.atan2(to_pointer.x);
        }
    }

    pub fn forward(&self) -> Vec2 {
        angle_to_dir(self.facing)
    }

    /// Projectile spawn point ahead of the ship
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.forward() * MUZZLE_OFFSET
    }

    /// Put the ship back at `pos` facing up, keeping its tuning
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.facing = -std::f32::consts::FRAC_PI_2;
    }
}
