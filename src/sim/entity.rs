//! Kinematic entity shared by projectiles and enemies
//!
//! Position, velocity, collision radius and a liveness flag. Dead bodies stop
//! integrating and are skipped by collision passes.

use glam::Vec2;

use super::collision::circle_hit;

/// Circle body integrated with explicit Euler steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub alive: bool,
}

impl Body {
    /// A live body at rest
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            alive: true,
        }
    }

    /// A dead body, used for freshly allocated pool slots
    pub fn dormant(radius: f32) -> Self {
        Self {
            alive: false,
            ..Self::new(Vec2::ZERO, radius)
        }
    }

    /// Advance position by velocity * dt (no-op when dead)
    pub fn integrate(&mut self, dt: f32) {
        if self.alive {
            self.pos += self.vel * dt;
        }
    }

    /// Circle-circle overlap, boundary inclusive
    pub fn overlaps(&self, other: &Body) -> bool {
        circle_hit(self.pos, self.radius, other.pos, other.radius)
    }
}

/// Anything that moves as a `Body`
pub trait Kinematic {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    fn position(&self) -> Vec2 {
        self.body().pos
    }

    fn velocity(&self) -> Vec2 {
        self.body().vel
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn kill(&mut self) {
        self.body_mut().alive = false;
    }
}

/// Axis-aligned rectangle (arena bounds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(size: Vec2) -> Self {
        Self::new(Vec2::ZERO, size)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Inclusive containment; points on the edge are inside
    pub fn contains(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.y >= self.min.y && p.x <= max.x && p.y <= max.y
    }
}
