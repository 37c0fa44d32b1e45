//! Enemies: edge spawning on a fixed cadence and direct homing

use glam::Vec2;
use rand::Rng;

use super::entity::{Body, Kinematic};
use crate::assets::Visual;
use crate::consts::{ENEMY_RADIUS, ENEMY_SPAWN_INTERVAL_SEC, ENEMY_SPEED, SPAWN_MARGIN};
use crate::safe_normalize;

/// A homing enemy
#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    body: Body,
    speed: f32,
    visual: Visual,
}

impl Enemy {
    /// Enemy with default speed and radius
    pub fn new(spawn_pos: Vec2, visual: Visual) -> Self {
        Self::with_stats(spawn_pos, ENEMY_SPEED, ENEMY_RADIUS, visual)
    }

    pub fn with_stats(spawn_pos: Vec2, speed: f32, radius: f32, visual: Visual) -> Self {
        Self {
            body: Body::new(spawn_pos, radius),
            speed,
            visual,
        }
    }

    /// Re-aim at `target` and advance. No prediction.
    pub fn update(&mut self, dt: f32, target: Vec2) {
        if !self.body.alive {
            return;
        }
        let dir = safe_normalize(target - self.body.pos);
        self.body.vel = dir * self.speed;
        self.body.integrate(dt);
    }

    pub fn visual(&self) -> Visual {
        self.visual
    }

    /// Heading in radians (sprites face their travel direction)
    pub fn heading(&self) -> f32 {
        self.body.vel.y.atan2(self.body.vel.x)
    }
}

impl Kinematic for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Screen edge an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Point `margin` outside this edge at coordinate `along` on the edge axis
    pub fn spawn_point(self, along: f32, size: Vec2, margin: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along, -margin),
            Edge::Right => Vec2::new(size.x + margin, along),
            Edge::Bottom => Vec2::new(along, size.y + margin),
            Edge::Left => Vec2::new(-margin, along),
        }
    }

    /// Length of the edge for a screen of `size`
    pub fn span(self, size: Vec2) -> f32 {
        match self {
            Edge::Top | Edge::Bottom => size.x,
            Edge::Left | Edge::Right => size.y,
        }
    }
}

/// Pick a uniform edge, then a uniform point along it, `margin` outside
pub fn random_spawn_on_edge<R: Rng + ?Sized>(rng: &mut R, size: Vec2, margin: f32) -> (Edge, Vec2) {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let span = edge.span(size);
    let along = if span > 0.0 {
        rng.random_range(0.0..=span)
    } else {
        0.0
    };
    (edge, edge.spawn_point(along, size, margin))
}

/// Fixed-cadence spawn timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawner {
    accumulator: f32,
    interval: f32,
    pub margin: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new(ENEMY_SPAWN_INTERVAL_SEC)
    }
}

impl Spawner {
    pub fn new(interval: f32) -> Self {
        Self {
            accumulator: 0.0,
            interval,
            margin: SPAWN_MARGIN,
        }
    }

    /// Accumulate `dt`; true when a spawn is due (accumulator resets to 0)
    pub fn advance(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.interval {
            self.accumulator = 0.0;
            return true;
        }
        false
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }
}
