//! Player shots and the slot pool that recycles them
//!
//! The pool is a growable slot vector with a liveness flag per slot. Firing
//! reactivates the first dead slot and only grows the vector when every slot
//! is in flight, so memory tracks the high-water mark of concurrent shots.

use glam::Vec2;

use super::entity::{Body, Kinematic, Rect};
use crate::consts::{PROJECTILE_RADIUS, PROJECTILE_SPEED};
use crate::safe_normalize;

/// A single shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    body: Body,
    speed: f32,
}

impl Default for Projectile {
    fn default() -> Self {
        Self::new(PROJECTILE_SPEED, PROJECTILE_RADIUS)
    }
}

impl Projectile {
    /// A dormant shot with the given muzzle speed and hit radius
    pub fn new(speed: f32, radius: f32) -> Self {
        Self {
            body: Body::dormant(radius),
            speed,
        }
    }

    /// Launch from `start` along `forward` (need not be normalized)
    pub fn fire(&mut self, start: Vec2, forward: Vec2) {
        self.body.pos = start;
        self.body.vel = safe_normalize(forward) * self.speed;
        self.body.alive = true;
    }

    pub fn update(&mut self, dt: f32) {
        self.body.integrate(dt);
    }

    /// True when the shot lies strictly outside `bounds`
    pub fn out_of(&self, bounds: &Rect) -> bool {
        !bounds.contains(self.body.pos)
    }

    /// Heading in radians, for sprite rotation
    pub fn heading(&self) -> f32 {
        self.body.vel.y.atan2(self.body.vel.x)
    }
}

impl Kinematic for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}

/// Reusable collection of shots
#[derive(Debug, Clone, Default)]
pub struct ProjectilePool {
    slots: Vec<Projectile>,
}

impl ProjectilePool {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    /// Fire a shot, reusing the first dead slot if there is one.
    /// Returns the slot index used.
    pub fn fire(&mut self, start: Vec2, forward: Vec2) -> usize {
        if let Some(idx) = self.slots.iter().position(|p| !p.is_alive()) {
            self.slots[idx].fire(start, forward);
            return idx;
        }
        let mut shot = Projectile::default();
        shot.fire(start, forward);
        self.slots.push(shot);
        self.slots.len() - 1
    }

    /// Integrate every live shot
    pub fn update(&mut self, dt: f32) {
        for shot in &mut self.slots {
            shot.update(dt);
        }
    }

    /// Kill shots that left `bounds`; returns how many were culled
    pub fn cull_outside(&mut self, bounds: &Rect) -> usize {
        let mut culled = 0;
        for shot in self.slots.iter_mut().filter(|p| p.is_alive()) {
            if shot.out_of(bounds) {
                shot.kill();
                culled += 1;
            }
        }
        culled
    }

    /// Release trailing dead slots. Interior dead slots stay for reuse.
    pub fn sweep(&mut self) {
        while self.slots.last().is_some_and(|p| !p.is_alive()) {
            self.slots.pop();
        }
    }

    /// Drop every shot (run reset)
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Live shots only
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.slots.iter().filter(|p| p.is_alive())
    }

    /// All slots, dead ones included (collision passes skip dead slots)
    pub fn slots_mut(&mut self) -> &mut [Projectile] {
        &mut self.slots
    }

    pub fn alive_count(&self) -> usize {
        self.iter().count()
    }

    /// Allocated slots, live or dead
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fire_normalizes_direction() {
        let mut shot = Projectile::default();
        shot.fire(Vec2::new(10.0, 10.0), Vec2::new(0.0, -5.0));
        assert!(shot.is_alive());
        assert_eq!(shot.velocity(), Vec2::new(0.0, -PROJECTILE_SPEED));

        shot.update(0.5);
        assert_eq!(shot.position(), Vec2::new(10.0, 10.0 - PROJECTILE_SPEED * 0.5));
    }

    #[test]
    fn test_fire_with_zero_forward_stays_put() {
        let mut shot = Projectile::default();
        shot.fire(Vec2::new(1.0, 2.0), Vec2::ZERO);
        shot.update(1.0);
        assert_eq!(shot.position(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_out_of_is_strict() {
        let bounds = Rect::from_size(Vec2::new(100.0, 100.0));
        let mut shot = Projectile::default();
        shot.fire(Vec2::new(100.0, 0.0), Vec2::X);
        assert!(!shot.out_of(&bounds));
        shot.update(0.001);
        assert!(shot.out_of(&bounds));
    }

    #[test]
    fn test_pool_reuses_dead_slot_before_growing() {
        let mut pool = ProjectilePool::default();
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::X), 0);
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::X), 1);
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::X), 2);

        pool.slots_mut()[1].kill();
        assert_eq!(pool.fire(Vec2::ZERO, Vec2::Y), 1);
        assert_eq!(pool.slot_count(), 3);
        assert_eq!(pool.alive_count(), 3);
    }

    #[test]
    fn test_cull_outside_and_sweep() {
        let bounds = Rect::from_size(Vec2::new(100.0, 100.0));
        let mut pool = ProjectilePool::default();
        pool.fire(Vec2::new(50.0, 50.0), Vec2::X);
        pool.fire(Vec2::new(95.0, 50.0), Vec2::X);

        pool.update(0.05); // second shot travels 30 units, past the edge
        assert_eq!(pool.cull_outside(&bounds), 1);
        assert_eq!(pool.alive_count(), 1);

        pool.sweep();
        assert_eq!(pool.slot_count(), 1);
    }

    #[test]
    fn test_sweep_keeps_interior_dead_slots() {
        let mut pool = ProjectilePool::default();
        for _ in 0..3 {
            pool.fire(Vec2::ZERO, Vec2::X);
        }
        pool.slots_mut()[0].kill();
        pool.sweep();
        assert_eq!(pool.slot_count(), 3);
        assert_eq!(pool.alive_count(), 2);
    }

    proptest! {
        #[test]
        fn prop_pool_never_exceeds_high_water_mark(ops in proptest::collection::vec(any::<bool>(), 1..200)) {
            // true = fire, false = kill the oldest live shot
            let mut pool = ProjectilePool::default();
            let mut high_water = 0usize;
            for fire in ops {
                if fire {
                    let had_dead = pool.slot_count() > pool.alive_count();
                    let before = pool.slot_count();
                    pool.fire(Vec2::ZERO, Vec2::X);
                    if had_dead {
                        prop_assert_eq!(pool.slot_count(), before);
                    }
                } else if let Some(shot) = pool.slots_mut().iter_mut().find(|p| p.is_alive()) {
                    shot.kill();
                }
                high_water = high_water.max(pool.alive_count());
                prop_assert!(pool.slot_count() <= high_water);
            }
        }
    }
}
