//! Windowless platform
//!
//! Feeds scripted input, or drives the ship with a small autopilot that
//! reads back the last presented scene. Used by the binary and by tests.

use std::collections::VecDeque;

use glam::Vec2;

use super::Platform;
use crate::assets::{Asset, AssetKind};
use crate::scene::Scene;
use crate::sim::{GamePhase, MoveKeys, TickInput};

/// Enemies closer than this make the autopilot back off
const DODGE_RADIUS: f32 = 120.0;

pub struct HeadlessPlatform {
    size: Vec2,
    script: VecDeque<TickInput>,
    autopilot: bool,
    /// Presented frames left before the window "closes"
    frames_left: Option<u32>,
    rejected: Vec<AssetKind>,
    last_scene: Option<Scene>,
    frames_presented: u64,
    open: bool,
}

impl HeadlessPlatform {
    /// Scripted platform: polls return queued inputs, then idle input
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            script: VecDeque::new(),
            autopilot: false,
            frames_left: None,
            rejected: Vec::new(),
            last_scene: None,
            frames_presented: 0,
            open: true,
        }
    }

    /// Self-playing platform that closes after `frames` presented frames
    pub fn autopilot(size: Vec2, frames: u32) -> Self {
        Self {
            autopilot: true,
            frames_left: Some(frames),
            ..Self::new(size)
        }
    }

    pub fn push_input(&mut self, input: TickInput) {
        self.script.push_back(input);
    }

    /// Queue `count` copies of `input`
    pub fn push_repeated(&mut self, input: TickInput, count: usize) {
        self.script.extend(std::iter::repeat_n(input, count));
    }

    /// Make `load_asset` fail for this kind
    pub fn reject_asset(&mut self, kind: AssetKind) {
        self.rejected.push(kind);
    }

    pub fn resize(&mut self, size: Vec2) {
        self.size = size;
    }

    pub fn last_scene(&self) -> Option<&Scene> {
        self.last_scene.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn autopilot_input(&self) -> TickInput {
        let Some(scene) = &self.last_scene else {
            return TickInput::default();
        };
        match scene.phase {
            GamePhase::Menu => TickInput {
                confirm: true,
                ..Default::default()
            },
            // One run per demo
            GamePhase::Results => TickInput {
                escape: true,
                ..Default::default()
            },
            GamePhase::Arena => {
                let Some(ship) = scene.ship else {
                    return TickInput::default();
                };
                let nearest = scene
                    .enemies
                    .iter()
                    .map(|e| e.pos)
                    .min_by(|a, b| {
                        a.distance_squared(ship.pos)
                            .partial_cmp(&b.distance_squared(ship.pos))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    });

                let Some(target) = nearest else {
                    return TickInput {
                        pointer: ship.pos - Vec2::Y * 100.0,
                        movement: steer_toward(ship.pos, scene.size * 0.5),
                        ..Default::default()
                    };
                };

                let movement = if target.distance(ship.pos) < DODGE_RADIUS {
                    steer_toward(ship.pos, ship.pos * 2.0 - target)
                } else {
                    MoveKeys::default()
                };
                TickInput {
                    pointer: target,
                    fire: true,
                    movement,
                    ..Default::default()
                }
            }
        }
    }
}

/// Keys that move `from` toward `to` (4 unit dead zone)
fn steer_toward(from: Vec2, to: Vec2) -> MoveKeys {
    let d = to - from;
    MoveKeys {
        left: d.x < -4.0,
        right: d.x > 4.0,
        up: d.y < -4.0,
        down: d.y > 4.0,
    }
}

impl Platform for HeadlessPlatform {
    fn window_size(&self) -> Vec2 {
        self.size
    }

    fn poll_input(&mut self) -> TickInput {
        if self.frames_left == Some(0) {
            return TickInput {
                close_requested: true,
                ..Default::default()
            };
        }
        if let Some(input) = self.script.pop_front() {
            return input;
        }
        if self.autopilot {
            return self.autopilot_input();
        }
        TickInput::default()
    }

    fn load_asset(&mut self, asset: &Asset) -> bool {
        !self.rejected.contains(&asset.kind)
    }

    fn present(&mut self, scene: &Scene) {
        self.last_scene = Some(scene.clone());
        self.frames_presented += 1;
        if let Some(left) = self.frames_left.as_mut() {
            *left = left.saturating_sub(1);
        }
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn close(&mut self) {
        self.open = false;
    }
}
