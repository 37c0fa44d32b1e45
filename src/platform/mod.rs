//! Platform abstraction layer
//!
//! The windowing/input substrate the game runs on:
//! - Window size
//! - Per-frame input polling (key edges, pointer, mouse buttons)
//! - Asset decoding with graceful failure
//! - Scene presentation

mod headless;

pub use headless::HeadlessPlatform;

use glam::Vec2;

use crate::assets::Asset;
use crate::scene::Scene;
use crate::sim::TickInput;

pub trait Platform {
    fn window_size(&self) -> Vec2;

    /// Input for the coming frame
    fn poll_input(&mut self) -> TickInput;

    /// Decode an asset. Returning false makes the game use its fallback.
    fn load_asset(&mut self, asset: &Asset) -> bool {
        let _ = asset;
        true
    }

    fn present(&mut self, scene: &Scene);

    fn is_open(&self) -> bool;

    fn close(&mut self);
}
