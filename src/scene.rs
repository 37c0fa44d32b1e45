//! Render snapshot
//!
//! Everything the platform needs to draw one frame, copied out of the
//! simulation so the renderer never touches `GameState`.

use glam::Vec2;

use crate::assets::{AssetCatalog, Backdrop, Visual};
use crate::consts::{PLAYER_SIZE, RESULTS_BOARD_SIZE};
use crate::sim::{GamePhase, GameState, Kinematic};
use crate::store::ScoreRow;
use crate::ui;

/// Alpha of the white overlay while the hurt flash runs
pub const HURT_FLASH_ALPHA: u8 = 120;

/// One drawable circle or sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteInstance {
    pub pos: Vec2,
    /// Radians, 0 = facing right
    pub rotation: f32,
    pub radius: f32,
    pub visual: Visual,
}

/// The player's ship (drawn as a square)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    pub pos: Vec2,
    pub facing: f32,
    pub size: f32,
    pub visual: Visual,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub phase: GamePhase,
    pub size: Vec2,
    pub backdrop: Backdrop,
    /// Absent outside the arena
    pub ship: Option<ShipPose>,
    pub projectiles: Vec<SpriteInstance>,
    pub enemies: Vec<SpriteInstance>,
    /// Score/lives lines (top-left); empty without a font
    pub hud: Vec<String>,
    /// Centered text block (menu, pause, results); None without a font
    pub overlay: Option<String>,
    /// White full-screen flash alpha, 0 when off
    pub flash_alpha: u8,
}

impl Scene {
    /// Copy the drawable parts of `state`.
    /// `board` is the latest leaderboard, `now` is Unix seconds for row ages.
    pub fn build(state: &GameState, assets: &AssetCatalog, board: &[ScoreRow], now: u64) -> Self {
        let font = assets.has_font();
        let mut scene = Self {
            phase: state.phase,
            size: state.arena.size,
            backdrop: assets.backdrop(),
            ship: None,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            hud: Vec::new(),
            overlay: None,
            flash_alpha: 0,
        };

        match state.phase {
            GamePhase::Menu => {
                if font {
                    scene.overlay = Some(ui::MENU_TEXT.to_string());
                }
            }
            GamePhase::Results => {
                if font {
                    let rows = &board[..board.len().min(RESULTS_BOARD_SIZE)];
                    scene.overlay = Some(ui::results_text(state.run.score, rows, now));
                }
            }
            GamePhase::Arena => {
                scene.ship = Some(ShipPose {
                    pos: state.player.pos,
                    facing: state.player.facing,
                    size: PLAYER_SIZE,
                    visual: Visual::PLAYER_SHAPE,
                });
                scene.projectiles = state
                    .projectiles
                    .iter()
                    .map(|p| SpriteInstance {
                        pos: p.position(),
                        rotation: p.heading(),
                        radius: p.radius(),
                        visual: Visual::PROJECTILE_SHAPE,
                    })
                    .collect();
                scene.enemies = state
                    .enemies
                    .iter()
                    .filter(|e| e.is_alive())
                    .map(|e| SpriteInstance {
                        pos: e.position(),
                        rotation: e.heading(),
                        radius: e.radius(),
                        visual: e.visual(),
                    })
                    .collect();
                if font {
                    scene.hud = vec![ui::score_line(state.run.score), ui::lives_line(state.run.lives)];
                    if state.run.paused {
                        scene.overlay = Some(ui::PAUSED_TEXT.to_string());
                    }
                }
                if state.run.hurt_flash_timer > 0.0 {
                    scene.flash_alpha = HURT_FLASH_ALPHA;
                }
            }
        }

        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Asset, AssetId, AssetKind};
    use std::path::PathBuf;

    const SCREEN: Vec2 = Vec2::new(960.0, 540.0);

    fn with_font() -> AssetCatalog {
        AssetCatalog {
            font: Some(Asset {
                id: AssetId(1),
                kind: AssetKind::Font,
                path: PathBuf::from("Assets/font.ttf"),
            }),
            ..AssetCatalog::empty()
        }
    }

    #[test]
    fn test_menu_scene() {
        let state = GameState::new(1, SCREEN);
        let scene = Scene::build(&state, &with_font(), &[], 0);
        assert_eq!(scene.overlay.as_deref(), Some(ui::MENU_TEXT));
        assert!(scene.ship.is_none());
        assert_eq!(scene.backdrop, Backdrop::FALLBACK);
    }

    #[test]
    fn test_no_font_means_no_text() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        let scene = Scene::build(&state, &AssetCatalog::empty(), &[], 0);
        assert!(scene.hud.is_empty());
        assert!(scene.overlay.is_none());
        assert!(scene.ship.is_some());
    }

    #[test]
    fn test_arena_scene_entities_and_flash() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.spawn_enemy_at(Vec2::new(10.0, 10.0));
        state.projectiles.fire(Vec2::new(100.0, 100.0), Vec2::X);
        state.run.take_hit();

        let scene = Scene::build(&state, &with_font(), &[], 0);
        assert_eq!(scene.enemies.len(), 1);
        assert_eq!(scene.enemies[0].visual, Visual::ENEMY_SHAPE);
        assert_eq!(scene.projectiles.len(), 1);
        assert_eq!(scene.hud, vec!["Score: 0".to_string(), "Lives: 2".to_string()]);
        assert_eq!(scene.flash_alpha, HURT_FLASH_ALPHA);
    }

    #[test]
    fn test_paused_overlay() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.set_paused(true);
        let scene = Scene::build(&state, &with_font(), &[], 0);
        assert_eq!(scene.overlay.as_deref(), Some(ui::PAUSED_TEXT));
    }

    #[test]
    fn test_results_board_capped() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.end_run();
        let rows: Vec<ScoreRow> = (0..8)
            .map(|i| ScoreRow {
                name: format!("p{i}"),
                score: 100 - i,
                timestamp: 0,
                mode: "demo".into(),
            })
            .collect();
        let scene = Scene::build(&state, &with_font(), &rows, 0);
        let text = scene.overlay.unwrap();
        assert!(text.contains("TOP 5"));
        assert!(text.contains("5. p4"));
        assert!(!text.contains("6. p5"));
    }
}
