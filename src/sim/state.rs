//! Game state and core simulation types
//!
//! `GameState` is the single simulation context: it owns the player, both
//! entity collections, the spawn timer, the RNG and the per-run bookkeeping.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::enemy::{Enemy, Spawner, random_spawn_on_edge};
use super::entity::Rect;
use super::player::Player;
use super::projectile::ProjectilePool;
use crate::assets::{AssetId, Visual};
use crate::consts::*;

/// Which screen is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, waiting for confirm
    #[default]
    Menu,
    /// Active gameplay
    Arena,
    /// Run ended, leaderboard shown
    Results,
}

/// Something that happened during a tick, drained by the session
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    RunStarted,
    Paused,
    Resumed,
    EnemyKilled { pos: Vec2 },
    PlayerHit { lives_left: u8 },
    /// Emitted once per run; the session submits `score` to the store
    RunEnded { score: u32 },
    QuitRequested,
}

/// Per-run bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct RunState {
    pub score: u32,
    pub lives: u8,
    /// Player-hit detection is off while this is positive
    pub invuln_timer: f32,
    pub hurt_flash_timer: f32,
    pub fire_cooldown: f32,
    pub paused: bool,
    /// Score already handed to the store for this run
    pub saved_this_run: bool,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            score: 0,
            lives: START_LIVES,
            invuln_timer: 0.0,
            hurt_flash_timer: 0.0,
            fire_cooldown: 0.0,
            paused: false,
            saved_this_run: false,
        }
    }
}

impl RunState {
    /// Count down all timers, flooring at zero
    pub fn tick_timers(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        self.hurt_flash_timer = (self.hurt_flash_timer - dt).max(0.0);
    }

    pub fn fire_ready(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    pub fn award_kill(&mut self) {
        self.score = self.score.saturating_add(SCORE_PER_KILL);
    }

    /// Lose a life and start the invulnerability window
    pub fn take_hit(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.invuln_timer = INVULN_TIME_SEC;
        self.hurt_flash_timer = HURT_FLASH_TIME_SEC;
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    /// Claim the single store submission for this run.
    /// Returns false if it was already claimed.
    pub fn claim_save(&mut self) -> bool {
        if self.saved_this_run {
            return false;
        }
        self.saved_this_run = true;
        true
    }
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub run: RunState,
    pub player: Player,
    pub projectiles: ProjectilePool,
    /// Live enemies (dead ones are purged at the end of each tick)
    pub enemies: Vec<Enemy>,
    pub spawner: Spawner,
    /// Visible playfield; shots leaving it are culled
    pub arena: Rect,
    /// Shared enemy texture, if the platform loaded one
    pub enemy_texture: Option<AssetId>,
    /// Frames simulated in the arena
    pub time_ticks: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    quit: bool,
}

impl GameState {
    /// Fresh state on the menu screen
    pub fn new(seed: u64, arena_size: Vec2) -> Self {
        let arena = Rect::from_size(arena_size);
        Self {
            seed,
            phase: GamePhase::Menu,
            run: RunState::default(),
            player: Player::new(arena.center()),
            projectiles: ProjectilePool::with_capacity(PROJECTILE_POOL_RESERVE),
            enemies: Vec::new(),
            spawner: Spawner::default(),
            arena,
            enemy_texture: None,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            quit: false,
        }
    }

    /// Track window resizes
    pub fn set_arena_size(&mut self, size: Vec2) {
        self.arena = Rect::from_size(size);
    }

    /// Reset run bookkeeping and clear all entities. Pause state is kept.
    pub fn reset_run(&mut self) {
        self.run = RunState {
            paused: self.run.paused,
            ..RunState::default()
        };
        self.enemies.clear();
        self.projectiles.clear();
        self.spawner.reset();
        self.player.reset(self.arena.center());
        log::debug!("run reset");
    }

    /// Reset and enter the arena
    pub fn start_run(&mut self) {
        self.reset_run();
        self.run.paused = false;
        self.phase = GamePhase::Arena;
        self.push_event(GameEvent::RunStarted);
        log::info!("run started");
    }

    /// Enter results; the first call per run emits `RunEnded`
    pub fn end_run(&mut self) {
        self.phase = GamePhase::Results;
        if self.run.claim_save() {
            log::info!("run ended with score {}", self.run.score);
            self.push_event(GameEvent::RunEnded {
                score: self.run.score,
            });
        }
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.run.paused == paused {
            return;
        }
        self.run.paused = paused;
        self.push_event(if paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
    }

    /// Visual for a newly spawned enemy (sprite if a texture is loaded)
    pub fn enemy_visual(&self) -> Visual {
        match self.enemy_texture {
            Some(id) => Visual::Sprite(id),
            None => Visual::ENEMY_SHAPE,
        }
    }

    /// Spawn an enemy just outside a random edge
    pub fn spawn_enemy(&mut self) {
        let (edge, pos) = random_spawn_on_edge(&mut self.rng, self.arena.size, self.spawner.margin);
        log::debug!("enemy spawned on {:?} edge at {:?}", edge, pos);
        self.spawn_enemy_at(pos);
    }

    pub fn spawn_enemy_at(&mut self, pos: Vec2) {
        let visual = self.enemy_visual();
        self.enemies.push(Enemy::new(pos, visual));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn request_quit(&mut self) {
        if !self.quit {
            self.quit = true;
            self.push_event(GameEvent::QuitRequested);
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Vec2 = Vec2::new(960.0, 540.0);

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(1, SCREEN);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.run.lives, START_LIVES);
        assert_eq!(state.player.pos, Vec2::new(480.0, 270.0));
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_take_hit_never_goes_negative() {
        let mut run = RunState::default();
        for _ in 0..10 {
            run.take_hit();
        }
        assert_eq!(run.lives, 0);
        assert!(run.is_over());
    }

    #[test]
    fn test_timers_floor_at_zero() {
        let mut run = RunState::default();
        run.take_hit();
        assert!(run.is_invulnerable());
        run.tick_timers(5.0);
        assert_eq!(run.invuln_timer, 0.0);
        assert_eq!(run.hurt_flash_timer, 0.0);
        assert!(run.fire_ready());
    }

    #[test]
    fn test_claim_save_once() {
        let mut run = RunState::default();
        assert!(run.claim_save());
        assert!(!run.claim_save());
    }

    #[test]
    fn test_end_run_emits_single_event() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.run.score = 30;
        state.end_run();
        state.end_run();
        let ended: Vec<_> = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::RunEnded { .. }))
            .collect();
        assert_eq!(ended, vec![GameEvent::RunEnded { score: 30 }]);
        assert_eq!(state.phase, GamePhase::Results);
    }

    #[test]
    fn test_reset_run_clears_everything() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.spawn_enemy();
        state.projectiles.fire(Vec2::ZERO, Vec2::X);
        state.run.score = 50;
        state.run.lives = 1;
        state.run.saved_this_run = true;
        state.player.pos = Vec2::new(5.0, 5.0);

        state.reset_run();
        assert!(state.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.run, RunState::default());
        assert_eq!(state.player.pos, state.arena.center());
    }

    #[test]
    fn test_reset_run_keeps_pause_and_start_run_clears_it() {
        let mut state = GameState::new(1, SCREEN);
        state.start_run();
        state.set_paused(true);
        state.run.score = 20;

        state.reset_run();
        assert!(state.run.paused);
        assert_eq!(state.run.score, 0);

        state.start_run();
        assert!(!state.run.paused);
    }

    #[test]
    fn test_enemy_visual_follows_texture() {
        let mut state = GameState::new(1, SCREEN);
        assert_eq!(state.enemy_visual(), Visual::ENEMY_SHAPE);
        state.enemy_texture = Some(AssetId(3));
        state.spawn_enemy_at(Vec2::ZERO);
        assert_eq!(state.enemies[0].visual(), Visual::Sprite(AssetId(3)));
    }

    #[test]
    fn test_seeded_spawns_are_deterministic() {
        let mut a = GameState::new(42, SCREEN);
        let mut b = GameState::new(42, SCREEN);
        for _ in 0..5 {
            a.spawn_enemy();
            b.spawn_enemy();
        }
        assert_eq!(a.enemies, b.enemies);
    }
}
