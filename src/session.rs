//! A running game: simulation, score store and platform wired together
//!
//! Per frame: poll input, tick, handle events (store write on run end),
//! build the scene, present.

use crate::assets::AssetCatalog;
use crate::consts::RESULTS_BOARD_SIZE;
use crate::platform::Platform;
use crate::scene::Scene;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, tick};
use crate::store::{Clock, ScoreRow, ScoreStore, SystemClock};

pub struct Session {
    state: GameState,
    store: Box<dyn ScoreStore>,
    settings: Settings,
    assets: AssetCatalog,
    /// Leaderboard fetched when the last run ended
    board: Vec<ScoreRow>,
    clock: Box<dyn Clock>,
    runs_submitted: u32,
}

impl Session {
    pub fn new(settings: Settings, store: Box<dyn ScoreStore>, assets: AssetCatalog) -> Self {
        let seed = settings.resolve_seed();
        log::info!("Session seed {seed}");
        let mut state = GameState::new(seed, settings.window_size());
        state.enemy_texture = assets.enemy_texture_id();
        Self {
            state,
            store,
            settings,
            assets,
            board: Vec::new(),
            clock: Box::new(SystemClock),
            runs_submitted: 0,
        }
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Let the platform decode every probed asset; failures fall back
    pub fn load_assets<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        let failed: Vec<_> = self
            .assets
            .assets()
            .filter(|a| !platform.load_asset(a))
            .map(|a| a.kind)
            .collect();
        for kind in failed {
            self.assets.mark_failed(kind);
        }
        self.state.enemy_texture = self.assets.enemy_texture_id();
    }

    /// Run one frame against `platform`
    pub fn frame<P: Platform + ?Sized>(&mut self, platform: &mut P, raw_dt: f32) {
        self.state.set_arena_size(platform.window_size());
        let input = platform.poll_input();
        tick(&mut self.state, &input, raw_dt);
        self.handle_events();

        if self.state.should_quit() {
            platform.close();
            return;
        }

        let scene = Scene::build(&self.state, &self.assets, &self.board, self.clock.now_epoch_seconds());
        platform.present(&scene);
    }

    /// Drive frames at a fixed step until the platform closes or the game quits
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P, dt: f32) {
        while platform.is_open() && !self.state.should_quit() {
            self.frame(platform, dt);
        }
    }

    fn handle_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::RunEnded { score } => self.submit_score(score),
                GameEvent::RunStarted => self.board.clear(),
                GameEvent::PlayerHit { lives_left } => log::debug!("hit, {lives_left} lives left"),
                GameEvent::Paused => log::debug!("paused"),
                GameEvent::Resumed => log::debug!("resumed"),
                GameEvent::QuitRequested => log::info!("quit requested"),
                GameEvent::EnemyKilled { .. } => {}
            }
        }
    }

    fn submit_score(&mut self, score: u32) {
        let mode = Some(self.settings.mode.as_str());
        match self
            .store
            .upsert_player_score(&self.settings.player_name, score, mode)
        {
            Ok(()) => log::info!("[DB] score saved"),
            Err(e) => log::warn!("[DB] save failed: {e}"),
        }
        self.runs_submitted += 1;
        self.board = self.store.top_scores(RESULTS_BOARD_SIZE, mode);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn board(&self) -> &[ScoreRow] {
        &self.board
    }

    pub fn assets(&self) -> &AssetCatalog {
        &self.assets
    }

    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Store submissions attempted this session
    pub fn runs_submitted(&self) -> u32 {
        self.runs_submitted
    }
}
