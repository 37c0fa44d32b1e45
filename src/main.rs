//! Alien Force entry point
//!
//! No window backend ships with the crate; the binary plays a headless
//! autopilot demo against the configured score store and logs the result.

use std::path::Path;

use alien_force::assets::AssetCatalog;
use alien_force::consts::HEADLESS_DT;
use alien_force::platform::HeadlessPlatform;
use alien_force::store::{ConfigSource, open_store};
use alien_force::{Session, Settings};

fn main() {
    env_logger::init();
    log::info!("Alien Force (headless) starting...");

    let settings = Settings::from_env();
    let assets = AssetCatalog::probe(Path::new("."), &settings.asset_dir);

    let store = open_store(&ConfigSource::File(settings.store_config.clone()));

    let mut platform = HeadlessPlatform::autopilot(settings.window_size(), settings.demo_frames);
    let mut session = Session::new(settings.clone(), store, assets);
    session.load_assets(&mut platform);
    session.run(&mut platform, HEADLESS_DT);

    let state = session.state();
    log::info!(
        "Demo finished after {} frames: phase {:?}, score {}, lives {}",
        platform.frames_presented(),
        state.phase,
        state.run.score,
        state.run.lives
    );
    for (i, row) in session
        .store()
        .top_scores(10, Some(settings.mode.as_str()))
        .iter()
        .enumerate()
    {
        log::info!("{}. {}  {}", i + 1, row.name, row.score);
    }
}
