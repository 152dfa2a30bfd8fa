//! Headless scripted session, useful for smoke-testing the simulation and
//! eyeballing log output without a renderer attached.
//!
//! ```sh
//! RUST_LOG=info cargo run -- 42
//! ```

use glam::Vec3;

use dimension_runner::assets::{AssetError, AssetId, AssetLibrary, AssetSource, PropData};
use dimension_runner::sim::state::{GameStatus, Telemetry};
use dimension_runner::{Engine, EngineHost, Sfx, Theme};

/// Synthetic asset source with fixed bounds per prop class.
struct BuiltinSource;

impl AssetSource for BuiltinSource {
    fn load(&mut self, id: AssetId) -> Result<PropData, AssetError> {
        let bounding_radius = match id {
            AssetId::Player => 0.9,
            AssetId::Track => 12.0,
            AssetId::Hazard(_) => 1.1,
            AssetId::Pickup(_) => 0.55,
            AssetId::Scenery(_) => 4.0,
        };
        Ok(PropData { bounding_radius })
    }
}

/// Logs host callbacks instead of rendering them.
struct ConsoleHost {
    last_stats: Option<Telemetry>,
}

impl EngineHost for ConsoleHost {
    fn camera_position(&self) -> Vec3 {
        Vec3::new(0.0, 3.5, -7.0)
    }

    fn play_sfx(&mut self, sfx: Sfx) {
        log::debug!("sfx: {sfx:?}");
    }

    fn play_bgm(&mut self, theme: Theme) {
        log::info!("bgm started for {theme:?}");
    }

    fn stop_bgm(&mut self) {
        log::info!("bgm stopped");
    }

    fn screen_shake(&mut self, intensity: f32) {
        log::debug!("screen shake {intensity:.1}");
    }

    fn push_stats(&mut self, stats: &Telemetry) {
        self.last_stats = Some(*stats);
    }

    fn status_changed(&mut self, status: GameStatus) {
        log::info!("status: {status:?}");
    }
}

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42u64);
    log::info!("running scripted session with seed {seed}");

    let mut engine = Engine::new(seed);
    let mut host = ConsoleHost { last_stats: None };

    let mut library = AssetLibrary::new();
    let token = library.begin_preload(Theme::Xianxia);
    library.complete_preload(token, &mut BuiltinSource);
    engine.set_assets_ready(library.is_ready(engine.theme()));
    engine.start(&mut host);

    let dt = 1.0 / 60.0;
    let mut now_ms = 0.0;
    for frame in 0u64.. {
        now_ms += dt as f64 * 1000.0;

        // Canned evasive inputs
        match frame % 240 {
            0 => engine.move_lane(1),
            60 => engine.jump(),
            120 => engine.move_lane(-1),
            180 => engine.crouch(),
            _ => {}
        }

        engine.update(dt, now_ms, &mut host);
        if engine.status() == GameStatus::Over || now_ms > 120_000.0 {
            break;
        }
    }

    let stats = engine.telemetry();
    log::info!(
        "run finished: score {} distance {:.0} status {:?}",
        stats.score,
        stats.distance,
        stats.status
    );
    if let Ok(json) = serde_json::to_string_pretty(&stats) {
        println!("{json}");
    }
}
