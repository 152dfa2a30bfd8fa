//! Game loop: owns every manager, the run RNG, chunk scheduling, collision
//! resolution and the external command surface.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts;
use crate::host::{EngineHost, Sfx};
use crate::sim::avatar::AvatarController;
use crate::sim::hazard::{HazardKind, HeightProfile};
use crate::sim::obstacles::{HazardEvent, ObstacleManager};
use crate::sim::pickups::{PickupKind, PickupManager};
use crate::sim::scenery::SceneryManager;
use crate::sim::state::{self, Biome, GameStatus, PowerUpState, Telemetry, Theme};
use crate::sim::storm::StormManager;
use crate::sim::track::TrackManager;

/// Power-up kinds eligible for the per-chunk bonus roll.
const BONUS_KINDS: [PickupKind; 5] = [
    PickupKind::Shield,
    PickupKind::Speed,
    PickupKind::Clear,
    PickupKind::Magnet,
    PickupKind::Storm,
];

pub struct Engine {
    status: GameStatus,
    theme: Theme,
    assets_ready: bool,
    seed: u64,
    rng: Pcg32,

    distance: f32,
    speed: f32,
    power_ups: PowerUpState,
    next_chunk_index: u64,

    avatar: AvatarController,
    track: TrackManager,
    obstacles: ObstacleManager,
    pickups: PickupManager,
    scenery: SceneryManager,
    storm: StormManager,

    last_emit_ms: f64,
    // Scratch buffer reused across frames
    events: Vec<HazardEvent>,
}

impl Engine {
    pub fn new(seed: u64) -> Self {
        Self {
            status: GameStatus::Idle,
            theme: Theme::default(),
            assets_ready: false,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            distance: 0.0,
            speed: consts::BASE_SPEED,
            power_ups: PowerUpState::default(),
            next_chunk_index: 0,
            avatar: AvatarController::new(),
            track: TrackManager::new(),
            obstacles: ObstacleManager::new(),
            pickups: PickupManager::new(),
            scenery: SceneryManager::new(),
            storm: StormManager::new(),
            last_emit_ms: 0.0,
            events: Vec::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn score(&self) -> u64 {
        state::score(self.distance, self.power_ups.coins)
    }

    pub fn power_ups(&self) -> &PowerUpState {
        &self.power_ups
    }

    pub fn assets_ready(&self) -> bool {
        self.assets_ready
    }

    /// Flipped by the asset layer when a preload generation completes.
    pub fn set_assets_ready(&mut self, ready: bool) {
        self.assets_ready = ready;
    }

    pub fn avatar(&self) -> &AvatarController {
        &self.avatar
    }

    pub fn obstacles(&self) -> &ObstacleManager {
        &self.obstacles
    }

    pub fn pickups(&self) -> &PickupManager {
        &self.pickups
    }

    pub fn scenery(&self) -> &SceneryManager {
        &self.scenery
    }

    pub fn track(&self) -> &TrackManager {
        &self.track
    }

    pub fn storm(&self) -> &StormManager {
        &self.storm
    }

    // ----- command surface -----

    /// No-op while already running or before assets are ready.
    pub fn start<H: EngineHost>(&mut self, host: &mut H) {
        if self.status == GameStatus::Running || !self.assets_ready {
            return;
        }
        host.play_bgm(self.theme);
        self.set_status(GameStatus::Running, host);
        self.reset_world();
    }

    pub fn pause<H: EngineHost>(&mut self, host: &mut H) {
        if self.status != GameStatus::Running {
            return;
        }
        host.stop_bgm();
        self.set_status(GameStatus::Paused, host);
    }

    pub fn resume<H: EngineHost>(&mut self, host: &mut H) {
        if self.status != GameStatus::Paused {
            return;
        }
        host.play_bgm(self.theme);
        self.set_status(GameStatus::Running, host);
    }

    pub fn reset<H: EngineHost>(&mut self, host: &mut H) {
        host.stop_bgm();
        self.set_status(GameStatus::Idle, host);
        self.reset_world();
    }

    pub fn stop<H: EngineHost>(&mut self, host: &mut H) {
        if self.status == GameStatus::Over {
            return;
        }
        host.stop_bgm();
        self.set_status(GameStatus::Over, host);
    }

    /// Force idle, wipe the old theme's world and invalidate assets; the
    /// asset layer reloads the theme set and flips `assets_ready` back when
    /// its generation completes. Generation restarts at chunk zero so
    /// nothing from the previous catalog survives the switch.
    pub fn set_theme<H: EngineHost>(&mut self, theme: Theme, host: &mut H) {
        host.stop_bgm();
        self.set_status(GameStatus::Idle, host);
        self.theme = theme;
        self.assets_ready = false;
        self.clear_world();
        log::info!("theme switched to {theme:?}, awaiting asset reload");
    }

    /// Consume the stored clear and wipe hazards in the strip ahead.
    pub fn trigger_clear<H: EngineHost>(&mut self, host: &mut H) {
        if !self.power_ups.has_clear {
            return;
        }
        self.power_ups.has_clear = false;
        self.obstacles.clear_ahead(consts::CLEAR_RANGE);
        host.play_sfx(Sfx::Clear);
    }

    // ----- input -----

    pub fn move_lane(&mut self, delta: i32) {
        if self.status == GameStatus::Running {
            self.avatar.move_lane(delta);
        }
    }

    pub fn jump(&mut self) {
        if self.status == GameStatus::Running {
            self.avatar.jump();
        }
    }

    pub fn crouch(&mut self) {
        if self.status == GameStatus::Running {
            self.avatar.crouch();
        }
    }

    // ----- per-frame -----

    pub fn update<H: EngineHost>(&mut self, dt: f32, now_ms: f64, host: &mut H) {
        if self.status != GameStatus::Running {
            return;
        }

        self.distance += self.speed * dt;
        let boost = if self.power_ups.speed_active(now_ms) {
            consts::SPEED_BOOST
        } else {
            0.0
        };
        self.speed = consts::BASE_SPEED + self.distance * consts::DIFFICULTY_COEFF + boost;

        self.avatar.update(dt);
        self.track.update(dt, self.speed);

        self.events.clear();
        self.obstacles.update(dt, self.speed, &mut self.events);
        for event in self.events.drain(..) {
            log::debug!("{:?} impact at z={:.1}", event.kind, event.position.z);
            host.play_sfx(Sfx::Explosion);
            host.screen_shake(3.0);
        }

        self.scenery.update(dt, self.speed, host.camera_position());

        let storm_hits =
            self.storm
                .update(dt, self.speed, self.avatar.position(), &mut self.rng);

        let magnet = self.power_ups.magnet_active(now_ms);
        let player_x = self.avatar.position().x;
        self.pickups.update(dt, self.speed, magnet, player_x);

        self.schedule_chunks();
        self.resolve_hazard_hit(host);
        for _ in 0..storm_hits {
            if self.status != GameStatus::Running {
                break;
            }
            self.take_hit(None, host);
        }
        self.collect_pickups(now_ms, host);
        self.expire_timers(now_ms);

        if now_ms - self.last_emit_ms > consts::TELEMETRY_INTERVAL_MS {
            self.last_emit_ms = now_ms;
            host.push_stats(&self.telemetry());
        }
    }

    pub fn telemetry(&self) -> Telemetry {
        Telemetry {
            score: self.score(),
            distance: self.distance,
            speed: self.speed,
            status: self.status,
            power_ups: self.power_ups,
            assets_ready: self.assets_ready,
        }
    }

    // ----- internals -----

    fn set_status<H: EngineHost>(&mut self, status: GameStatus, host: &mut H) {
        if self.status != status {
            self.status = status;
            host.status_changed(status);
        }
    }

    /// Empty every pool and rewind counters without spawning anything.
    fn clear_world(&mut self) {
        self.distance = 0.0;
        self.speed = consts::BASE_SPEED;
        self.power_ups = PowerUpState::default();
        self.next_chunk_index = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.avatar.reset();
        self.track.reset();
        self.obstacles.reset();
        self.pickups.reset();
        self.scenery.reset();
        self.storm.reset();
    }

    fn reset_world(&mut self) {
        self.clear_world();
        for _ in 0..consts::CHUNKS_AHEAD {
            let index = self.next_chunk_index;
            self.spawn_chunk(index);
            self.next_chunk_index += 1;
        }
    }

    /// Keep generation ahead of travel. Chunk indices are strictly
    /// increasing; nothing is ever generated twice.
    fn schedule_chunks(&mut self) {
        let current = (self.distance / consts::CHUNK_LENGTH).floor() as u64;
        while self.next_chunk_index <= current + consts::CHUNKS_AHEAD {
            let index = self.next_chunk_index;
            self.spawn_chunk(index);
            self.next_chunk_index += 1;
        }
    }

    fn spawn_chunk(&mut self, index: u64) {
        let base_z = index as f32 * consts::CHUNK_LENGTH - self.distance;
        let difficulty = (index as f32 * 0.04).min(0.7);

        let catalog = HazardKind::catalog(self.theme);
        let count = (2 + index / 2).min(7);
        for _ in 0..count {
            let lane = self.rng.random_range(0..consts::LANE_COUNT);
            let kind = catalog[self.rng.random_range(0..catalog.len())];
            let z = base_z + 12.0 + self.rng.random::<f32>() * (consts::CHUNK_LENGTH - 24.0);
            self.obstacles.spawn(kind, lane, z, &mut self.rng);
        }

        if self.rng.random::<f32>() < 0.55 + difficulty {
            let kind = BONUS_KINDS[self.rng.random_range(0..BONUS_KINDS.len())];
            let lane = self.rng.random_range(0..consts::LANE_COUNT);
            let z = base_z + 18.0 + self.rng.random::<f32>() * (consts::CHUNK_LENGTH - 36.0);
            self.pickups.spawn(kind, lane, z);
        }

        let coin_lane = self.rng.random_range(0..consts::LANE_COUNT);
        let coin_start = base_z + 10.0 + self.rng.random::<f32>() * 40.0;
        for i in 0..4 {
            self.pickups.spawn_coin(coin_lane, coin_start + i as f32 * 3.5);
        }

        let biome = match self.rng.random_range(0..3u8) {
            0 => Biome::City,
            1 => Biome::Forest,
            _ => Biome::Ocean,
        };
        let scenery_count = if self.rng.random::<f32>() < 0.6 { 1 } else { 2 };
        for _ in 0..scenery_count {
            let z = base_z + 12.0 + self.rng.random::<f32>() * (consts::CHUNK_LENGTH - 24.0);
            self.scenery.spawn(z, biome, &mut self.rng);
        }
    }

    /// At most one hazard resolves per frame.
    fn resolve_hazard_hit<H: EngineHost>(&mut self, host: &mut H) {
        let lane = self.avatar.lane();
        let airborne = self.avatar.is_airborne();
        let crouching = self.avatar.is_crouching();

        let mut hit = None;
        for (index, hazard) in self.obstacles.slots().iter().enumerate() {
            if !hazard.active || !hazard.lethal {
                continue;
            }
            if hazard.lane != lane {
                continue;
            }
            if hazard.position.z.abs() > consts::HIT_WINDOW {
                continue;
            }
            if hazard.height == HeightProfile::Low && airborne {
                continue;
            }
            if hazard.height == HeightProfile::High && crouching {
                continue;
            }
            hit = Some(index);
            break;
        }
        if let Some(index) = hit {
            self.take_hit(Some(index), host);
        }
    }

    /// Shield absorbs first; otherwise the run ends.
    fn take_hit<H: EngineHost>(&mut self, hazard_index: Option<usize>, host: &mut H) {
        if self.power_ups.consume_shield() {
            if let Some(index) = hazard_index {
                self.obstacles.deactivate(index);
            }
            host.play_sfx(Sfx::PowerUp);
            host.screen_shake(2.0);
        } else {
            host.play_sfx(Sfx::Hit);
            host.screen_shake(5.0);
            host.stop_bgm();
            self.set_status(GameStatus::Over, host);
        }
    }

    fn collect_pickups<H: EngineHost>(&mut self, now_ms: f64, host: &mut H) {
        let collected = self
            .pickups
            .collect(self.avatar.position(), self.avatar.collision_radius());
        for kind in collected {
            match kind {
                PickupKind::Shield => self.power_ups.add_shield(),
                PickupKind::Speed => {
                    self.power_ups.speed_until = now_ms + consts::SPEED_BOOST_MS;
                }
                PickupKind::Magnet => {
                    self.power_ups.magnet_until = now_ms + consts::MAGNET_MS;
                }
                PickupKind::Clear => self.power_ups.has_clear = true,
                PickupKind::Storm => {
                    self.storm.trigger();
                    host.play_sfx(Sfx::Explosion);
                    host.screen_shake(5.0);
                }
                PickupKind::Coin => self.power_ups.coins += 1,
            }
            host.play_sfx(if kind == PickupKind::Coin {
                Sfx::Collect
            } else {
                Sfx::PowerUp
            });
        }
    }

    fn expire_timers(&mut self, now_ms: f64) {
        if self.power_ups.speed_until > 0.0 && self.power_ups.speed_until <= now_ms {
            self.power_ups.speed_until = 0.0;
        }
        if self.power_ups.magnet_until > 0.0 && self.power_ups.magnet_until <= now_ms {
            self.power_ups.magnet_until = 0.0;
        }
    }
}
