//! Decorative trackside props.
//!
//! Scenery never participates in collision. It scrolls at a parallax
//! fraction of world speed and culls itself against the camera with a
//! two-threshold hysteresis so props do not flicker at the boundary.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::sim::state::Biome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneryKind {
    Tower,
    Lantern,
    Pine,
    Shrine,
    Coral,
    Kelp,
}

impl SceneryKind {
    fn for_biome(biome: Biome) -> &'static [SceneryKind] {
        match biome {
            Biome::City => &[SceneryKind::Tower, SceneryKind::Lantern],
            Biome::Forest => &[SceneryKind::Pine, SceneryKind::Shrine],
            Biome::Ocean => &[SceneryKind::Coral, SceneryKind::Kelp],
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneryProp {
    pub kind: SceneryKind,
    pub position: Vec3,
    pub yaw: f32,
    pub visible: bool,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct SceneryManager {
    pool: Vec<SceneryProp>,
}

impl SceneryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        for slot in &mut self.pool {
            slot.active = false;
            slot.visible = false;
        }
    }

    /// Place a prop beside the track at `z`. The biome is supplied by the
    /// generator per call; the manager holds no biome state of its own.
    pub fn spawn(&mut self, z: f32, biome: Biome, rng: &mut Pcg32) {
        let kinds = SceneryKind::for_biome(biome);
        let kind = kinds[rng.random_range(0..kinds.len())];
        let side = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        let jitter = (rng.random::<f32>() - 0.5) * 1.5;
        let yaw = rng.random::<f32>() * std::f32::consts::TAU;
        let fresh = SceneryProp {
            kind,
            position: Vec3::new(consts::SCENERY_SIDE * side + jitter, 0.0, z),
            yaw,
            visible: true,
            active: true,
        };
        if let Some(slot) = self.pool.iter_mut().find(|slot| !slot.active) {
            *slot = fresh;
        } else {
            self.pool.push(fresh);
        }
    }

    pub fn update(&mut self, dt: f32, speed: f32, camera_pos: Vec3) {
        let travel = speed * dt * consts::SCENERY_PARALLAX;
        for slot in &mut self.pool {
            if !slot.active {
                continue;
            }
            slot.position.z -= travel;
            if slot.position.z < consts::SCENERY_DESPAWN {
                slot.active = false;
                slot.visible = false;
                continue;
            }
            let distance = slot.position.distance(camera_pos);
            if slot.visible && distance > consts::SCENERY_HIDE_DISTANCE {
                slot.visible = false;
            } else if !slot.visible && distance < consts::SCENERY_SHOW_DISTANCE {
                slot.visible = true;
            }
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &SceneryProp> {
        self.pool.iter().filter(|slot| slot.active)
    }

    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|slot| slot.active).count()
    }
}
