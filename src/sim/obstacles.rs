//! Hazard pool and per-frame stepping.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts;
use crate::lane_x;
use crate::sim::hazard::{HazardKind, HeightProfile};

/// One pooled hazard slot. Slots are never removed; `active` gates reuse.
#[derive(Debug, Clone)]
pub struct Hazard {
    pub kind: HazardKind,
    pub lane: usize,
    pub position: Vec3,
    pub timer: f32,
    pub active: bool,
    /// Current phase lethality; colliding with an inactive phase is free
    pub lethal: bool,
    pub height: HeightProfile,
    /// One-shot side-effect latch (blast, landing)
    exploded: bool,
    /// Stable visual variant for the batched render path
    pub variant: u32,
    /// Accumulated roll for rolling kinds
    pub roll: f32,
}

/// One-shot side effect surfaced out of a phase transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardEvent {
    pub kind: HazardKind,
    pub position: Vec3,
}

#[derive(Debug, Default)]
pub struct ObstacleManager {
    pool: Vec<Hazard>,
}

impl ObstacleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deactivate everything; slots stay allocated for reuse.
    pub fn reset(&mut self) {
        for slot in &mut self.pool {
            slot.active = false;
        }
    }

    /// Claim an inactive slot or grow the pool, then fully re-initialize it.
    /// Stale phase and visual state must never leak across reuse.
    pub fn spawn(&mut self, kind: HazardKind, lane: usize, z: f32, rng: &mut Pcg32) {
        let lane = lane.min(consts::LANE_COUNT - 1);
        let variant = if kind.batched() {
            rng.random_range(0..consts::BOULDER_VARIANTS)
        } else {
            0
        };
        let fresh = Hazard {
            kind,
            lane,
            position: Vec3::new(lane_x(lane), 0.0, z),
            timer: 0.0,
            active: true,
            lethal: kind.starts_lethal(),
            height: kind.height(),
            exploded: false,
            variant,
            roll: 0.0,
        };
        if let Some(slot) = self.pool.iter_mut().find(|slot| !slot.active) {
            *slot = fresh;
        } else {
            self.pool.push(fresh);
        }
    }

    /// Scroll, step phase machines, apply kind-specific motion, recycle
    /// anything outside the playfield. One-shot impacts are appended to
    /// `events` at most once per entity.
    pub fn update(&mut self, dt: f32, speed: f32, events: &mut Vec<HazardEvent>) {
        let travel = speed * dt;
        for slot in &mut self.pool {
            if !slot.active {
                continue;
            }
            slot.position.z -= travel;
            slot.timer += dt;

            match slot.kind {
                HazardKind::Boulder => {
                    slot.roll += dt * 2.4;
                }
                HazardKind::Beast => {
                    slot.position.z += dt * 12.0;
                    slot.position.y = (slot.timer * 15.0).sin() * 0.3;
                }
                HazardKind::Whirlwind => {
                    slot.position.x = lane_x(slot.lane) + (slot.timer * 2.0).sin() * 2.5;
                }
                HazardKind::Arrow => {
                    slot.position.z += dt * 25.0;
                }
                _ => {}
            }

            let step = slot.kind.phase(slot.timer);
            slot.lethal = step.lethal;
            if step.impact && !slot.exploded {
                slot.exploded = true;
                events.push(HazardEvent { kind: slot.kind, position: slot.position });
            }
            if step.done {
                slot.active = false;
                continue;
            }

            if slot.position.z < consts::DESPAWN_BEHIND || slot.position.z > consts::DESPAWN_AHEAD {
                slot.active = false;
            }
        }
    }

    /// Deactivate hazards in the strip (0, range) ahead of the player.
    pub fn clear_ahead(&mut self, range: f32) {
        for slot in &mut self.pool {
            if slot.active && slot.position.z > 0.0 && slot.position.z < range {
                slot.active = false;
            }
        }
    }

    pub fn slots(&self) -> &[Hazard] {
        &self.pool
    }

    pub fn deactivate(&mut self, index: usize) {
        if let Some(slot) = self.pool.get_mut(index) {
            slot.active = false;
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Hazard> {
        self.pool.iter().filter(|slot| slot.active)
    }

    pub fn active_count(&self) -> usize {
        self.pool.iter().filter(|slot| slot.active).count()
    }
}
