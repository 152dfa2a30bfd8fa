//! Lightning storm event, triggered by the storm pickup.
//!
//! While active the storm drops telegraphed strikes ahead of the player.
//! Each strike warns for a fixed delay while riding the track toward the
//! player, then lands and reports a hit if the player is inside its
//! footprint. Re-triggering while active extends the remaining duration.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts;
use crate::lane_x;

const STRIKE_DELAY: f32 = 1.5;
const DEFAULT_DURATION: f32 = 15.0;
const COOLDOWN: f32 = 2.0;
const HIT_DX: f32 = 1.0;
const HIT_DZ: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StormState {
    Inactive,
    Active,
    Cooldown,
}

#[derive(Debug, Clone, Copy)]
pub struct Strike {
    pub x: f32,
    pub z: f32,
    pub timer: f32,
}

#[derive(Debug)]
pub struct StormManager {
    state: StormState,
    duration: f32,
    strike_timer: f32,
    cooldown: f32,
    strikes: Vec<Strike>,
}

impl Default for StormManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StormManager {
    pub fn new() -> Self {
        Self {
            state: StormState::Inactive,
            duration: 0.0,
            strike_timer: 0.0,
            cooldown: 0.0,
            strikes: Vec::new(),
        }
    }

    pub fn state(&self) -> StormState {
        self.state
    }

    pub fn strikes(&self) -> &[Strike] {
        &self.strikes
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Start the storm, or extend it when already raging.
    pub fn trigger(&mut self) {
        self.trigger_for(DEFAULT_DURATION);
    }

    pub fn trigger_for(&mut self, duration: f32) {
        if self.state == StormState::Active {
            self.duration += duration;
            return;
        }
        self.state = StormState::Active;
        self.duration = duration;
        self.strike_timer = 0.0;
    }

    /// Advance the storm. Returns how many strikes landed on the player this
    /// frame; the caller resolves them like hazard hits.
    pub fn update(&mut self, dt: f32, speed: f32, player_pos: Vec3, rng: &mut Pcg32) -> u32 {
        match self.state {
            StormState::Inactive => {
                if self.strikes.is_empty() {
                    return 0;
                }
            }
            StormState::Active => {
                self.duration -= dt;
                if self.duration <= 0.0 {
                    self.state = StormState::Cooldown;
                    self.cooldown = COOLDOWN;
                } else {
                    self.strike_timer -= dt;
                    if self.strike_timer <= 0.0 {
                        self.spawn_warning(speed, player_pos, rng);
                        self.strike_timer = 0.8 + rng.random::<f32>() * 1.2;
                    }
                }
            }
            StormState::Cooldown => {
                self.cooldown -= dt;
                if self.cooldown <= 0.0 && self.strikes.is_empty() {
                    self.state = StormState::Inactive;
                }
            }
        }

        // Pending strikes keep resolving through cooldown
        let travel = speed * dt;
        let mut hits = 0;
        self.strikes.retain_mut(|strike| {
            strike.z += travel;
            strike.timer -= dt;
            if strike.timer > 0.0 {
                return true;
            }
            let dx = (strike.x - player_pos.x).abs();
            let dz = (strike.z - player_pos.z).abs();
            if dx < HIT_DX && dz < HIT_DZ {
                hits += 1;
            }
            false
        });
        hits
    }

    /// Place a warning that reaches the player roughly when its delay ends.
    /// Half the time it targets the player's own lane to force a move.
    fn spawn_warning(&mut self, speed: f32, player_pos: Vec3, rng: &mut Pcg32) {
        let mut x = lane_x(rng.random_range(0..consts::LANE_COUNT));
        if rng.random_bool(0.5) {
            let nearest = ((player_pos.x + 2.0) / 2.0).round().clamp(0.0, 2.0) as usize;
            x = lane_x(nearest);
        }
        self.strikes.push(Strike {
            x,
            z: player_pos.z - speed * STRIKE_DELAY,
            timer: STRIKE_DELAY,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(21)
    }

    #[test]
    fn test_trigger_is_additive_while_active() {
        let mut storm = StormManager::new();
        storm.trigger();
        assert_eq!(storm.state(), StormState::Active);
        storm.trigger();
        // Two triggers outlast a single duration
        let mut rng = rng();
        let mut elapsed = 0.0;
        while storm.state() == StormState::Active && elapsed < 60.0 {
            storm.update(0.1, 12.0, Vec3::new(0.0, 0.9, 0.0), &mut rng);
            elapsed += 0.1;
        }
        assert!(elapsed > DEFAULT_DURATION + 10.0);
    }

    #[test]
    fn test_storm_winds_down_to_inactive() {
        let mut storm = StormManager::new();
        storm.trigger_for(1.0);
        let mut rng = rng();
        for _ in 0..200 {
            storm.update(0.05, 12.0, Vec3::new(0.0, 0.9, 0.0), &mut rng);
        }
        assert_eq!(storm.state(), StormState::Inactive);
        assert!(storm.strikes().is_empty());
    }

    #[test]
    fn test_strike_lands_on_player() {
        let mut storm = StormManager::new();
        storm.strikes.push(Strike { x: 0.0, z: -18.0, timer: STRIKE_DELAY });
        let mut rng = rng();
        let player = Vec3::new(0.0, 0.9, 0.0);
        let mut hits = 0;
        // Rides the track at 12 u/s; after 1.5s it is at z = 0
        for _ in 0..40 {
            hits += storm.update(0.05, 12.0, player, &mut rng);
        }
        assert_eq!(hits, 1);
        assert!(storm.strikes().is_empty());
    }

    #[test]
    fn test_strike_misses_other_lane() {
        let mut storm = StormManager::new();
        storm.strikes.push(Strike { x: lane_x(2), z: -18.0, timer: STRIKE_DELAY });
        let mut rng = rng();
        let player = Vec3::new(lane_x(0), 0.9, 0.0);
        let mut hits = 0;
        for _ in 0..40 {
            hits += storm.update(0.05, 12.0, player, &mut rng);
        }
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_active_storm_spawns_warnings() {
        let mut storm = StormManager::new();
        storm.trigger();
        let mut rng = rng();
        storm.update(0.05, 12.0, Vec3::new(0.0, 0.9, 0.0), &mut rng);
        assert!(!storm.strikes().is_empty());
        for strike in storm.strikes() {
            let lane_xs = [lane_x(0), lane_x(1), lane_x(2)];
            assert!(lane_xs.iter().any(|lx| (strike.x - lx).abs() < 1e-6));
        }
    }
}
