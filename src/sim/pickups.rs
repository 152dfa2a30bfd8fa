//! Pickup pools: power-ups and coins.
//!
//! Coins get a dedicated capacity-bounded pool so a generous generator can
//! never balloon memory; over-capacity spawns are dropped. Collection uses a
//! bounding-sphere approximation fixed per kind at spawn.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts;
use crate::{lane_x, lerp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupKind {
    Shield,
    Speed,
    Clear,
    Magnet,
    Storm,
    Coin,
}

impl PickupKind {
    /// Bounding sphere radius, fixed per kind rather than re-measured
    /// every frame.
    fn hit_radius(self) -> f32 {
        match self {
            PickupKind::Coin => 0.4,
            _ => 0.55,
        }
    }

    /// Vertical offset of the bounding sphere center from the entity origin.
    fn hit_offset_y(self) -> f32 {
        match self {
            PickupKind::Coin => 0.4,
            _ => 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    pub lane: usize,
    pub position: Vec3,
    pub timer: f32,
    pub spin: f32,
    pub active: bool,
    pub hit_radius: f32,
    pub hit_offset_y: f32,
}

impl Pickup {
    fn init(&mut self, kind: PickupKind, lane: usize, z: f32) {
        self.kind = kind;
        self.lane = lane;
        self.position = Vec3::new(lane_x(lane), 0.0, z);
        self.timer = 0.0;
        self.spin = 0.0;
        self.active = true;
        self.hit_radius = kind.hit_radius();
        self.hit_offset_y = kind.hit_offset_y();
    }
}

#[derive(Debug, Default)]
pub struct PickupManager {
    power_ups: Vec<Pickup>,
    coins: Vec<Pickup>,
}

fn claim(pool: &mut Vec<Pickup>, cap: Option<usize>) -> Option<&mut Pickup> {
    if let Some(index) = pool.iter().position(|slot| !slot.active) {
        return pool.get_mut(index);
    }
    if let Some(cap) = cap {
        if pool.len() >= cap {
            return None;
        }
    }
    pool.push(Pickup {
        kind: PickupKind::Coin,
        lane: 0,
        position: Vec3::ZERO,
        timer: 0.0,
        spin: 0.0,
        active: false,
        hit_radius: 0.0,
        hit_offset_y: 0.0,
    });
    pool.last_mut()
}

impl PickupManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        for slot in self.power_ups.iter_mut().chain(self.coins.iter_mut()) {
            slot.active = false;
        }
    }

    pub fn spawn(&mut self, kind: PickupKind, lane: usize, z: f32) {
        if kind == PickupKind::Coin {
            self.spawn_coin(lane, z);
            return;
        }
        if let Some(slot) = claim(&mut self.power_ups, None) {
            slot.init(kind, lane.min(consts::LANE_COUNT - 1), z);
        }
    }

    /// Silent no-op when the coin pool is at capacity.
    pub fn spawn_coin(&mut self, lane: usize, z: f32) {
        match claim(&mut self.coins, Some(consts::COIN_CAPACITY)) {
            Some(slot) => slot.init(PickupKind::Coin, lane.min(consts::LANE_COUNT - 1), z),
            None => log::debug!("coin pool saturated, dropping spawn"),
        }
    }

    /// Scroll, spin and bob everything; while the magnet is active coins are
    /// pulled toward the player's x and gain extra backward drift, a bounded
    /// velocity bias rather than a teleport.
    pub fn update(&mut self, dt: f32, speed: f32, magnet_active: bool, player_x: f32) {
        let travel = speed * dt;
        for slot in self.power_ups.iter_mut().chain(self.coins.iter_mut()) {
            if !slot.active {
                continue;
            }
            slot.timer += dt;
            slot.spin += dt * 1.4;
            slot.position.z -= travel;
            slot.position.y = 0.4 + (slot.timer * 3.0).sin() * 0.1;

            if magnet_active && slot.kind == PickupKind::Coin {
                slot.position.x = lerp(slot.position.x, player_x, (dt * 6.0).min(1.0));
                slot.position.z -= travel * 0.8;
            }

            // Trailing cutoff applies even to attracted coins
            if slot.position.z < consts::DESPAWN_BEHIND {
                slot.active = false;
            }
        }
    }

    /// Sphere-test everything against the player and deactivate matches.
    /// Returns the collected kinds in pool order.
    pub fn collect(&mut self, player_pos: Vec3, player_radius: f32) -> Vec<PickupKind> {
        let mut collected = Vec::new();
        for slot in self.power_ups.iter_mut().chain(self.coins.iter_mut()) {
            if !slot.active {
                continue;
            }
            // Sphere center rides the bob
            let center = slot.position + Vec3::new(0.0, slot.hit_offset_y, 0.0);
            let reach = slot.hit_radius + player_radius + consts::PICKUP_MARGIN;
            if center.distance_squared(player_pos) <= reach * reach {
                slot.active = false;
                collected.push(slot.kind);
            }
        }
        collected
    }

    pub fn active_coins(&self) -> usize {
        self.coins.iter().filter(|slot| slot.active).count()
    }

    pub fn active(&self) -> impl Iterator<Item = &Pickup> {
        self.power_ups
            .iter()
            .chain(self.coins.iter())
            .filter(|slot| slot.active)
    }

    #[cfg(test)]
    fn coin_positions(&self) -> Vec<Vec3> {
        self.coins
            .iter()
            .filter(|slot| slot.active)
            .map(|slot| slot.position)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_coin_pool_cap_drops_silently() {
        let mut mgr = PickupManager::new();
        for i in 0..200 {
            mgr.spawn_coin(i % 3, 30.0 + i as f32);
        }
        assert_eq!(mgr.active_coins(), consts::COIN_CAPACITY);
    }

    #[test]
    fn test_coin_slots_recycle_after_despawn() {
        let mut mgr = PickupManager::new();
        for _ in 0..consts::COIN_CAPACITY {
            mgr.spawn_coin(1, 5.0);
        }
        // Scroll everything behind the cutoff
        mgr.update(2.0, 20.0, false, 0.0);
        assert_eq!(mgr.active_coins(), 0);
        mgr.spawn_coin(0, 40.0);
        assert_eq!(mgr.active_coins(), 1);
    }

    #[test]
    fn test_magnet_only_attracts_coins() {
        let mut mgr = PickupManager::new();
        mgr.spawn(PickupKind::Shield, 0, 20.0);
        mgr.spawn_coin(0, 20.0);
        mgr.update(0.1, 10.0, true, 2.0);

        let shield = mgr.active().find(|p| p.kind == PickupKind::Shield).unwrap();
        let coin = mgr.active().find(|p| p.kind == PickupKind::Coin).unwrap();
        assert_eq!(shield.position.x, lane_x(0));
        assert!(coin.position.x > lane_x(0));
        // Extra backward drift on the coin only
        assert!(coin.position.z < shield.position.z);
    }

    #[test]
    fn test_magnet_attraction_is_bounded() {
        let mut mgr = PickupManager::new();
        mgr.spawn_coin(0, 20.0);
        let player_x = lane_x(2);
        let mut last_x = lane_x(0);
        for _ in 0..60 {
            mgr.update(0.016, 0.0, true, player_x);
            let positions = mgr.coin_positions();
            let x = positions[0].x;
            // Monotonic approach, never past the target
            assert!(x >= last_x);
            assert!(x <= player_x + 1e-4);
            last_x = x;
        }
        assert!((last_x - player_x).abs() < 0.1);
    }

    #[test]
    fn test_attracted_coin_still_despawns_behind() {
        let mut mgr = PickupManager::new();
        mgr.spawn_coin(1, 1.0);
        // 1.8x scroll under magnet pushes it past the cutoff
        mgr.update(1.0, 15.0, true, 0.0);
        assert_eq!(mgr.active_coins(), 0);
    }

    #[test]
    fn test_collect_sphere_test() {
        let mut mgr = PickupManager::new();
        mgr.spawn(PickupKind::Speed, 1, 0.2);
        mgr.spawn(PickupKind::Magnet, 1, 5.0);
        let player = Vec3::new(0.0, consts::AVATAR_BASE_Y, 0.0);
        let got = mgr.collect(player, consts::AVATAR_RADIUS);
        assert_eq!(got, vec![PickupKind::Speed]);
        // Collected pickup is gone
        assert!(mgr.collect(player, consts::AVATAR_RADIUS).is_empty());
    }

    #[test]
    fn test_hit_sphere_follows_bob() {
        let mut mgr = PickupManager::new();
        mgr.spawn_coin(1, 0.0);
        mgr.update(0.016, 0.0, false, 0.0);
        let coin = mgr.active().next().unwrap();
        // Bob has lifted the coin off the ground
        assert!(coin.position.y > 0.3);
        let center_y = coin.position.y + coin.hit_offset_y;

        // A pick just above the bobbed center reaches it, which it could
        // not if the center ignored position.y
        let player = Vec3::new(0.0, center_y + 0.45, 0.0);
        let got = mgr.collect(player, 0.01);
        assert_eq!(got, vec![PickupKind::Coin]);
    }

    proptest! {
        #[test]
        fn prop_coin_pool_bounded(spawns in 1usize..400) {
            let mut mgr = PickupManager::new();
            for i in 0..spawns {
                mgr.spawn_coin(i % 3, 10.0);
            }
            prop_assert!(mgr.active_coins() <= consts::COIN_CAPACITY);
        }
    }
}
