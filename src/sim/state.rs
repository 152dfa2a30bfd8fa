//! Shared gameplay state types.

use serde::{Deserialize, Serialize};

use crate::consts;

/// Top-level run status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Over,
}

/// Visual theme; selects the hazard catalog and asset set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Xianxia,
    Minecraft,
}

/// Scenery biome, chosen per chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    City,
    Forest,
    Ocean,
}

/// Active power-up effects. Timed effects store absolute expiry timestamps
/// in milliseconds, compared against the engine's `now_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PowerUpState {
    pub shield: u32,
    pub speed_until: f64,
    pub magnet_until: f64,
    pub has_clear: bool,
    pub coins: u64,
}

impl PowerUpState {
    #[inline]
    pub fn speed_active(&self, now_ms: f64) -> bool {
        self.speed_until > now_ms
    }

    #[inline]
    pub fn magnet_active(&self, now_ms: f64) -> bool {
        self.magnet_until > now_ms
    }

    /// Add one shield charge, saturating at the cap.
    pub fn add_shield(&mut self) {
        self.shield = (self.shield + 1).min(consts::SHIELD_CAP);
    }

    /// Consume one shield charge. Returns true if a charge was available.
    pub fn consume_shield(&mut self) -> bool {
        if self.shield > 0 {
            self.shield -= 1;
            true
        } else {
            false
        }
    }
}

/// Snapshot pushed to the host on a throttled cadence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    pub score: u64,
    pub distance: f32,
    pub speed: f32,
    pub status: GameStatus,
    pub power_ups: PowerUpState,
    pub assets_ready: bool,
}

/// Score is derived, never stored: distance plus coin bonus.
#[inline]
pub fn score(distance: f32, coins: u64) -> u64 {
    (distance * consts::DISTANCE_SCORE).floor().max(0.0) as u64 + coins * consts::COIN_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shield_saturates_at_cap() {
        let mut p = PowerUpState::default();
        for _ in 0..5 {
            p.add_shield();
        }
        assert_eq!(p.shield, consts::SHIELD_CAP);
    }

    #[test]
    fn test_shield_floor_at_zero() {
        let mut p = PowerUpState::default();
        assert!(!p.consume_shield());
        assert_eq!(p.shield, 0);
        p.add_shield();
        assert!(p.consume_shield());
        assert!(!p.consume_shield());
        assert_eq!(p.shield, 0);
    }

    #[test]
    fn test_timers_are_absolute() {
        let mut p = PowerUpState::default();
        p.speed_until = 5000.0;
        assert!(p.speed_active(4999.0));
        assert!(!p.speed_active(5000.0));
        // Overwrite, never extend
        p.speed_until = 6000.0;
        assert!(p.speed_active(5500.0));
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score(0.0, 0), 0);
        assert_eq!(score(10.5, 0), 42);
        assert_eq!(score(10.5, 3), 42 + 75);
    }

    #[test]
    fn test_theme_serde_names() {
        let json = serde_json::to_string(&Theme::Xianxia).unwrap();
        assert_eq!(json, "\"xianxia\"");
        let status: GameStatus = serde_json::from_str("\"over\"").unwrap();
        assert_eq!(status, GameStatus::Over);
    }
}
