//! Render quality presets derived from device capability signals.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Low,
    Medium,
    High,
}

/// Raw capability signals from the embedding environment. Memory is in
/// gigabytes; unknown signals default optimistic (8 GB / 8 cores).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualitySignals {
    pub device_memory: Option<f32>,
    pub cores: Option<u32>,
    pub width: u32,
    pub height: u32,
}

impl QualitySignals {
    pub fn resolve(&self) -> QualityLevel {
        let memory = self.device_memory.unwrap_or(8.0);
        let cores = self.cores.unwrap_or(8);
        let min_side = self.width.min(self.height);

        if memory <= 4.0 || cores <= 4 || min_side < 720 {
            QualityLevel::Low
        } else if memory <= 6.0 || cores <= 6 || min_side < 900 {
            QualityLevel::Medium
        } else {
            QualityLevel::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityConfig {
    pub max_pixel_ratio: f32,
    pub ssao_enabled: bool,
    pub ssao_kernel_radius: u32,
    pub ssao_min_distance: f32,
    pub ssao_max_distance: f32,
    pub bloom_strength: f32,
    pub bloom_radius: f32,
    pub bloom_threshold: f32,
}

impl QualityLevel {
    pub fn config(self) -> QualityConfig {
        match self {
            QualityLevel::Low => QualityConfig {
                max_pixel_ratio: 1.0,
                ssao_enabled: false,
                ssao_kernel_radius: 8,
                ssao_min_distance: 0.01,
                ssao_max_distance: 0.1,
                bloom_strength: 0.14,
                bloom_radius: 0.35,
                bloom_threshold: 0.92,
            },
            QualityLevel::Medium => QualityConfig {
                max_pixel_ratio: 1.5,
                ssao_enabled: true,
                ssao_kernel_radius: 8,
                ssao_min_distance: 0.008,
                ssao_max_distance: 0.12,
                bloom_strength: 0.22,
                bloom_radius: 0.4,
                bloom_threshold: 0.88,
            },
            QualityLevel::High => QualityConfig {
                max_pixel_ratio: 2.0,
                ssao_enabled: true,
                ssao_kernel_radius: 12,
                ssao_min_distance: 0.005,
                ssao_max_distance: 0.15,
                bloom_strength: 0.28,
                bloom_radius: 0.45,
                bloom_threshold: 0.85,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(memory: Option<f32>, cores: Option<u32>, w: u32, h: u32) -> QualitySignals {
        QualitySignals { device_memory: memory, cores, width: w, height: h }
    }

    #[test]
    fn test_low_memory_forces_low() {
        let q = signals(Some(4.0), Some(8), 1920, 1080).resolve();
        assert_eq!(q, QualityLevel::Low);
    }

    #[test]
    fn test_small_viewport_forces_low() {
        let q = signals(Some(16.0), Some(12), 1280, 700).resolve();
        assert_eq!(q, QualityLevel::Low);
    }

    #[test]
    fn test_mid_tier_device() {
        let q = signals(Some(6.0), Some(8), 1920, 1080).resolve();
        assert_eq!(q, QualityLevel::Medium);
        let q = signals(Some(8.0), Some(8), 1440, 810).resolve();
        assert_eq!(q, QualityLevel::Medium);
    }

    #[test]
    fn test_unknown_signals_default_optimistic() {
        let q = signals(None, None, 2560, 1440).resolve();
        assert_eq!(q, QualityLevel::High);
    }

    #[test]
    fn test_low_config_disables_ssao() {
        let config = QualityLevel::Low.config();
        assert!(!config.ssao_enabled);
        assert_eq!(config.max_pixel_ratio, 1.0);
        assert!(QualityLevel::Medium.config().ssao_enabled);
        assert!(QualityLevel::High.config().bloom_strength > config.bloom_strength);
    }
}
