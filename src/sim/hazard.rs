//! Hazard kind catalog and phase machines.
//!
//! Each kind carries a height profile (which avatar pose beats it) and a
//! phase function from the entity's age to its lethality. Phase stepping is
//! pure so the windows can be asserted directly in tests; motion and pooling
//! live in [`crate::sim::obstacles`].

use serde::{Deserialize, Serialize};

use crate::sim::state::Theme;

/// Which avatar pose avoids a hazard occupying the same lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightProfile {
    /// Ground-level, cleared by jumping over it
    Low,
    /// Overhead, cleared by crouching under it
    High,
    /// Fills the lane, only a lane change avoids it
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    // Xianxia
    Lightning,
    SwordRain,
    Boulder,
    Beast,
    Whirlwind,
    FallingSeal,
    SpiritLaser,
    IceSpikes,
    // Minecraft
    Creeper,
    Tnt,
    Lava,
    Anvil,
    Arrow,
}

/// Result of stepping a hazard's phase machine to a given age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseStep {
    /// Touching the hazard this frame is a hit
    pub lethal: bool,
    /// The hazard has played out and should be released
    pub done: bool,
    /// The kind's one-shot impact (blast, landing) has occurred by now.
    /// Callers latch this so the side effect fires at most once.
    pub impact: bool,
}

const LIGHTNING_WARN: f32 = 0.7;
const LIGHTNING_STRIKE: f32 = 0.25;
const SWORD_RAIN_CYCLE: f32 = 1.1;
const BOMB_FUSE: f32 = 1.3;
const BOMB_BLAST: f32 = 0.35;
const SEAL_DROP: f32 = 1.0;
const LASER_CHARGE: f32 = 1.2;
const LASER_FIRE: f32 = 0.5;
const SPIKE_ERUPT: f32 = 0.8;

impl HazardKind {
    pub fn height(self) -> HeightProfile {
        match self {
            HazardKind::Lightning
            | HazardKind::Whirlwind
            | HazardKind::FallingSeal
            | HazardKind::SpiritLaser
            | HazardKind::Anvil => HeightProfile::Full,
            HazardKind::SwordRain => HeightProfile::High,
            HazardKind::Boulder
            | HazardKind::Beast
            | HazardKind::IceSpikes
            | HazardKind::Creeper
            | HazardKind::Tnt
            | HazardKind::Lava
            | HazardKind::Arrow => HeightProfile::Low,
        }
    }

    /// Lethality before the first phase step. Telegraphed kinds flip this
    /// on their first update; lightning is the only kind that spawns as a
    /// pure warning.
    pub fn starts_lethal(self) -> bool {
        self != HazardKind::Lightning
    }

    /// Kinds rendered through the batched boulder path get a stable visual
    /// variant assigned at spawn.
    pub fn batched(self) -> bool {
        self == HazardKind::Boulder
    }

    /// Phase machine evaluated at age `timer` seconds.
    pub fn phase(self, timer: f32) -> PhaseStep {
        match self {
            HazardKind::Lightning => {
                if timer < LIGHTNING_WARN {
                    PhaseStep { lethal: false, done: false, impact: false }
                } else if timer < LIGHTNING_WARN + LIGHTNING_STRIKE {
                    PhaseStep { lethal: true, done: false, impact: true }
                } else {
                    PhaseStep { lethal: false, done: true, impact: true }
                }
            }
            HazardKind::SwordRain => {
                let phase = (timer % SWORD_RAIN_CYCLE) / SWORD_RAIN_CYCLE;
                PhaseStep { lethal: phase > 0.65, done: false, impact: false }
            }
            HazardKind::Creeper | HazardKind::Tnt => {
                let burned_out = timer >= BOMB_FUSE + BOMB_BLAST;
                PhaseStep {
                    lethal: !burned_out,
                    done: burned_out,
                    impact: timer >= BOMB_FUSE,
                }
            }
            HazardKind::FallingSeal | HazardKind::Anvil => {
                let landed = timer >= SEAL_DROP;
                // Lands and remains lethal as a wall
                PhaseStep { lethal: landed, done: false, impact: landed }
            }
            HazardKind::SpiritLaser => {
                if timer < LASER_CHARGE {
                    PhaseStep { lethal: false, done: false, impact: false }
                } else if timer < LASER_CHARGE + LASER_FIRE {
                    PhaseStep { lethal: true, done: false, impact: false }
                } else {
                    PhaseStep { lethal: false, done: true, impact: false }
                }
            }
            HazardKind::IceSpikes => {
                PhaseStep { lethal: timer >= SPIKE_ERUPT, done: false, impact: false }
            }
            // Constant hazards with no telegraph
            HazardKind::Boulder
            | HazardKind::Beast
            | HazardKind::Whirlwind
            | HazardKind::Lava
            | HazardKind::Arrow => PhaseStep { lethal: true, done: false, impact: false },
        }
    }

    /// Spawnable kinds for a theme.
    pub fn catalog(theme: Theme) -> &'static [HazardKind] {
        match theme {
            Theme::Xianxia => &[
                HazardKind::Lightning,
                HazardKind::SwordRain,
                HazardKind::Boulder,
                HazardKind::Beast,
                HazardKind::Whirlwind,
                HazardKind::FallingSeal,
                HazardKind::SpiritLaser,
                HazardKind::IceSpikes,
            ],
            Theme::Minecraft => &[
                HazardKind::Lightning,
                HazardKind::Creeper,
                HazardKind::Tnt,
                HazardKind::Lava,
                HazardKind::Anvil,
                HazardKind::Arrow,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lightning_windows() {
        assert!(!HazardKind::Lightning.phase(0.0).lethal);
        assert!(!HazardKind::Lightning.phase(0.69).lethal);
        let strike = HazardKind::Lightning.phase(0.8);
        assert!(strike.lethal && !strike.done);
        let after = HazardKind::Lightning.phase(1.0);
        assert!(!after.lethal && after.done);
    }

    #[test]
    fn test_bomb_blast_then_burnout() {
        let fuse = HazardKind::Tnt.phase(1.0);
        assert!(fuse.lethal && !fuse.impact);
        let blast = HazardKind::Tnt.phase(1.4);
        assert!(blast.lethal && blast.impact && !blast.done);
        let out = HazardKind::Tnt.phase(1.7);
        assert!(!out.lethal && out.done);
    }

    #[test]
    fn test_seal_lands_and_stays() {
        assert!(!HazardKind::FallingSeal.phase(0.9).lethal);
        let landed = HazardKind::FallingSeal.phase(1.1);
        assert!(landed.lethal && landed.impact && !landed.done);
        // Still a wall much later
        assert!(HazardKind::FallingSeal.phase(30.0).lethal);
    }

    #[test]
    fn test_sword_rain_cycles() {
        assert!(!HazardKind::SwordRain.phase(0.1).lethal);
        assert!(HazardKind::SwordRain.phase(0.8).lethal);
        // Second cycle, early phase again
        assert!(!HazardKind::SwordRain.phase(1.2).lethal);
        assert!(HazardKind::SwordRain.phase(1.2 + 0.8).lethal);
    }

    #[test]
    fn test_laser_charge_fire_expire() {
        assert!(!HazardKind::SpiritLaser.phase(1.0).lethal);
        assert!(HazardKind::SpiritLaser.phase(1.5).lethal);
        assert!(HazardKind::SpiritLaser.phase(1.8).done);
    }

    #[test]
    fn test_catalogs_match_heights() {
        for theme in [Theme::Xianxia, Theme::Minecraft] {
            let kinds = HazardKind::catalog(theme);
            assert!(!kinds.is_empty());
            for kind in kinds {
                // Every kind resolves a height without panicking
                let _ = kind.height();
            }
        }
    }

    #[test]
    fn test_only_lightning_spawns_harmless() {
        assert!(!HazardKind::Lightning.starts_lethal());
        assert!(HazardKind::Tnt.starts_lethal());
        assert!(HazardKind::Boulder.starts_lethal());
    }
}
