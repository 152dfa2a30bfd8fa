//! Logical asset catalog.
//!
//! The core tracks which props a theme needs and whether they are loaded;
//! actual bytes live behind the injectable [`AssetSource`]. A failed load is
//! logged and replaced with an inert placeholder under the same id, so
//! gameplay never stalls on a missing model. Theme switches bump a
//! generation token; a preload that finishes after another switch began is
//! stale and gets discarded.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::sim::hazard::HazardKind;
use crate::sim::pickups::PickupKind;
use crate::sim::scenery::SceneryKind;
use crate::sim::state::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Player,
    Track,
    Hazard(HazardKind),
    Pickup(PickupKind),
    Scenery(SceneryKind),
}

/// Everything a theme needs resident before a run may start.
pub fn theme_catalog(theme: Theme) -> Vec<AssetId> {
    let mut ids = vec![AssetId::Player, AssetId::Track];
    ids.extend(HazardKind::catalog(theme).iter().map(|k| AssetId::Hazard(*k)));
    ids.extend(
        [
            PickupKind::Shield,
            PickupKind::Speed,
            PickupKind::Clear,
            PickupKind::Magnet,
            PickupKind::Storm,
            PickupKind::Coin,
        ]
        .into_iter()
        .map(AssetId::Pickup),
    );
    ids.extend(
        [
            SceneryKind::Tower,
            SceneryKind::Lantern,
            SceneryKind::Pine,
            SceneryKind::Shrine,
            SceneryKind::Coral,
            SceneryKind::Kelp,
        ]
        .into_iter()
        .map(AssetId::Scenery),
    );
    ids
}

#[derive(Debug)]
pub enum AssetError {
    Missing(AssetId),
    Corrupt(AssetId, String),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Missing(id) => write!(f, "asset not found: {id:?}"),
            AssetError::Corrupt(id, reason) => write!(f, "asset unreadable: {id:?} ({reason})"),
        }
    }
}

impl Error for AssetError {}

/// Loaded prop metadata the simulation cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropData {
    pub bounding_radius: f32,
}

/// Where prop data actually comes from; injected so tests can fail loads
/// on demand.
pub trait AssetSource {
    fn load(&mut self, id: AssetId) -> Result<PropData, AssetError>;
}

/// A resident prop handle. `placeholder` marks loads that failed or were
/// never requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prop {
    pub id: AssetId,
    pub bounding_radius: f32,
    pub placeholder: bool,
}

const PLACEHOLDER_RADIUS: f32 = 0.5;

fn placeholder(id: AssetId) -> Prop {
    Prop { id, bounding_radius: PLACEHOLDER_RADIUS, placeholder: true }
}

/// Opaque handle tying a preload back to the switch that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadToken {
    generation: u64,
    theme: Theme,
}

#[derive(Debug, Default)]
pub struct AssetLibrary {
    cache: HashMap<AssetId, Prop>,
    generation: u64,
    ready_theme: Option<Theme>,
    disposed: bool,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin switching to `theme`. Invalidates readiness and any preload
    /// still in flight.
    pub fn begin_preload(&mut self, theme: Theme) -> PreloadToken {
        self.generation += 1;
        self.ready_theme = None;
        PreloadToken { generation: self.generation, theme }
    }

    /// Pull the theme's catalog through the source. Returns false when the
    /// token is stale or the library was disposed; nothing is applied in
    /// that case.
    pub fn complete_preload<S: AssetSource>(
        &mut self,
        token: PreloadToken,
        source: &mut S,
    ) -> bool {
        if self.disposed {
            return false;
        }
        if token.generation != self.generation {
            log::debug!("discarding stale preload for {:?}", token.theme);
            return false;
        }
        for id in theme_catalog(token.theme) {
            match source.load(id) {
                Ok(data) => {
                    self.cache.insert(
                        id,
                        Prop { id, bounding_radius: data.bounding_radius, placeholder: false },
                    );
                }
                Err(err) => {
                    log::warn!("{err}, using placeholder");
                    self.cache.insert(id, placeholder(id));
                }
            }
        }
        self.ready_theme = Some(token.theme);
        true
    }

    pub fn is_ready(&self, theme: Theme) -> bool {
        !self.disposed && self.ready_theme == Some(theme)
    }

    /// Synchronous handle lookup; falls back to a placeholder so callers
    /// never branch on load state.
    pub fn clone_prop(&self, id: AssetId) -> Prop {
        self.cache.get(&id).copied().unwrap_or_else(|| placeholder(id))
    }

    /// Tear down; every later preload completion is ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.cache.clear();
        self.ready_theme = None;
    }
}
