//! Dimension Runner - simulation core for a lane-based 3D endless runner
//!
//! Core modules:
//! - `sim`: Deterministic gameplay simulation (pools, spawning, collisions, state machines)
//! - `assets`: Logical asset catalog with preload generations and placeholder fallback
//! - `quality`: Device capability detection and render quality presets
//! - `bridge`: Cross-context message bridge onto the engine command surface
//! - `host`: External collaborator surface (rendering, audio, telemetry sinks)

pub mod assets;
pub mod bridge;
pub mod host;
pub mod quality;
pub mod sim;

pub use host::{EngineHost, NullHost, Sfx};
pub use quality::{QualityConfig, QualityLevel};
pub use sim::{Engine, GameStatus, Theme};

/// Game configuration constants
pub mod consts {
    /// Lane center x-coordinates, left to right
    pub const LANE_POSITIONS: [f32; 3] = [-2.0, 0.0, 2.0];
    /// Number of lanes
    pub const LANE_COUNT: usize = 3;

    /// Chunk length in world units (z)
    pub const CHUNK_LENGTH: f32 = 100.0;
    /// How many chunks to keep generated ahead of the player
    pub const CHUNKS_AHEAD: u64 = 3;

    /// Base scroll speed at distance 0
    pub const BASE_SPEED: f32 = 12.0;
    /// Speed gained per unit of distance travelled
    pub const DIFFICULTY_COEFF: f32 = 0.02;
    /// Flat bonus while a speed boost is active
    pub const SPEED_BOOST: f32 = 6.0;

    /// Half-depth of the hazard hit window around the player (z)
    pub const HIT_WINDOW: f32 = 0.9;
    /// Extra slack added to sphere-sphere pickup tests
    pub const PICKUP_MARGIN: f32 = 0.1;

    /// Entities scrolled behind this z are recycled
    pub const DESPAWN_BEHIND: f32 = -20.0;
    /// Entities pushed past this z (advancing hazards) are recycled
    pub const DESPAWN_AHEAD: f32 = 140.0;

    /// Speed boost duration in milliseconds
    pub const SPEED_BOOST_MS: f64 = 5000.0;
    /// Magnet duration in milliseconds
    pub const MAGNET_MS: f64 = 7000.0;
    /// Maximum stacked shield charges
    pub const SHIELD_CAP: u32 = 2;

    /// Score contribution per unit of distance
    pub const DISTANCE_SCORE: f32 = 4.0;
    /// Score contribution per collected coin
    pub const COIN_SCORE: u64 = 25;
    /// Minimum interval between telemetry emissions
    pub const TELEMETRY_INTERVAL_MS: f64 = 120.0;

    /// Reach of the "clear" consumable ahead of the player
    pub const CLEAR_RANGE: f32 = 20.0;

    /// Coin sub-pool capacity; spawns past this are dropped
    pub const COIN_CAPACITY: usize = 96;
    /// Number of boulder visual variants for the batched render path
    pub const BOULDER_VARIANTS: u32 = 3;

    /// Ground ring segment count
    pub const TRACK_SEGMENTS: usize = 10;
    /// Ground segment length (z)
    pub const SEGMENT_LENGTH: f32 = 24.0;
    /// Ground segment width (x)
    pub const SEGMENT_WIDTH: f32 = 8.0;

    /// Avatar resting height
    pub const AVATAR_BASE_Y: f32 = 0.9;
    /// Initial vertical velocity of a jump
    pub const JUMP_VELOCITY: f32 = 7.2;
    /// Downward acceleration while airborne
    pub const GRAVITY: f32 = 18.0;
    /// How long a crouch holds before auto-releasing
    pub const CROUCH_DURATION: f32 = 0.6;
    /// Lane-seeking interpolation rate (per second)
    pub const LANE_LERP_RATE: f32 = 12.0;
    /// Default collision radius for the avatar
    pub const AVATAR_RADIUS: f32 = 0.9;

    /// Scenery scrolls at this fraction of world speed (parallax)
    pub const SCENERY_PARALLAX: f32 = 0.85;
    /// Scenery recycled behind this z
    pub const SCENERY_DESPAWN: f32 = -30.0;
    /// Camera distance below which hidden scenery becomes visible
    pub const SCENERY_SHOW_DISTANCE: f32 = 140.0;
    /// Camera distance above which visible scenery hides (hysteresis)
    pub const SCENERY_HIDE_DISTANCE: f32 = 170.0;
    /// Lateral offset of scenery props from the track center
    pub const SCENERY_SIDE: f32 = 8.0;
}

/// Center x-coordinate of a lane index (clamped to the outer lanes)
#[inline]
pub fn lane_x(lane: usize) -> f32 {
    consts::LANE_POSITIONS[lane.min(consts::LANE_COUNT - 1)]
}

/// Linear interpolation with a clamped factor
#[inline]
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
