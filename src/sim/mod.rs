//! Deterministic gameplay simulation.
//!
//! Everything under `sim` is pure state-in, state-out: no I/O, no clocks, no
//! platform types. The engine is stepped with an explicit `dt` and timestamp,
//! and all randomness flows through a seeded PCG so a run is reproducible
//! from its seed.

pub mod avatar;
pub mod engine;
pub mod hazard;
pub mod obstacles;
pub mod pickups;
pub mod scenery;
pub mod state;
pub mod storm;
pub mod track;

pub use engine::Engine;
pub use state::{Biome, GameStatus, PowerUpState, Telemetry, Theme};
