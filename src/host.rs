//! External collaborator surface.
//!
//! The simulation core never renders, plays audio, or reports stats itself;
//! it calls into an [`EngineHost`] and moves on. Host calls are
//! fire-and-forget and must not block the frame.

use glam::Vec3;

use crate::sim::state::{GameStatus, Telemetry, Theme};

/// Sound effect identifiers forwarded to the host's audio layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sfx {
    Collect,
    PowerUp,
    Hit,
    Explosion,
    Clear,
}

pub trait EngineHost {
    /// Current camera position, used for scenery culling.
    fn camera_position(&self) -> Vec3;

    fn play_sfx(&mut self, sfx: Sfx);

    fn play_bgm(&mut self, theme: Theme);

    fn stop_bgm(&mut self);

    /// Feedback kick; intensity roughly 2.0 for a shield save, 5.0 for a
    /// fatal hit.
    fn screen_shake(&mut self, intensity: f32);

    /// Throttled telemetry snapshot.
    fn push_stats(&mut self, stats: &Telemetry);

    fn status_changed(&mut self, status: GameStatus);
}

/// Host that swallows everything. Default camera sits behind the avatar at
/// the standard chase offset.
pub struct NullHost;

impl EngineHost for NullHost {
    fn camera_position(&self) -> Vec3 {
        Vec3::new(0.0, 3.5, -7.0)
    }

    fn play_sfx(&mut self, _sfx: Sfx) {}

    fn play_bgm(&mut self, _theme: Theme) {}

    fn stop_bgm(&mut self) {}

    fn screen_shake(&mut self, _intensity: f32) {}

    fn push_stats(&mut self, _stats: &Telemetry) {}

    fn status_changed(&mut self, _status: GameStatus) {}
}
