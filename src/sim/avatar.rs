//! Player avatar: lane seeking, jump arc, crouch timer.

use glam::Vec3;

use crate::consts;
use crate::{lane_x, lerp};

#[derive(Debug)]
pub struct AvatarController {
    /// Logical lane used for hazard lane matching; flips immediately on
    /// input while `x` eases after it.
    lane: usize,
    x: f32,
    y: f32,
    velocity_y: f32,
    jumping: bool,
    crouch_timer: f32,
    collision_radius: f32,
}

impl Default for AvatarController {
    fn default() -> Self {
        Self::new()
    }
}

impl AvatarController {
    pub fn new() -> Self {
        Self {
            lane: 1,
            x: lane_x(1),
            y: consts::AVATAR_BASE_Y,
            velocity_y: 0.0,
            jumping: false,
            crouch_timer: 0.0,
            collision_radius: consts::AVATAR_RADIUS,
        }
    }

    pub fn reset(&mut self) {
        let radius = self.collision_radius;
        *self = Self::new();
        self.collision_radius = radius;
    }

    /// Shift the target lane, clamped to the track edges.
    pub fn move_lane(&mut self, delta: i32) {
        let next = self.lane as i32 + delta;
        self.lane = next.clamp(0, consts::LANE_COUNT as i32 - 1) as usize;
    }

    /// No-op while already airborne or crouching.
    pub fn jump(&mut self) {
        if self.jumping || self.is_crouching() {
            return;
        }
        self.jumping = true;
        self.velocity_y = consts::JUMP_VELOCITY;
    }

    /// No-op while airborne; re-crouching restarts the hold.
    pub fn crouch(&mut self) {
        if self.jumping {
            return;
        }
        self.crouch_timer = consts::CROUCH_DURATION;
    }

    pub fn update(&mut self, dt: f32) {
        self.x = lerp(self.x, lane_x(self.lane), (dt * consts::LANE_LERP_RATE).min(1.0));

        if self.jumping {
            self.velocity_y -= consts::GRAVITY * dt;
            self.y += self.velocity_y * dt;
            if self.y <= consts::AVATAR_BASE_Y {
                self.y = consts::AVATAR_BASE_Y;
                self.velocity_y = 0.0;
                self.jumping = false;
            }
        }

        if self.crouch_timer > 0.0 {
            self.crouch_timer = (self.crouch_timer - dt).max(0.0);
        }
    }

    pub fn lane(&self) -> usize {
        self.lane
    }

    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, 0.0)
    }

    pub fn is_airborne(&self) -> bool {
        self.jumping || self.y > consts::AVATAR_BASE_Y + 0.3
    }

    pub fn is_crouching(&self) -> bool {
        self.crouch_timer > 0.0
    }

    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    /// Override the default radius, e.g. from measured model bounds.
    pub fn set_collision_radius(&mut self, radius: f32) {
        self.collision_radius = radius.max(0.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(avatar: &mut AvatarController, seconds: f32) {
        let steps = (seconds / 0.016).ceil() as usize;
        for _ in 0..steps {
            avatar.update(0.016);
        }
    }

    #[test]
    fn test_lane_clamps_at_edges() {
        let mut avatar = AvatarController::new();
        avatar.move_lane(-1);
        avatar.move_lane(-1);
        assert_eq!(avatar.lane(), 0);
        avatar.move_lane(1);
        avatar.move_lane(1);
        avatar.move_lane(1);
        assert_eq!(avatar.lane(), 2);
    }

    #[test]
    fn test_lane_index_leads_position() {
        let mut avatar = AvatarController::new();
        avatar.move_lane(1);
        // Logical lane flips immediately, x eases over
        assert_eq!(avatar.lane(), 2);
        assert!(avatar.position().x < lane_x(2));
        settle(&mut avatar, 1.0);
        assert!((avatar.position().x - lane_x(2)).abs() < 0.01);
    }

    #[test]
    fn test_jump_arc_lands_at_base() {
        let mut avatar = AvatarController::new();
        avatar.jump();
        assert!(avatar.is_airborne());
        let mut peak = 0.0f32;
        for _ in 0..120 {
            avatar.update(0.016);
            peak = peak.max(avatar.position().y);
        }
        assert!(peak > consts::AVATAR_BASE_Y + 1.0);
        assert!(!avatar.is_airborne());
        assert_eq!(avatar.position().y, consts::AVATAR_BASE_Y);
    }

    #[test]
    fn test_jump_while_crouching_is_noop() {
        let mut avatar = AvatarController::new();
        avatar.crouch();
        avatar.jump();
        assert!(!avatar.is_airborne());
        assert!(avatar.is_crouching());
    }

    #[test]
    fn test_crouch_while_airborne_is_noop() {
        let mut avatar = AvatarController::new();
        avatar.jump();
        avatar.update(0.016);
        avatar.crouch();
        assert!(!avatar.is_crouching());
    }

    #[test]
    fn test_crouch_auto_releases() {
        let mut avatar = AvatarController::new();
        avatar.crouch();
        assert!(avatar.is_crouching());
        settle(&mut avatar, consts::CROUCH_DURATION + 0.1);
        assert!(!avatar.is_crouching());
    }
}
