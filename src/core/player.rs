//! First-person player movement over terrain
//!
//! Movement accelerates while a control is held and decays once it is
//! released, all scaled by the frame time in milliseconds.

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::types::Vec3;

/// Run and climb speeds are capped at `frame_time * MAX_SPEED_MULTIPLIER`
pub const MAX_SPEED_MULTIPLIER: f32 = 0.03;
/// Turn speed cap multiplier
pub const MAX_TURN_MULTIPLIER: f32 = 0.15;
/// Look speed cap multiplier
pub const MAX_LOOK_MULTIPLIER: f32 = 0.075;

const ACCELERATION: f32 = 0.01;
const RUN_DECELERATION: f32 = 0.005;
const CLIMB_DECELERATION: f32 = 0.05;

/// Player placement settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Starting X/Z position
    pub start: [f32; 2],
    /// Starting yaw in degrees
    pub start_yaw: f32,
    /// Height of the eye above the ground
    pub eye_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start: [0.0, 0.0],
            start_yaw: 0.0,
            eye_height: 2.0,
        }
    }
}

/// Snapshot of the movement controls held during a frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub up: bool,
    pub down: bool,
    pub look_up: bool,
    pub look_down: bool,
}

/// Player position and orientation with eased movement
#[derive(Clone, Debug, Default)]
pub struct Player {
    /// World position (Y is eye height once snapped to the ground)
    pub position: Vec3,
    /// Rotation around X in degrees, clamped to [-90, 90]
    pub pitch: f32,
    /// Rotation around Y in degrees, kept in [0, 360)
    pub yaw: f32,
    frame_time: f32,
    forward_speed: f32,
    backward_speed: f32,
    left_turn_speed: f32,
    right_turn_speed: f32,
    climb_speed: f32,
    descend_speed: f32,
    look_up_speed: f32,
    look_down_speed: f32,
}

/// Accelerate while `active`, otherwise decay towards zero
fn ease(speed: f32, active: bool, frame_time: f32, cap: f32, deceleration: f32) -> f32 {
    if active {
        (speed + frame_time * ACCELERATION).min(frame_time * cap)
    } else {
        (speed - frame_time * deceleration).max(0.0)
    }
}

impl Player {
    /// Create a player at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Set the duration of the current frame in milliseconds
    pub fn set_frame_time(&mut self, frame_time_ms: f32) {
        self.frame_time = frame_time_ms.max(0.0);
    }

    /// Apply one frame of input
    pub fn update(&mut self, input: &PlayerInput, frame_time_ms: f32) {
        self.set_frame_time(frame_time_ms);
        self.turn_left(input.turn_left);
        self.turn_right(input.turn_right);
        self.move_forward(input.forward);
        self.move_backward(input.backward);
        self.move_upward(input.up);
        self.move_downward(input.down);
        self.look_upward(input.look_up);
        self.look_downward(input.look_down);
    }

    pub fn turn_left(&mut self, turning: bool) {
        self.left_turn_speed = ease(
            self.left_turn_speed,
            turning,
            self.frame_time,
            MAX_TURN_MULTIPLIER,
            RUN_DECELERATION,
        );
        self.yaw = (self.yaw - self.left_turn_speed).rem_euclid(360.0);
    }

    pub fn turn_right(&mut self, turning: bool) {
        self.right_turn_speed = ease(
            self.right_turn_speed,
            turning,
            self.frame_time,
            MAX_TURN_MULTIPLIER,
            RUN_DECELERATION,
        );
        self.yaw = (self.yaw + self.right_turn_speed).rem_euclid(360.0);
    }

    pub fn move_forward(&mut self, moving: bool) {
        self.forward_speed = ease(
            self.forward_speed,
            moving,
            self.frame_time,
            MAX_SPEED_MULTIPLIER,
            RUN_DECELERATION,
        );
        let heading = self.heading();
        self.position += heading * self.forward_speed;
    }

    pub fn move_backward(&mut self, moving: bool) {
        self.backward_speed = ease(
            self.backward_speed,
            moving,
            self.frame_time,
            MAX_SPEED_MULTIPLIER,
            RUN_DECELERATION,
        );
        let heading = self.heading();
        self.position -= heading * self.backward_speed;
    }

    pub fn move_upward(&mut self, moving: bool) {
        self.climb_speed = ease(
            self.climb_speed,
            moving,
            self.frame_time,
            MAX_SPEED_MULTIPLIER,
            CLIMB_DECELERATION,
        );
        self.position.y += self.climb_speed;
    }

    pub fn move_downward(&mut self, moving: bool) {
        self.descend_speed = ease(
            self.descend_speed,
            moving,
            self.frame_time,
            MAX_SPEED_MULTIPLIER,
            CLIMB_DECELERATION,
        );
        self.position.y -= self.descend_speed;
    }

    pub fn look_upward(&mut self, looking: bool) {
        self.look_up_speed = ease(
            self.look_up_speed,
            looking,
            self.frame_time,
            MAX_LOOK_MULTIPLIER,
            CLIMB_DECELERATION,
        );
        self.pitch = (self.pitch - self.look_up_speed).clamp(-90.0, 90.0);
    }

    pub fn look_downward(&mut self, looking: bool) {
        self.look_down_speed = ease(
            self.look_down_speed,
            looking,
            self.frame_time,
            MAX_LOOK_MULTIPLIER,
            CLIMB_DECELERATION,
        );
        self.pitch = (self.pitch + self.look_down_speed).clamp(-90.0, 90.0);
    }

    /// Place the eye `eye_offset` above the ground height
    pub fn snap_to_ground(&mut self, height: f32, eye_offset: f32) {
        self.position.y = height + eye_offset;
    }

    /// Horizontal unit direction for the current yaw
    pub fn heading(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        Vec3::new(sin_yaw, 0.0, cos_yaw)
    }

    /// Copy position and orientation into the camera
    pub fn apply_to_camera(&self, camera: &mut Camera) {
        camera.position = self.position;
        camera.pitch = self.pitch;
        camera.yaw = self.yaw;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME_MS: f32 = 16.0;

    #[test]
    fn test_forward_accelerates_and_caps() {
        let mut player = Player::new(Vec3::ZERO);
        let input = PlayerInput { forward: true, ..Default::default() };

        player.update(&input, FRAME_MS);
        let first_step = player.position.z;
        assert!((first_step - FRAME_MS * ACCELERATION).abs() < 1e-5);

        for _ in 0..100 {
            player.update(&input, FRAME_MS);
        }
        let before = player.position.z;
        player.update(&input, FRAME_MS);
        let step = player.position.z - before;
        assert!((step - FRAME_MS * MAX_SPEED_MULTIPLIER).abs() < 1e-4);
        assert!(player.position.x.abs() < 1e-4, "Yaw 0 moves along +Z only");
    }

    #[test]
    fn test_forward_decelerates_to_rest() {
        let mut player = Player::new(Vec3::ZERO);
        let forward = PlayerInput { forward: true, ..Default::default() };
        for _ in 0..10 {
            player.update(&forward, FRAME_MS);
        }

        let idle = PlayerInput::default();
        for _ in 0..100 {
            player.update(&idle, FRAME_MS);
        }
        let rest = player.position;
        player.update(&idle, FRAME_MS);
        assert_eq!(player.position, rest);
    }

    #[test]
    fn test_yaw_wraps() {
        let mut player = Player::new(Vec3::ZERO);
        let input = PlayerInput { turn_left: true, ..Default::default() };
        player.update(&input, FRAME_MS);
        assert!(player.yaw > 300.0 && player.yaw < 360.0);

        let mut player = Player::new(Vec3::ZERO);
        player.yaw = 359.9;
        let input = PlayerInput { turn_right: true, ..Default::default() };
        player.update(&input, FRAME_MS);
        assert!(player.yaw >= 0.0 && player.yaw < 1.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut player = Player::new(Vec3::ZERO);
        let down = PlayerInput { look_down: true, ..Default::default() };
        for _ in 0..1000 {
            player.update(&down, FRAME_MS);
        }
        assert_eq!(player.pitch, 90.0);

        let up = PlayerInput { look_up: true, ..Default::default() };
        for _ in 0..2000 {
            player.update(&up, FRAME_MS);
        }
        assert_eq!(player.pitch, -90.0);
    }

    #[test]
    fn test_heading_follows_yaw() {
        let mut player = Player::new(Vec3::ZERO);
        player.yaw = 90.0;
        let input = PlayerInput { forward: true, ..Default::default() };
        player.update(&input, FRAME_MS);
        assert!(player.position.x > 0.0);
        assert!(player.position.z.abs() < 1e-5);
    }

    #[test]
    fn test_snap_to_ground_and_camera() {
        let mut player = Player::new(Vec3::new(3.0, 50.0, 4.0));
        player.yaw = 45.0;
        player.snap_to_ground(7.5, 2.0);
        assert_eq!(player.position, Vec3::new(3.0, 9.5, 4.0));

        let mut camera = Camera::default();
        player.apply_to_camera(&mut camera);
        assert_eq!(camera.position, player.position);
        assert_eq!(camera.yaw, 45.0);
    }
}
