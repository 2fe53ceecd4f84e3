//! Camera for 3D rendering

use serde::{Deserialize, Serialize};

use crate::core::types::{Vec3, Mat4};

/// Projection parameters for the camera
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane, also used as the culling distance
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Camera with position, pitch/yaw orientation, and projection parameters
///
/// Angles are in degrees. Yaw 0 looks down +Z, increasing yaw turns towards +X;
/// positive pitch looks down.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation around X in degrees
    pub pitch: f32,
    /// Rotation around Y in degrees
    pub yaw: f32,
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            position,
            pitch: 0.0,
            yaw: 0.0,
            fov_y: fov_y_degrees.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// Create a camera from projection settings
    pub fn from_config(position: Vec3, config: &CameraConfig) -> Self {
        Self {
            near: config.near,
            far: config.far,
            ..Self::new(position, config.fov_y_degrees, config.aspect)
        }
    }

    /// Orient the camera so it looks at `target`
    pub fn look_at(&mut self, target: Vec3) {
        let dir = target - self.position;
        if dir.length_squared() <= f32::EPSILON {
            return;
        }
        let dir = dir.normalize();
        self.yaw = dir.x.atan2(dir.z).to_degrees();
        self.pitch = (-dir.y).clamp(-1.0, 1.0).asin().to_degrees();
    }

    /// Get view matrix (world to camera space)
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        // Looking straight up or down: take "up" from the yaw heading
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
            Vec3::new(sin_yaw, 0.0, cos_yaw) * -forward.y.signum()
        } else {
            Vec3::Y
        };
        Mat4::look_to_rh(self.position, forward, up)
    }

    /// Get projection matrix (camera to clip space)
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Get combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get forward direction
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        Vec3::new(sin_yaw * cos_pitch, -sin_pitch, cos_yaw * cos_pitch)
    }

    /// Update aspect ratio (call on window resize)
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect = width / height;
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(Vec3::ZERO, &CameraConfig::default())
    }
}
