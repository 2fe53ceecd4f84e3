//! Directional light used by the terrain pass

use serde::{Deserialize, Serialize};
use crate::core::types::Vec3;

/// A single directional light with ambient, diffuse and specular terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// Direction the light travels in (not necessarily normalized)
    pub direction: [f32; 3],
    pub specular_power: f32,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            ambient: [0.05, 0.05, 0.05, 1.0],
            diffuse: [1.0, 1.0, 1.0, 1.0],
            specular: [1.0, 1.0, 1.0, 1.0],
            direction: [-0.5, -1.0, 0.0],
            specular_power: 32.0,
        }
    }
}

impl DirectionalLight {
    /// Unit direction, falling back to straight down for a zero vector
    pub fn direction(&self) -> Vec3 {
        Vec3::from_array(self.direction).try_normalize().unwrap_or(Vec3::NEG_Y)
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.to_array();
    }

    /// Lambert term for a surface normal, clamped to [0, 1]
    pub fn diffuse_intensity(&self, normal: Vec3) -> f32 {
        normal.normalize_or_zero().dot(-self.direction()).clamp(0.0, 1.0)
    }
}
