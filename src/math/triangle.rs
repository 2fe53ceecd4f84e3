//! World-space triangles

use crate::core::types::{Vec2, Vec3};

/// A triangle in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Vertices in winding order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Minimum (x, z) of the three vertices
    pub fn xz_min(&self) -> Vec2 {
        Vec2::new(
            self.a.x.min(self.b.x).min(self.c.x),
            self.a.z.min(self.b.z).min(self.c.z),
        )
    }

    /// Maximum (x, z) of the three vertices
    pub fn xz_max(&self) -> Vec2 {
        Vec2::new(
            self.a.x.max(self.b.x).max(self.c.x),
            self.a.z.max(self.b.z).max(self.c.z),
        )
    }

    /// Unnormalized face normal, `(b - a) x (c - a)`
    pub fn face_normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a)
    }
}
