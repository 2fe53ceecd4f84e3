//! View frustum for culling
//!
//! Broad-phase only: a volume is reported invisible when it lies entirely
//! behind one of the six planes. Volumes near frustum corners can be reported
//! visible while being outside, never the other way around.

use crate::core::types::{Vec3, Vec4, Mat4};

/// A plane defined by normal and distance from origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Build from `(a, b, c, d)` coefficients, normalizing the normal
    fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = coefficients.truncate();
        let len = normal.length();
        if len > 0.0 {
            Self::new(normal / len, coefficients.w / len)
        } else {
            Self::new(normal, coefficients.w)
        }
    }

    /// Signed distance from point to plane (positive = in front)
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Whether all 8 corners of the box `center ± half_extent` are strictly behind
    fn box_behind(&self, center: Vec3, half_extent: Vec3) -> bool {
        (0..8).all(|corner| {
            let offset = Vec3::new(
                if corner & 1 != 0 { half_extent.x } else { -half_extent.x },
                if corner & 2 != 0 { half_extent.y } else { -half_extent.y },
                if corner & 4 != 0 { half_extent.z } else { -half_extent.z },
            );
            self.distance_to_point(center + offset) < 0.0
        })
    }
}

/// View frustum with 6 planes (Near, Far, Left, Right, Top, Bottom)
#[derive(Clone, Copy, Debug)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Build the frustum for this frame
    ///
    /// Perspective projections have their far plane moved to
    /// `far_plane_distance` (keeping the near plane) before the planes are
    /// extracted from `projection * view`. Orthographic projections, and
    /// distances that are not finite or not beyond the near plane, leave the
    /// projection unchanged.
    pub fn construct(far_plane_distance: f32, projection: &Mat4, view: &Mat4) -> Self {
        let projection = with_far_plane(projection, far_plane_distance);
        Self::from_view_projection(&(projection * *view))
    }

    /// Extract frustum planes from view-projection matrix
    ///
    /// Gribb/Hartmann extraction for a `[0, 1]` depth range (wgpu, D3D):
    /// near is row 2 alone, far is row 3 - row 2.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let rows = [vp.row(0), vp.row(1), vp.row(2), vp.row(3)];

        let near = Plane::from_coefficients(rows[2]);
        let far = Plane::from_coefficients(rows[3] - rows[2]);
        let left = Plane::from_coefficients(rows[3] + rows[0]);
        let right = Plane::from_coefficients(rows[3] - rows[0]);
        let top = Plane::from_coefficients(rows[3] - rows[1]);
        let bottom = Plane::from_coefficients(rows[3] + rows[1]);

        Self {
            planes: [near, far, left, right, top, bottom],
        }
    }

    /// Check if point is inside frustum
    pub fn check_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Check if an axis-aligned cube is at least partially inside
    pub fn check_cube(&self, center: Vec3, radius: f32) -> bool {
        self.check_rectangle(center, Vec3::splat(radius))
    }

    /// Check if a sphere is at least partially inside
    pub fn check_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(center) >= -radius)
    }

    /// Check if an axis-aligned box `center ± half_extent` is at least partially inside
    pub fn check_rectangle(&self, center: Vec3, half_extent: Vec3) -> bool {
        !self
            .planes
            .iter()
            .any(|plane| plane.box_behind(center, half_extent))
    }
}

/// Move the far plane of a perspective projection to `far`
fn with_far_plane(projection: &Mat4, far: f32) -> Mat4 {
    let mut projection = *projection;
    // +1 for left-handed, -1 for right-handed perspective; 0 for orthographic
    let handedness = projection.z_axis.w;
    if handedness == 0.0 || !far.is_finite() || projection.z_axis.z == 0.0 {
        return projection;
    }

    let near = -handedness * projection.w_axis.z / projection.z_axis.z;
    if far <= near {
        return projection;
    }

    let depth_scale = far / (handedness * (far - near));
    projection.z_axis.z = depth_scale;
    projection.w_axis.z = -handedness * depth_scale * near;
    projection
}
