//! Ray type and operations

use crate::core::types::Vec3;
use super::triangle::Triangle;

/// Tolerance used by terrain ray casts
///
/// Denominators below this are treated as parallel; edge determinants up to
/// this value still count as inside, so shared edges have no gaps.
pub const RAY_EPSILON: f32 = 0.001;

/// A ray defined by origin and direction
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray (direction should be normalized)
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Downward vertical ray through (x, z)
    pub fn vertical(x: f32, z: f32) -> Self {
        Self::new(Vec3::new(x, 0.0, z), Vec3::NEG_Y)
    }

    /// Get point along ray at parameter t
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect the ray's supporting line with a triangle
    ///
    /// Solves for the point on the triangle's plane, then checks it against
    /// the outward normal of each edge (edge x face normal). The point is
    /// inside when every edge determinant is `<= epsilon`, so points on an
    /// edge are accepted. Returns `None` for degenerate triangles and rays
    /// parallel to the plane.
    pub fn intersect_triangle(&self, triangle: &Triangle, epsilon: f32) -> Option<Vec3> {
        let normal = triangle.face_normal();
        let len = normal.length();
        if len <= f32::EPSILON {
            return None;
        }
        let normal = normal / len;
        let offset = -normal.dot(triangle.a);

        let denominator = normal.dot(self.direction);
        if denominator.abs() < epsilon {
            return None;
        }

        let t = -(normal.dot(self.origin) + offset) / denominator;
        let point = self.at(t);

        let [a, b, c] = triangle.vertices();
        for (start, end) in [(a, b), (b, c), (c, a)] {
            let edge_normal = (end - start).cross(normal);
            if edge_normal.dot(point - start) > epsilon {
                return None;
            }
        }

        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_triangle(height: f32) -> Triangle {
        Triangle::new(
            Vec3::new(0.0, height, 0.0),
            Vec3::new(1.0, height, 0.0),
            Vec3::new(0.0, height, 1.0),
        )
    }

    #[test]
    fn test_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.at(5.0), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_vertical_hit() {
        let hit = Ray::vertical(0.25, 0.25).intersect_triangle(&flat_triangle(5.0), RAY_EPSILON);
        let point = hit.expect("Point inside triangle should hit");
        assert!((point - Vec3::new(0.25, 5.0, 0.25)).length() < 1e-5);
    }

    #[test]
    fn test_vertical_miss() {
        let hit = Ray::vertical(0.9, 0.9).intersect_triangle(&flat_triangle(5.0), RAY_EPSILON);
        assert!(hit.is_none());

        let hit = Ray::vertical(-0.1, 0.5).intersect_triangle(&flat_triangle(5.0), RAY_EPSILON);
        assert!(hit.is_none());
    }

    #[test]
    fn test_edge_is_inside() {
        // On the hypotenuse and on a vertex
        let tri = flat_triangle(2.0);
        assert!(Ray::vertical(0.5, 0.5).intersect_triangle(&tri, RAY_EPSILON).is_some());
        assert!(Ray::vertical(1.0, 0.0).intersect_triangle(&tri, RAY_EPSILON).is_some());
    }

    #[test]
    fn test_winding_does_not_matter() {
        let tri = flat_triangle(3.0);
        let flipped = Triangle::new(tri.a, tri.c, tri.b);
        let ray = Ray::vertical(0.2, 0.3);
        assert!(ray.intersect_triangle(&tri, RAY_EPSILON).is_some());
        assert!(ray.intersect_triangle(&flipped, RAY_EPSILON).is_some());
        assert!(Ray::vertical(0.8, 0.8).intersect_triangle(&flipped, RAY_EPSILON).is_none());
    }

    #[test]
    fn test_sloped_triangle_height() {
        // Plane y = x
        let tri = Triangle::new(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(10.0, 10.0, 0.0),
            Vec3::new(0.0, 0.0, 10.0),
        );
        let point = Ray::vertical(3.0, 2.0)
            .intersect_triangle(&tri, RAY_EPSILON)
            .expect("Point inside sloped triangle should hit");
        assert!((point.y - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_is_skipped() {
        // Vertical wall in the XY plane
        let wall = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(Ray::vertical(0.2, 0.0).intersect_triangle(&wall, RAY_EPSILON).is_none());
    }

    #[test]
    fn test_degenerate_triangle_is_skipped() {
        let line = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(Ray::vertical(1.0, 0.0).intersect_triangle(&line, RAY_EPSILON).is_none());
    }
}
