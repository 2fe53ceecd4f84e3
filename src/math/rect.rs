//! Axis-aligned squares in the XZ plane

use crate::core::types::Vec2;

/// Square region on the XZ plane, described by center and full side length
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct QuadBounds {
    /// Center as (x, z)
    pub center: Vec2,
    /// Full side length
    pub width: f32,
}

impl QuadBounds {
    pub fn new(center_x: f32, center_z: f32, width: f32) -> Self {
        Self {
            center: Vec2::new(center_x, center_z),
            width,
        }
    }

    /// Half the side length
    pub fn radius(&self) -> f32 {
        self.width * 0.5
    }

    /// Smallest (x, z) corner
    pub fn min(&self) -> Vec2 {
        self.center - Vec2::splat(self.radius())
    }

    /// Largest (x, z) corner
    pub fn max(&self) -> Vec2 {
        self.center + Vec2::splat(self.radius())
    }

    /// Whether (x, z) lies inside the square, edges included
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let r = self.radius();
        x >= self.center.x - r
            && x <= self.center.x + r
            && z >= self.center.y - r
            && z <= self.center.y + r
    }

    /// Float error bound of the edges computed from center and radius
    pub fn rounding_slack(&self) -> f32 {
        (self.center.abs().max_element() + self.width) * 4.0 * f32::EPSILON
    }

    /// Like [`contains`](Self::contains), widened by [`rounding_slack`](Self::rounding_slack)
    pub fn contains_with_slack(&self, x: f32, z: f32) -> bool {
        let r = self.radius() + self.rounding_slack();
        x >= self.center.x - r
            && x <= self.center.x + r
            && z >= self.center.y - r
            && z <= self.center.y + r
    }

    /// Quadrant index holding (x, z), decided against the center only
    pub fn quadrant_of(&self, x: f32, z: f32) -> usize {
        (x >= self.center.x) as usize | ((z >= self.center.y) as usize) << 1
    }

    /// Whether an XZ extent `[min, max]` overlaps the square, edges included
    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        let r = self.radius();
        !(min.x > self.center.x + r
            || max.x < self.center.x - r
            || min.y > self.center.y + r
            || max.y < self.center.y - r)
    }

    /// Child quadrant at half the width
    ///
    /// Index bit 0 selects +X, bit 1 selects +Z:
    /// 0 = -X-Z, 1 = +X-Z, 2 = -X+Z, 3 = +X+Z.
    pub fn quadrant(&self, index: usize) -> QuadBounds {
        let offset = self.width * 0.25;
        let dx = if index & 1 != 0 { offset } else { -offset };
        let dz = if index & 2 != 0 { offset } else { -offset };
        QuadBounds {
            center: self.center + Vec2::new(dx, dz),
            width: self.width * 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners() {
        let bounds = QuadBounds::new(10.0, -4.0, 8.0);
        assert_eq!(bounds.radius(), 4.0);
        assert_eq!(bounds.min(), Vec2::new(6.0, -8.0));
        assert_eq!(bounds.max(), Vec2::new(14.0, 0.0));
    }

    #[test]
    fn test_contains_is_edge_inclusive() {
        let bounds = QuadBounds::new(0.0, 0.0, 4.0);
        assert!(bounds.contains(0.0, 0.0));
        assert!(bounds.contains(2.0, -2.0));
        assert!(!bounds.contains(2.001, 0.0));
        assert!(!bounds.contains(0.0, -2.001));
    }

    #[test]
    fn test_overlaps() {
        let bounds = QuadBounds::new(0.0, 0.0, 4.0);
        // Straddling the -X edge
        assert!(bounds.overlaps(Vec2::new(-5.0, -1.0), Vec2::new(-1.0, 1.0)));
        // Enclosing the whole square
        assert!(bounds.overlaps(Vec2::splat(-10.0), Vec2::splat(10.0)));
        // Touching the edge
        assert!(bounds.overlaps(Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0)));
        assert!(!bounds.overlaps(Vec2::new(2.5, 0.0), Vec2::new(3.0, 1.0)));
        assert!(!bounds.overlaps(Vec2::new(-1.0, -9.0), Vec2::new(1.0, -3.0)));
    }

    #[test]
    fn test_overlaps_rejects_extent_entirely_below_min_x() {
        let bounds = QuadBounds::new(0.0, 0.0, 4.0);
        // max.x < center.x - radius: fully to the -X side
        assert!(!bounds.overlaps(Vec2::new(-6.0, -1.0), Vec2::new(-3.0, 1.0)));
        // max.x > center.x - radius must not be rejected
        assert!(bounds.overlaps(Vec2::new(-6.0, -1.0), Vec2::new(-1.5, 1.0)));
    }

    #[test]
    fn test_quadrants_are_distinct_and_tile_parent() {
        let parent = QuadBounds::new(0.0, 0.0, 8.0);
        let expected = [
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, -2.0),
            Vec2::new(-2.0, 2.0),
            Vec2::new(2.0, 2.0),
        ];
        for (i, center) in expected.iter().enumerate() {
            let child = parent.quadrant(i);
            assert_eq!(child.center, *center);
            assert_eq!(child.width, 4.0);
        }
    }

    #[test]
    fn test_quadrant_of_matches_quadrant_layout() {
        let parent = QuadBounds::new(0.0, 0.0, 8.0);
        assert_eq!(parent.quadrant_of(-1.0, -1.0), 0);
        assert_eq!(parent.quadrant_of(1.0, -1.0), 1);
        assert_eq!(parent.quadrant_of(-1.0, 1.0), 2);
        assert_eq!(parent.quadrant_of(1.0, 1.0), 3);
        // The center itself belongs to +X+Z
        assert_eq!(parent.quadrant_of(0.0, 0.0), 3);
        for i in 0..4 {
            let child = parent.quadrant(i);
            assert_eq!(parent.quadrant_of(child.center.x, child.center.y), i);
        }
    }

    #[test]
    fn test_slack_covers_rounded_seam() {
        let parent = QuadBounds::new(1000.7, -333.3, 3.2);
        let seam = parent.center.x;
        for i in 0..4 {
            let child = parent.quadrant(i);
            assert!(child.contains_with_slack(seam, child.center.y));
        }
        assert!(!parent.contains_with_slack(parent.max().x + 0.01, parent.center.y));
    }
}
