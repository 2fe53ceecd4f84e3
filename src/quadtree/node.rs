//! Quad-tree nodes
//!
//! Every node exclusively owns its children. Only true leaves (no children)
//! carry geometry: the retained world-space triangles used for height
//! queries and the uploaded draw buffers.

use crate::core::types::Vec3;
use crate::math::{Frustum, QuadBounds, Ray, Triangle};
use crate::math::ray::RAY_EPSILON;
use crate::render::draw::LeafRenderer;
use super::RenderStats;

/// Geometry owned by a leaf
pub struct QuadLeaf<B> {
    triangles: Vec<Triangle>,
    buffers: B,
}

impl<B> QuadLeaf<B> {
    pub(crate) fn new(triangles: Vec<Triangle>, buffers: B) -> Self {
        Self { triangles, buffers }
    }

    /// World-space triangles assigned to this leaf
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Uploaded vertex/index buffers
    pub fn buffers(&self) -> &B {
        &self.buffers
    }

    /// Height of the first triangle hit by a vertical ray through (x, z)
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let ray = Ray::vertical(x, z);
        self.triangles
            .iter()
            .find_map(|triangle| ray.intersect_triangle(triangle, RAY_EPSILON))
            .map(|point| point.y)
    }
}

/// A node covering a square of the terrain
pub struct QuadNode<B> {
    bounds: QuadBounds,
    triangle_count: u32,
    // Declared before `leaf` so children drop before this node's buffers
    children: [Option<Box<QuadNode<B>>>; 4],
    leaf: Option<QuadLeaf<B>>,
}

impl<B> QuadNode<B> {
    pub(crate) fn leaf(bounds: QuadBounds, leaf: QuadLeaf<B>) -> Self {
        Self {
            bounds,
            triangle_count: leaf.triangles.len() as u32,
            children: Default::default(),
            leaf: Some(leaf),
        }
    }

    pub(crate) fn branch(
        bounds: QuadBounds,
        triangle_count: u32,
        children: [Option<Box<QuadNode<B>>>; 4],
    ) -> Self {
        Self {
            bounds,
            triangle_count,
            children,
            leaf: None,
        }
    }

    /// Square covered by this node
    pub fn bounds(&self) -> QuadBounds {
        self.bounds
    }

    /// Triangles whose XZ bounding box overlaps this node
    pub fn triangle_count(&self) -> u32 {
        self.triangle_count
    }

    /// Child slot by quadrant (0 = -X-Z, 1 = +X-Z, 2 = -X+Z, 3 = +X+Z)
    pub fn child(&self, quadrant: usize) -> Option<&QuadNode<B>> {
        self.children.get(quadrant)?.as_deref()
    }

    /// Materialized children
    pub fn children(&self) -> impl Iterator<Item = &QuadNode<B>> {
        self.children.iter().flatten().map(|child| child.as_ref())
    }

    pub fn has_children(&self) -> bool {
        self.children.iter().any(Option::is_some)
    }

    /// Leaf geometry, present only on nodes without children
    pub fn leaf_data(&self) -> Option<&QuadLeaf<B>> {
        self.leaf.as_ref()
    }

    pub(crate) fn render<R>(&self, frustum: &Frustum, renderer: &mut R, stats: &mut RenderStats)
    where
        R: LeafRenderer<B> + ?Sized,
    {
        // Vertical extent is ignored: the cube sits at y = 0
        let center = Vec3::new(self.bounds.center.x, 0.0, self.bounds.center.y);
        if !frustum.check_cube(center, self.bounds.radius()) {
            stats.culled_nodes += 1;
            return;
        }

        if self.has_children() {
            for child in self.children() {
                child.render(frustum, renderer, stats);
            }
            return;
        }

        if let Some(leaf) = &self.leaf {
            renderer.draw_leaf(&leaf.buffers, self.triangle_count * 3);
            stats.visible_leaves += 1;
            stats.visible_triangles += self.triangle_count;
        }
    }

    /// Height under (x, z), assuming the caller already placed the point in
    /// this node's square
    pub(crate) fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        if !self.has_children() {
            return self.leaf.as_ref()?.height_at(x, z);
        }

        // Child squares are rounded independently, so a seam point may fall
        // outside all of them; the center comparison always picks one.
        let preferred = self.bounds.quadrant_of(x, z);
        if let Some(height) = self.child(preferred).and_then(|child| child.height_at(x, z)) {
            return Some(height);
        }

        self.children
            .iter()
            .enumerate()
            .filter(|&(quadrant, _)| quadrant != preferred)
            .filter_map(|(_, child)| child.as_deref())
            .filter(|child| child.bounds.contains_with_slack(x, z))
            .find_map(|child| child.height_at(x, z))
    }

    /// Drop the subtree children-first, returning the number of nodes released
    pub(crate) fn release(self: Box<Self>) -> usize {
        let QuadNode { children, leaf, .. } = *self;
        let released: usize = children
            .into_iter()
            .flatten()
            .map(QuadNode::release)
            .sum();
        drop(leaf);
        released + 1
    }
}
