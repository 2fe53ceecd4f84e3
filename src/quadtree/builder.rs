//! Recursive quad-tree construction
//!
//! Each node counts the triangles whose XZ bounding box overlaps its square.
//! Nodes with more than `max_triangles_per_leaf` triangles split into four
//! quadrants, unless no quadrant would hold fewer triangles than the node
//! itself; everything else becomes a leaf whose geometry is uploaded
//! through a [`LeafUploader`].

use crate::core::{Error, Result};
use crate::math::{QuadBounds, Triangle};
use crate::render::buffer::LeafUploader;
use crate::terrain::TerrainVertex;
use super::QuadTreeConfig;
use super::node::{QuadLeaf, QuadNode};

/// Counters gathered while building
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BuildCounters {
    pub nodes: usize,
    pub leaves: usize,
    pub depth_limited_leaves: usize,
    /// Over-full leaves whose triangles no quadrant could separate
    pub inseparable_leaves: usize,
    pub max_depth: u32,
}

/// Builds a tree over a triangle soup, borrowing the full vertex array
pub(crate) struct TreeBuilder<'a, U: LeafUploader> {
    vertices: &'a [TerrainVertex],
    triangles: &'a [Triangle],
    config: &'a QuadTreeConfig,
    uploader: &'a mut U,
    counters: BuildCounters,
}

impl<'a, U: LeafUploader> TreeBuilder<'a, U> {
    pub fn new(
        vertices: &'a [TerrainVertex],
        triangles: &'a [Triangle],
        config: &'a QuadTreeConfig,
        uploader: &'a mut U,
    ) -> Self {
        Self {
            vertices,
            triangles,
            config,
            uploader,
            counters: BuildCounters::default(),
        }
    }

    pub fn counters(&self) -> BuildCounters {
        self.counters
    }

    /// Build the whole tree from the root square
    pub fn build(&mut self, root: QuadBounds) -> Result<Option<Box<QuadNode<U::Buffers>>>> {
        let candidates: Vec<u32> = (0..self.triangles.len() as u32).collect();
        let contained = self.overlapping(root, &candidates);
        self.build_node(root, contained, 0)
    }

    /// Candidates whose XZ bounding box overlaps `bounds`
    fn overlapping(&self, bounds: QuadBounds, candidates: &[u32]) -> Vec<u32> {
        candidates
            .iter()
            .copied()
            .filter(|&i| {
                let triangle = &self.triangles[i as usize];
                bounds.overlaps(triangle.xz_min(), triangle.xz_max())
            })
            .collect()
    }

    fn build_node(
        &mut self,
        bounds: QuadBounds,
        contained: Vec<u32>,
        depth: u32,
    ) -> Result<Option<Box<QuadNode<U::Buffers>>>> {
        if contained.is_empty() {
            return Ok(None);
        }

        self.counters.nodes += 1;
        self.counters.max_depth = self.counters.max_depth.max(depth);

        if contained.len() > self.config.max_triangles_per_leaf {
            if depth < self.config.max_depth {
                // A child square lies inside its parent, so filtering the
                // parent's set gives the same result as scanning every triangle.
                let quadrants: [Vec<u32>; 4] =
                    std::array::from_fn(|q| self.overlapping(bounds.quadrant(q), &contained));

                // Splitting only helps if some child ends up with fewer triangles
                let separates = quadrants
                    .iter()
                    .any(|set| !set.is_empty() && set.len() < contained.len());

                if separates {
                    let triangle_count = contained.len() as u32;
                    drop(contained);
                    let mut children: [Option<Box<QuadNode<U::Buffers>>>; 4] = Default::default();
                    for (quadrant, (slot, set)) in children.iter_mut().zip(quadrants).enumerate() {
                        *slot = self.build_node(bounds.quadrant(quadrant), set, depth + 1)?;
                    }
                    return Ok(Some(Box::new(QuadNode::branch(bounds, triangle_count, children))));
                }

                self.counters.inseparable_leaves += 1;
                log::warn!(
                    "No quadrant of ({}, {}) width {} separates its {} triangles, keeping them as a leaf",
                    bounds.center.x,
                    bounds.center.y,
                    bounds.width,
                    contained.len(),
                );
            } else {
                self.counters.depth_limited_leaves += 1;
                log::warn!(
                    "Depth limit {} reached at ({}, {}) with {} triangles, forcing a leaf",
                    self.config.max_depth,
                    bounds.center.x,
                    bounds.center.y,
                    contained.len(),
                );
            }
        }

        let leaf = self.build_leaf(&contained)?;
        self.counters.leaves += 1;
        log::debug!(
            "Leaf at ({}, {}) width {}: {} triangles",
            bounds.center.x,
            bounds.center.y,
            bounds.width,
            contained.len(),
        );
        Ok(Some(Box::new(QuadNode::leaf(bounds, leaf))))
    }

    fn build_leaf(&mut self, contained: &[u32]) -> Result<QuadLeaf<U::Buffers>> {
        let vertex_count = contained.len() * 3;

        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(vertex_count)
            .map_err(|e| Error::Allocation(format!("leaf vertex array ({vertex_count} vertices): {e}")))?;
        let mut triangles = Vec::new();
        triangles
            .try_reserve_exact(contained.len())
            .map_err(|e| Error::Allocation(format!("leaf triangle list ({} triangles): {e}", contained.len())))?;

        for &i in contained {
            let start = i as usize * 3;
            vertices.extend_from_slice(&self.vertices[start..start + 3]);
            triangles.push(self.triangles[i as usize]);
        }

        let indices: Vec<u32> = (0..vertex_count as u32).collect();
        let buffers = self.uploader.upload(&vertices, &indices)?;

        Ok(QuadLeaf::new(triangles, buffers))
    }
}

/// Root square of a vertex set: centered on the mean XZ position, wide enough
/// to cover the furthest vertex on either axis.
///
/// The half-width is padded by the edge rounding error so the outermost
/// vertices pass [`QuadBounds::contains`].
pub(crate) fn root_bounds(vertices: &[TerrainVertex]) -> QuadBounds {
    if vertices.is_empty() {
        return QuadBounds::new(0.0, 0.0, 0.0);
    }

    let count = vertices.len() as f64;
    let (sum_x, sum_z) = vertices.iter().fold((0.0f64, 0.0f64), |(x, z), v| {
        (x + v.position[0] as f64, z + v.position[2] as f64)
    });
    let center_x = (sum_x / count) as f32;
    let center_z = (sum_z / count) as f32;

    let max_deviation = vertices.iter().fold(0.0f32, |max, v| {
        let dx = (v.position[0] - center_x).abs();
        let dz = (v.position[2] - center_z).abs();
        max.max(dx).max(dz)
    });

    let tight = QuadBounds::new(center_x, center_z, max_deviation * 2.0);
    QuadBounds::new(center_x, center_z, (max_deviation + tight.rounding_slack()) * 2.0)
}

/// Group a triangle soup into triangles, rejecting non-finite positions
pub(crate) fn collect_triangles(vertices: &[TerrainVertex]) -> Result<Vec<Triangle>> {
    let mut triangles = Vec::new();
    triangles
        .try_reserve_exact(vertices.len() / 3)
        .map_err(|e| Error::Allocation(format!("triangle list ({} triangles): {e}", vertices.len() / 3)))?;

    for (index, chunk) in vertices.chunks_exact(3).enumerate() {
        let [a, b, c] = [chunk[0].position(), chunk[1].position(), chunk[2].position()];
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(Error::InvalidMesh(format!("triangle {index} has a non-finite vertex position")));
        }
        triangles.push(Triangle::new(a, b, c));
    }

    Ok(triangles)
}
