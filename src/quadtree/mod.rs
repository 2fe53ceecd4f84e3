//! Quad-tree spatial partition of a terrain triangle soup
//!
//! The tree splits the terrain's XZ footprint into squares until each leaf
//! holds at most `max_triangles_per_leaf` triangles. Every frame it culls
//! whole subtrees against the view frustum and draws the surviving leaves;
//! between frames it answers ground-height queries for the player.
//!
//! A triangle is assigned to every leaf whose square its XZ bounding box
//! overlaps, so triangles straddling a boundary are drawn once per leaf.

mod builder;
mod node;

pub use node::{QuadLeaf, QuadNode};

use serde::{Deserialize, Serialize};
use crate::core::{Error, Result};
use crate::math::{Frustum, QuadBounds};
use crate::render::buffer::LeafUploader;
use crate::render::draw::LeafRenderer;
use crate::terrain::TerrainMesh;
use builder::TreeBuilder;

/// Default leaf capacity
pub const MAX_TRIANGLES_PER_LEAF: usize = 10_000;

/// Default recursion limit
pub const MAX_DEPTH: u32 = 16;

/// Build parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadTreeConfig {
    /// Nodes with more triangles than this subdivide
    pub max_triangles_per_leaf: usize,
    /// Nodes at this depth become leaves regardless of count
    pub max_depth: u32,
}

impl Default for QuadTreeConfig {
    fn default() -> Self {
        Self {
            max_triangles_per_leaf: MAX_TRIANGLES_PER_LEAF,
            max_depth: MAX_DEPTH,
        }
    }
}

/// Result of one render traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub visible_leaves: u32,
    pub visible_triangles: u32,
    /// Subtrees rejected by the frustum
    pub culled_nodes: u32,
}

/// Structure of a built tree
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuadTreeStats {
    pub node_count: usize,
    pub leaf_count: usize,
    /// Depth of the deepest node (root = 0)
    pub depth: u32,
    /// Sum of leaf triangle counts (straddling triangles count once per leaf)
    pub leaf_triangles: usize,
    pub root_bounds: Option<QuadBounds>,
}

/// Quad-tree over terrain geometry, generic over the leaf buffer type
pub struct QuadTree<B> {
    config: QuadTreeConfig,
    root: Option<Box<QuadNode<B>>>,
    visible_triangles: u32,
}

impl<B> Default for QuadTree<B> {
    fn default() -> Self {
        Self::new(QuadTreeConfig::default())
    }
}

impl<B> QuadTree<B> {
    /// Create an empty tree
    pub fn new(config: QuadTreeConfig) -> Self {
        Self {
            config,
            root: None,
            visible_triangles: 0,
        }
    }

    pub fn config(&self) -> &QuadTreeConfig {
        &self.config
    }

    /// Build the tree from a mesh provider, replacing any previous contents.
    ///
    /// On error the tree is left empty.
    pub fn init<M, U>(&mut self, mesh: &M, uploader: &mut U) -> Result<()>
    where
        M: TerrainMesh + ?Sized,
        U: LeafUploader<Buffers = B>,
    {
        self.release();

        let vertex_count = mesh.triangle_vertex_count();
        if vertex_count % 3 != 0 {
            return Err(Error::InvalidMesh(format!(
                "vertex count {} is not a multiple of 3",
                vertex_count
            )));
        }

        let mut vertices = Vec::new();
        vertices
            .try_reserve_exact(vertex_count)
            .map_err(|e| Error::Allocation(format!("terrain vertex array ({vertex_count} vertices): {e}")))?;
        mesh.copy_vertices_into(&mut vertices);
        if vertices.len() != vertex_count {
            return Err(Error::InvalidMesh(format!(
                "mesh reported {} vertices but provided {}",
                vertex_count,
                vertices.len()
            )));
        }

        if vertices.is_empty() {
            log::warn!("Terrain mesh is empty, quad-tree has no nodes");
            return Ok(());
        }

        let triangles = builder::collect_triangles(&vertices)?;
        let bounds = builder::root_bounds(&vertices);

        let mut tree_builder = TreeBuilder::new(&vertices, &triangles, &self.config, uploader);
        let root = tree_builder.build(bounds)?;
        let counters = tree_builder.counters();

        log::info!(
            "Quad-tree built: {} triangles, {} nodes, {} leaves, depth {}, root ({}, {}) width {}",
            triangles.len(),
            counters.nodes,
            counters.leaves,
            counters.max_depth,
            bounds.center.x,
            bounds.center.y,
            bounds.width,
        );
        if counters.depth_limited_leaves > 0 {
            log::warn!(
                "{} leaves exceed {} triangles because of the depth limit",
                counters.depth_limited_leaves,
                self.config.max_triangles_per_leaf,
            );
        }
        if counters.inseparable_leaves > 0 {
            log::warn!(
                "{} leaves exceed {} triangles because subdivision could not separate them",
                counters.inseparable_leaves,
                self.config.max_triangles_per_leaf,
            );
        }

        self.root = root;
        Ok(())
    }

    /// Draw every leaf whose node passes the frustum test
    pub fn render<R>(&mut self, frustum: &Frustum, renderer: &mut R) -> RenderStats
    where
        R: LeafRenderer<B> + ?Sized,
    {
        let mut stats = RenderStats::default();
        if let Some(root) = &self.root {
            root.render(frustum, renderer, &mut stats);
        }
        self.visible_triangles = stats.visible_triangles;
        stats
    }

    /// Triangles drawn by the most recent [`render`](Self::render)
    pub fn poly_count(&self) -> u32 {
        self.visible_triangles
    }

    /// Terrain height under (x, z), or `None` outside the terrain
    pub fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let root = self.root.as_ref()?;
        if !root.bounds().contains(x, z) {
            return None;
        }
        root.height_at(x, z)
    }

    /// Drop all nodes and their buffers. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(root) = self.root.take() {
            let released = root.release();
            log::debug!("Released {} quad-tree nodes", released);
        }
        self.visible_triangles = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn root(&self) -> Option<&QuadNode<B>> {
        self.root.as_deref()
    }

    /// Square covered by the root node
    pub fn bounds(&self) -> Option<QuadBounds> {
        self.root.as_ref().map(|root| root.bounds())
    }

    pub fn stats(&self) -> QuadTreeStats {
        let mut stats = QuadTreeStats {
            root_bounds: self.bounds(),
            ..Default::default()
        };

        let mut stack: Vec<(&QuadNode<B>, u32)> = self.root().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            stats.node_count += 1;
            stats.depth = stats.depth.max(depth);
            if node.has_children() {
                stack.extend(node.children().map(|child| (child, depth + 1)));
            } else {
                stats.leaf_count += 1;
                stats.leaf_triangles += node.triangle_count() as usize;
            }
        }

        stats
    }

    /// Iterate the true leaves (nodes without children)
    pub fn leaves(&self) -> Leaves<'_, B> {
        Leaves {
            stack: self.root().into_iter().collect(),
        }
    }
}

impl<B> Drop for QuadTree<B> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Depth-first iterator over leaf nodes
pub struct Leaves<'a, B> {
    stack: Vec<&'a QuadNode<B>>,
}

impl<'a, B> Iterator for Leaves<'a, B> {
    type Item = &'a QuadNode<B>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.has_children() {
                self.stack.extend(node.children());
            } else {
                return Some(node);
            }
        }
        None
    }
}
