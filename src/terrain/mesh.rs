//! Vertex layout and the mesh provider contract consumed by the quad-tree

use bytemuck::{Pod, Zeroable};

use crate::core::types::Vec3;

/// Terrain vertex (32 bytes, matches the terrain vertex shader input)
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// World-space position
    pub position: [f32; 3],
    /// Texture coordinate
    pub tex_coord: [f32; 2],
    /// Unit surface normal
    pub normal: [f32; 3],
}

impl TerrainVertex {
    pub fn new(position: Vec3, tex_coord: [f32; 2], normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            tex_coord,
            normal: normal.to_array(),
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Vertex buffer layout for `wgpu` pipelines
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x2,
            2 => Float32x3
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<TerrainVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Source of terrain geometry
///
/// Vertices form a flat triangle list: triangle `i` is vertices
/// `3i, 3i + 1, 3i + 2`. There are no shared or indexed vertices.
pub trait TerrainMesh {
    /// Total number of vertices (three per triangle)
    fn triangle_vertex_count(&self) -> usize;

    /// Append every vertex to `out`, in triangle order
    fn copy_vertices_into(&self, out: &mut Vec<TerrainVertex>);
}

/// A triangle list held in memory
impl TerrainMesh for [TerrainVertex] {
    fn triangle_vertex_count(&self) -> usize {
        self.len()
    }

    fn copy_vertices_into(&self, out: &mut Vec<TerrainVertex>) {
        out.extend_from_slice(self);
    }
}

impl TerrainMesh for Vec<TerrainVertex> {
    fn triangle_vertex_count(&self) -> usize {
        self.len()
    }

    fn copy_vertices_into(&self, out: &mut Vec<TerrainVertex>) {
        out.extend_from_slice(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        // Must match the 32-byte stride of the vertex layout
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 32);
        assert_eq!(TerrainVertex::layout().array_stride, 32);
    }

    #[test]
    fn test_vec_provider() {
        let vertices = vec![TerrainVertex::new(Vec3::ONE, [0.5, 0.5], Vec3::Y); 6];
        assert_eq!(vertices.triangle_vertex_count(), 6);

        let mut out = Vec::new();
        vertices.copy_vertices_into(&mut out);
        assert_eq!(out, vertices);
        assert_eq!(out[0].position(), Vec3::ONE);
    }
}
