//! Leaf geometry buffers
//!
//! The quad-tree hands every leaf's vertex and index arrays to a
//! [`LeafUploader`] and keeps whatever buffer handle it returns. The wgpu
//! uploader creates device buffers; the CPU uploader keeps host copies for
//! headless runs and tests.

use wgpu::util::DeviceExt;
use crate::core::{Error, Result};
use crate::terrain::TerrainVertex;

/// Turns leaf geometry into renderable buffers
pub trait LeafUploader {
    /// Buffer handle owned by a leaf
    type Buffers;

    /// Upload one leaf's vertices and triangle-list indices
    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) -> Result<Self::Buffers>;
}

/// Vertex + index buffers on the GPU
pub struct GpuLeafBuffers {
    pub vertex: wgpu::Buffer,
    pub index: wgpu::Buffer,
}

/// Creates leaf buffers on a wgpu device
pub struct WgpuLeafUploader<'a> {
    device: &'a wgpu::Device,
    uploaded_bytes: u64,
}

impl<'a> WgpuLeafUploader<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self {
            device,
            uploaded_bytes: 0,
        }
    }

    /// Total bytes uploaded so far
    pub fn uploaded_bytes(&self) -> u64 {
        self.uploaded_bytes
    }
}

impl LeafUploader for WgpuLeafUploader<'_> {
    type Buffers = GpuLeafBuffers;

    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) -> Result<GpuLeafBuffers> {
        let vertex_bytes: &[u8] = bytemuck::cast_slice(vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(indices);

        let max_buffer_size = self.device.limits().max_buffer_size;
        let largest = vertex_bytes.len().max(index_bytes.len()) as u64;
        if largest > max_buffer_size {
            return Err(Error::Gpu(format!(
                "leaf buffer of {} bytes exceeds max_buffer_size {}",
                largest, max_buffer_size
            )));
        }

        let vertex = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_leaf_vertices"),
            contents: vertex_bytes,
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("terrain_leaf_indices"),
            contents: index_bytes,
            usage: wgpu::BufferUsages::INDEX,
        });

        self.uploaded_bytes += (vertex_bytes.len() + index_bytes.len()) as u64;

        Ok(GpuLeafBuffers { vertex, index })
    }
}

/// Host-side copy of a leaf's buffers
#[derive(Debug, Clone, PartialEq)]
pub struct CpuLeafBuffers {
    pub vertices: Vec<TerrainVertex>,
    pub indices: Vec<u32>,
}

impl CpuLeafBuffers {
    /// Bytes a GPU upload of these arrays would take
    pub fn size_bytes(&self) -> usize {
        std::mem::size_of_val(self.vertices.as_slice()) + std::mem::size_of_val(self.indices.as_slice())
    }
}

/// Keeps leaf geometry in host memory
#[derive(Debug, Default)]
pub struct CpuLeafUploader {
    uploads: usize,
}

impl CpuLeafUploader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of leaves uploaded
    pub fn uploads(&self) -> usize {
        self.uploads
    }
}

impl LeafUploader for CpuLeafUploader {
    type Buffers = CpuLeafBuffers;

    fn upload(&mut self, vertices: &[TerrainVertex], indices: &[u32]) -> Result<CpuLeafBuffers> {
        let mut vertex_copy = Vec::new();
        vertex_copy
            .try_reserve_exact(vertices.len())
            .map_err(|e| Error::Allocation(format!("leaf vertex buffer: {e}")))?;
        vertex_copy.extend_from_slice(vertices);

        let mut index_copy = Vec::new();
        index_copy
            .try_reserve_exact(indices.len())
            .map_err(|e| Error::Allocation(format!("leaf index buffer: {e}")))?;
        index_copy.extend_from_slice(indices);

        self.uploads += 1;
        Ok(CpuLeafBuffers {
            vertices: vertex_copy,
            indices: index_copy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_cpu_upload_copies_arrays() {
        let vertices = vec![
            TerrainVertex::new(Vec3::ZERO, [0.0, 0.0], Vec3::Y),
            TerrainVertex::new(Vec3::Z, [0.0, 1.0], Vec3::Y),
            TerrainVertex::new(Vec3::new(1.0, 0.0, 1.0), [1.0, 1.0], Vec3::Y),
        ];
        let indices = vec![0, 1, 2];

        let mut uploader = CpuLeafUploader::new();
        let buffers = uploader.upload(&vertices, &indices).unwrap();

        assert_eq!(buffers.vertices, vertices);
        assert_eq!(buffers.indices, indices);
        assert_eq!(uploader.uploads(), 1);
        assert_eq!(buffers.size_bytes(), 3 * 32 + 3 * 4);
    }
}
