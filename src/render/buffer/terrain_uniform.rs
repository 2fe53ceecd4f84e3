//! GPU uniform buffer for the lit terrain pass

use bytemuck::{Pod, Zeroable};
use crate::core::camera::Camera;
use crate::scene::light::DirectionalLight;

/// Terrain uniform data for GPU (must match shader struct exactly)
/// WGSL vec3 has 16-byte alignment, so position and direction carry padding
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct TerrainUniform {
    /// View-projection matrix (64 bytes, offset 0)
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space (12 bytes, offset 64)
    pub camera_position: [f32; 3],
    /// Padding after position for vec3 alignment (4 bytes, offset 76)
    pub _pos_pad: f32,
    /// Ambient color (16 bytes, offset 80)
    pub ambient: [f32; 4],
    /// Diffuse color (16 bytes, offset 96)
    pub diffuse: [f32; 4],
    /// Specular color (16 bytes, offset 112)
    pub specular: [f32; 4],
    /// Normalized light direction (12 bytes, offset 128)
    pub light_direction: [f32; 3],
    /// Specular exponent, packed into the vec3 tail (4 bytes, offset 140)
    pub specular_power: f32,
}

impl TerrainUniform {
    pub fn new(camera: &Camera, light: &DirectionalLight) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_position: camera.position.to_array(),
            _pos_pad: 0.0,
            ambient: light.ambient,
            diffuse: light.diffuse,
            specular: light.specular,
            light_direction: light.direction().to_array(),
            specular_power: light.specular_power,
        }
    }
}

impl Default for TerrainUniform {
    fn default() -> Self {
        Self::new(&Camera::default(), &DirectionalLight::default())
    }
}

/// GPU buffer for the terrain uniform
pub struct TerrainUniformBuffer {
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl TerrainUniformBuffer {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("terrain_uniform"),
            size: std::mem::size_of::<TerrainUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("terrain_bind_group_layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("terrain_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            bind_group_layout,
            bind_group,
        }
    }

    /// Write camera and light state for the next frame
    pub fn update(&self, queue: &wgpu::Queue, camera: &Camera, light: &DirectionalLight) {
        let uniform = TerrainUniform::new(camera, light);
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&uniform));
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
