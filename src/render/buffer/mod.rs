//! GPU buffer management

pub mod leaf_buffer;
pub mod terrain_uniform;

pub use leaf_buffer::{LeafUploader, CpuLeafBuffers, CpuLeafUploader, GpuLeafBuffers, WgpuLeafUploader};
pub use terrain_uniform::{TerrainUniform, TerrainUniformBuffer};
