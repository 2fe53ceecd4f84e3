//! Terrain mesh provider: height maps and the triangle soup built from them

pub mod mesh;
pub use mesh::{TerrainMesh, TerrainVertex};

pub mod generator;
pub use generator::{TerrainGenerator, TerrainParams};

pub mod heightmap;
pub use heightmap::HeightMap;

pub mod grid;
pub use grid::{GridLayout, GridTerrain};
