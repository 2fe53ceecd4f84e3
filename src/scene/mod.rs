//! Scene configuration and the terrain world

pub mod config;
pub mod light;
pub mod world;

pub use config::{SceneConfig, TerrainSource};
pub use light::DirectionalLight;
pub use world::TerrainWorld;
