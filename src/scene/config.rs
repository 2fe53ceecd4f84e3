//! Scene configuration
//!
//! Everything needed to build a terrain world: where the heights come from,
//! how the grid is placed, quad-tree limits, camera, player and light. All
//! sections fall back to their defaults, so a JSON file only lists what it
//! changes.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::core::Result;
use crate::core::camera::CameraConfig;
use crate::core::player::PlayerConfig;
use crate::quadtree::QuadTreeConfig;
use crate::terrain::{GridLayout, GridTerrain, HeightMap, TerrainGenerator, TerrainParams};
use super::light::DirectionalLight;

fn default_image_height_scale() -> f32 {
    32.0
}

/// Where terrain heights come from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerrainSource {
    /// Constant height
    Flat {
        width: u32,
        depth: u32,
        #[serde(default)]
        height: f32,
    },
    /// Fractal noise
    Noise {
        width: u32,
        depth: u32,
        #[serde(default)]
        params: TerrainParams,
    },
    /// Grayscale image, white mapped to `height_scale`
    Image {
        path: PathBuf,
        #[serde(default = "default_image_height_scale")]
        height_scale: f32,
    },
}

impl Default for TerrainSource {
    fn default() -> Self {
        Self::Noise {
            width: 257,
            depth: 257,
            params: TerrainParams::default(),
        }
    }
}

impl TerrainSource {
    /// Produce the height map, sampling noise at the layout's world positions
    pub fn heightmap(&self, layout: &GridLayout) -> Result<HeightMap> {
        match self {
            Self::Flat { width, depth, height } => Ok(HeightMap::flat(*width, *depth, *height)),
            Self::Noise { width, depth, params } => {
                let generator = TerrainGenerator::new(params.clone());
                Ok(HeightMap::from_generator(*width, *depth, &generator, layout))
            }
            Self::Image { path, height_scale } => HeightMap::from_image(path, *height_scale),
        }
    }
}

/// Configuration for a terrain scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub terrain: TerrainSource,
    pub layout: GridLayout,
    pub quadtree: QuadTreeConfig,
    pub camera: CameraConfig,
    pub player: PlayerConfig,
    pub light: DirectionalLight,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            terrain: TerrainSource::default(),
            layout: GridLayout::centered(257, 257, 1.0),
            quadtree: QuadTreeConfig::default(),
            camera: CameraConfig::default(),
            player: PlayerConfig::default(),
            light: DirectionalLight::default(),
        }
    }
}

impl SceneConfig {
    /// Load from a JSON file. Relative image paths resolve against the
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut config: SceneConfig = serde_json::from_str(&json)?;

        if let TerrainSource::Image { path: image_path, .. } = &mut config.terrain {
            if image_path.is_relative() {
                if let Some(dir) = path.parent() {
                    *image_path = dir.join(&*image_path);
                }
            }
        }

        log::info!("Loaded scene config {}", path.display());
        Ok(config)
    }

    /// Save as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, json)?;
        Ok(())
    }

    /// Build the terrain mesh provider
    pub fn build_terrain(&self) -> Result<GridTerrain> {
        let heightmap = self.terrain.heightmap(&self.layout)?;
        let (min, max) = heightmap.height_range();
        log::info!(
            "Terrain grid {}x{} (cell {}), heights {:.2}..{:.2}",
            heightmap.width(),
            heightmap.depth(),
            self.layout.cell_size,
            min,
            max,
        );
        Ok(GridTerrain::new(heightmap, self.layout.clone()))
    }
}
