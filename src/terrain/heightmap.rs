//! Regular grids of terrain heights

use std::path::Path;

use crate::core::Result;
use super::generator::TerrainGenerator;
use super::grid::GridLayout;

/// Row-major grid of heights: `width` samples along X, `depth` rows along Z
#[derive(Clone, Debug, PartialEq)]
pub struct HeightMap {
    width: u32,
    depth: u32,
    heights: Vec<f32>,
}

impl HeightMap {
    /// Constant-height grid
    pub fn flat(width: u32, depth: u32, height: f32) -> Self {
        Self::from_fn(width, depth, |_, _| height)
    }

    /// Grid sampled from `f(x_index, z_index)`
    pub fn from_fn(width: u32, depth: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut heights = Vec::with_capacity(width as usize * depth as usize);
        for z in 0..depth {
            for x in 0..width {
                heights.push(f(x, z));
            }
        }
        Self { width, depth, heights }
    }

    /// Grid sampled from procedural noise at the world positions of `layout`
    pub fn from_generator(
        width: u32,
        depth: u32,
        generator: &TerrainGenerator,
        layout: &GridLayout,
    ) -> Self {
        Self::from_fn(width, depth, |x, z| {
            let [wx, wz] = layout.world_xz(x, z);
            generator.height_at(wx, wz)
        })
    }

    /// Grid from a grayscale image; black is 0, white is `height_scale`
    pub fn from_luma(image: &image::GrayImage, height_scale: f32) -> Self {
        Self::from_fn(image.width(), image.height(), |x, z| {
            image.get_pixel(x, z).0[0] as f32 / 255.0 * height_scale
        })
    }

    /// Load a height map image from disk (any format the `image` crate reads)
    pub fn from_image(path: impl AsRef<Path>, height_scale: f32) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)?.to_luma8();
        log::info!(
            "Loaded height map {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_luma(&image, height_scale))
    }

    /// Number of samples along X
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of samples along Z
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Height at grid coordinate, clamped to the grid edges
    pub fn get(&self, x: i64, z: i64) -> f32 {
        if self.heights.is_empty() {
            return 0.0;
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let z = z.clamp(0, self.depth as i64 - 1) as usize;
        self.heights[z * self.width as usize + x]
    }

    /// Lowest and highest sample
    pub fn height_range(&self) -> (f32, f32) {
        self.heights.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
            (lo.min(h), hi.max(h))
        })
    }
}
