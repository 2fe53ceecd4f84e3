//! Triangle soup from a height map

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use super::heightmap::HeightMap;
use super::mesh::{TerrainMesh, TerrainVertex};

/// Placement of a height map grid in the world
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    /// Distance between neighbouring samples
    pub cell_size: f32,
    /// World (x, z) of sample (0, 0)
    pub origin: [f32; 2],
    /// Number of cells one texture repeat spans
    pub texture_repeat: u32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            origin: [0.0, 0.0],
            texture_repeat: 8,
        }
    }
}

impl GridLayout {
    /// Layout with the grid centred on the world origin
    pub fn centered(width: u32, depth: u32, cell_size: f32) -> Self {
        let half_x = width.saturating_sub(1) as f32 * cell_size * 0.5;
        let half_z = depth.saturating_sub(1) as f32 * cell_size * 0.5;
        Self {
            cell_size,
            origin: [-half_x, -half_z],
            ..Default::default()
        }
    }

    /// World (x, z) of a grid sample
    pub fn world_xz(&self, x: u32, z: u32) -> [f32; 2] {
        [
            self.origin[0] + x as f32 * self.cell_size,
            self.origin[1] + z as f32 * self.cell_size,
        ]
    }
}

/// Height-mapped terrain exposed as a flat triangle list
///
/// Each grid cell becomes two triangles. Normals come from central
/// differences of the neighbouring samples.
pub struct GridTerrain {
    heightmap: HeightMap,
    layout: GridLayout,
}

impl GridTerrain {
    pub fn new(heightmap: HeightMap, layout: GridLayout) -> Self {
        Self { heightmap, layout }
    }

    pub fn heightmap(&self) -> &HeightMap {
        &self.heightmap
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Number of cells (each holding two triangles)
    pub fn cell_count(&self) -> usize {
        self.heightmap.width().saturating_sub(1) as usize
            * self.heightmap.depth().saturating_sub(1) as usize
    }

    fn vertex(&self, x: u32, z: u32) -> TerrainVertex {
        let [wx, wz] = self.layout.world_xz(x, z);
        let (xi, zi) = (x as i64, z as i64);
        let position = Vec3::new(wx, self.heightmap.get(xi, zi), wz);

        // Central differences, one-sided at the borders
        let span_x = ((x + 1).min(self.heightmap.width() - 1) - x.saturating_sub(1)) as f32;
        let span_z = ((z + 1).min(self.heightmap.depth() - 1) - z.saturating_sub(1)) as f32;
        let dh_dx = (self.heightmap.get(xi + 1, zi) - self.heightmap.get(xi - 1, zi))
            / (span_x.max(1.0) * self.layout.cell_size);
        let dh_dz = (self.heightmap.get(xi, zi + 1) - self.heightmap.get(xi, zi - 1))
            / (span_z.max(1.0) * self.layout.cell_size);
        let normal = Vec3::new(-dh_dx, 1.0, -dh_dz).normalize();

        let repeat = self.layout.texture_repeat.max(1) as f32;
        let tex_coord = [x as f32 / repeat, z as f32 / repeat];

        TerrainVertex::new(position, tex_coord, normal)
    }
}

impl TerrainMesh for GridTerrain {
    fn triangle_vertex_count(&self) -> usize {
        self.cell_count() * 6
    }

    fn copy_vertices_into(&self, out: &mut Vec<TerrainVertex>) {
        out.reserve(self.triangle_vertex_count());
        for z in 0..self.heightmap.depth().saturating_sub(1) {
            for x in 0..self.heightmap.width().saturating_sub(1) {
                let v00 = self.vertex(x, z);
                let v10 = self.vertex(x + 1, z);
                let v01 = self.vertex(x, z + 1);
                let v11 = self.vertex(x + 1, z + 1);

                // Both triangles face +Y
                out.extend_from_slice(&[v00, v01, v11, v00, v11, v10]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Triangle;

    fn collect(terrain: &GridTerrain) -> Vec<TerrainVertex> {
        let mut out = Vec::new();
        terrain.copy_vertices_into(&mut out);
        out
    }

    #[test]
    fn test_vertex_count() {
        let terrain = GridTerrain::new(HeightMap::flat(5, 4, 0.0), GridLayout::default());
        assert_eq!(terrain.cell_count(), 12);
        assert_eq!(terrain.triangle_vertex_count(), 72);
        assert_eq!(collect(&terrain).len(), 72);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        let terrain = GridTerrain::new(HeightMap::flat(1, 10, 0.0), GridLayout::default());
        assert_eq!(terrain.triangle_vertex_count(), 0);
        assert!(collect(&terrain).is_empty());
    }

    #[test]
    fn test_centered_layout() {
        let layout = GridLayout::centered(41, 41, 10.0);
        assert_eq!(layout.origin, [-200.0, -200.0]);
        assert_eq!(layout.world_xz(40, 40), [200.0, 200.0]);
    }

    #[test]
    fn test_triangles_face_up() {
        let map = HeightMap::from_fn(4, 4, |x, z| (x * z) as f32 * 0.3);
        let terrain = GridTerrain::new(map, GridLayout::default());
        for tri in collect(&terrain).chunks_exact(3) {
            let triangle = Triangle::new(tri[0].position(), tri[1].position(), tri[2].position());
            assert!(triangle.face_normal().y > 0.0);
        }
    }

    #[test]
    fn test_flat_normals_point_up() {
        let terrain = GridTerrain::new(HeightMap::flat(3, 3, 7.0), GridLayout::default());
        for vertex in collect(&terrain) {
            assert_eq!(vertex.normal, [0.0, 1.0, 0.0]);
            assert_eq!(vertex.position[1], 7.0);
        }
    }

    #[test]
    fn test_slope_normal() {
        // Height rises 1 per cell along X: normal leans towards -X
        let map = HeightMap::from_fn(3, 3, |x, _| x as f32);
        let terrain = GridTerrain::new(map, GridLayout::default());
        let vertex = terrain.vertex(1, 1);
        let expected = Vec3::new(-1.0, 1.0, 0.0).normalize();
        assert!((Vec3::from_array(vertex.normal) - expected).length() < 1e-5);
    }

    #[test]
    fn test_texture_coordinates_repeat() {
        let layout = GridLayout { texture_repeat: 4, ..Default::default() };
        let terrain = GridTerrain::new(HeightMap::flat(9, 9, 0.0), layout);
        assert_eq!(terrain.vertex(4, 8).tex_coord, [1.0, 2.0]);
    }
}
