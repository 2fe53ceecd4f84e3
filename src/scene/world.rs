//! Terrain world: the per-frame glue between player, camera and quad-tree

use crate::core::Result;
use crate::core::camera::Camera;
use crate::core::player::{Player, PlayerInput};
use crate::core::time::FrameTimer;
use crate::core::types::Vec3;
use crate::math::Frustum;
use crate::quadtree::{QuadTree, RenderStats};
use crate::render::buffer::{LeafUploader, TerrainUniform};
use crate::render::draw::LeafRenderer;
use super::config::SceneConfig;

/// A loaded terrain scene, generic over the leaf buffer type
pub struct TerrainWorld<B> {
    config: SceneConfig,
    tree: QuadTree<B>,
    player: Player,
    camera: Camera,
    timer: FrameTimer,
}

impl<B> TerrainWorld<B> {
    /// Build the terrain and quad-tree, then stand the player on the ground
    pub fn load<U>(config: SceneConfig, uploader: &mut U) -> Result<Self>
    where
        U: LeafUploader<Buffers = B>,
    {
        let terrain = config.build_terrain()?;
        let mut tree = QuadTree::new(config.quadtree);
        tree.init(&terrain, uploader)?;

        let [x, z] = config.player.start;
        let eye_height = config.player.eye_height;
        let mut player = Player::new(Vec3::new(x, eye_height, z));
        player.yaw = config.player.start_yaw.rem_euclid(360.0);
        match tree.height_at(x, z) {
            Some(height) => player.snap_to_ground(height, eye_height),
            None => log::warn!("Player start ({}, {}) is outside the terrain", x, z),
        }

        let mut camera = Camera::from_config(player.position, &config.camera);
        player.apply_to_camera(&mut camera);

        log::info!(
            "Terrain world loaded, player at ({:.1}, {:.1}, {:.1})",
            player.position.x,
            player.position.y,
            player.position.z,
        );

        Ok(Self {
            config,
            tree,
            player,
            camera,
            timer: FrameTimer::new(),
        })
    }

    /// Advance the frame timer, returning the frame time in milliseconds
    pub fn tick(&mut self) -> f32 {
        self.timer.tick();
        self.timer.delta_ms()
    }

    /// Apply one frame of input and follow the ground.
    ///
    /// Returns the ground height under the player, or `None` off the terrain
    /// (the player keeps its previous height).
    pub fn update(&mut self, input: &PlayerInput, frame_time_ms: f32) -> Option<f32> {
        self.player.update(input, frame_time_ms);

        let ground = self.tree.height_at(self.player.position.x, self.player.position.z);
        if let Some(height) = ground {
            self.player.snap_to_ground(height, self.config.player.eye_height);
        }

        self.player.apply_to_camera(&mut self.camera);
        ground
    }

    /// View frustum for the current camera, with the far plane at the camera's far distance
    pub fn frustum(&self) -> Frustum {
        Frustum::construct(
            self.camera.far,
            &self.camera.projection_matrix(),
            &self.camera.view_matrix(),
        )
    }

    /// Cull and draw the terrain for the current camera
    pub fn render<R>(&mut self, renderer: &mut R) -> RenderStats
    where
        R: LeafRenderer<B> + ?Sized,
    {
        let frustum = self.frustum();
        self.tree.render(&frustum, renderer)
    }

    /// Shader constants for the current camera and light
    pub fn terrain_uniform(&self) -> TerrainUniform {
        TerrainUniform::new(&self.camera, &self.config.light)
    }

    /// Release the quad-tree and its buffers
    pub fn shutdown(&mut self) {
        self.tree.release();
        log::info!("Terrain world shut down after {} frames", self.timer.frame_count());
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn tree(&self) -> &QuadTree<B> {
        &self.tree
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}
