//! terrace - height-mapped terrain with quad-tree culling

pub mod core;
pub mod math;
pub mod terrain;
pub mod quadtree;
pub mod render;
pub mod scene;
