//! Rendering system and GPU interfaces

pub mod context;
pub mod buffer;
pub mod draw;
pub mod pipeline;

pub use context::GpuContext;
pub use draw::{DrawCounter, LeafRenderer};
