//! Mathematical utilities and data structures

pub mod rect;
pub mod triangle;
pub mod ray;
pub mod frustum;

pub use rect::QuadBounds;
pub use triangle::Triangle;
pub use ray::Ray;
pub use frustum::{Plane, Frustum};
