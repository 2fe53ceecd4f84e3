//! Error types for the terrace engine

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("Allocation failed: {0}")]
    Allocation(String),

    #[error("Invalid terrain mesh: {0}")]
    InvalidMesh(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Height map error: {0}")]
    Image(#[from] image::ImageError),
}
