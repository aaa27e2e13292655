//! Errors that can abort a render.

use thiserror::Error;

/// Errors that can occur while configuring or running a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown projection type: {0}")]
    UnknownProjection(String),

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Cannot split {pixels} pixels across {workers} workers")]
    InvalidWorkerCount { workers: usize, pixels: usize },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render worker failed: {0}")]
    WorkerFailed(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
