//! Error types for image-dedupe

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for image-dedupe operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to decode image {}: {}", path.display(), source)]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("failed to read dimensions of {}: {}", path.display(), source)]
    Metadata {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    #[error("failed to build hashing worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for image-dedupe operations
pub type Result<T> = std::result::Result<T, Error>;
