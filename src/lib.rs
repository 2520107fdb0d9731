//! # image-dedupe
//!
//! Find visually duplicate images in a collection.
//!
//! Every image is reduced to a difference-hash fingerprint (horizontal
//! intensity gradients on a shrunk grayscale grid, packed into bytes). A
//! BK-tree over all fingerprints answers bounded nearest-neighbor queries,
//! and a single deterministic pass partitions the matches into disjoint
//! duplicate groups, each sorted by descending resolution.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use image_dedupe::{DedupeConfig, DedupeEngine};
//! use std::path::PathBuf;
//!
//! # fn main() -> image_dedupe::Result<()> {
//! let engine = DedupeEngine::new(DedupeConfig::new().with_max_distance(5));
//! let groups = engine.find_duplicates(&[PathBuf::from("./photos")])?;
//! for group in &groups {
//!     println!("keep {}", group.keeper().path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod group;
pub mod hash;
pub mod index;
pub mod logging;
pub mod scan;

// Re-export commonly used types
pub use config::DedupeConfig;
pub use engine::DedupeEngine;
pub use error::{Error, Result};
pub use group::{DuplicateGroup, ImageInfo};
pub use hash::{DifferenceHasher, Fingerprint};
pub use index::{FingerprintIndex, Neighbor};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
