//! Deduplication engine tying the pipeline together.

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::config::DedupeConfig;
use crate::error::Result;
use crate::group::{self, DuplicateGroup};
use crate::hash::{DifferenceHasher, Fingerprint};
use crate::index::FingerprintIndex;
use crate::scan;

/// Main duplicate detection engine.
///
/// One call to [`find_duplicates`](DedupeEngine::find_duplicates) runs the
/// whole pipeline: expand inputs, fingerprint every image, build the metric
/// index over the complete batch, assemble disjoint groups, resolve each
/// group to metadata sorted by resolution. Nothing persists between calls.
#[derive(Debug)]
pub struct DedupeEngine {
    config: DedupeConfig,
}

impl DedupeEngine {
    /// Create an engine with the given configuration
    pub fn new(config: DedupeConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default settings
    pub fn with_defaults() -> Self {
        Self::new(DedupeConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &DedupeConfig {
        &self.config
    }

    /// Find duplicate groups among the images reachable from `inputs`.
    ///
    /// Group order is discovery order: ascending position of the image that
    /// seeded each group. Within a group images are sorted by descending
    /// resolution, filename ascending on ties.
    pub fn find_duplicates(&self, inputs: &[PathBuf]) -> Result<Vec<DuplicateGroup>> {
        let files = scan::collect_image_files(inputs);
        if files.is_empty() {
            info!("no image files found");
            return Ok(Vec::new());
        }

        info!(
            "hashing {} images ({} worker threads)",
            files.len(),
            self.config.concurrency
        );
        let fingerprints = self.hash_all(&files)?;

        // All fingerprints exist past this point; indexing never overlaps
        // with hashing.
        let index = FingerprintIndex::build(&fingerprints);
        debug!("index built over {} fingerprints", index.len());

        let members = group::assemble_groups(&fingerprints, &index, &self.config);
        info!("found {} duplicate group(s)", members.len());

        members
            .iter()
            .map(|positions| group::resolve_group(&files, positions))
            .collect()
    }

    /// Fingerprint every file on a bounded worker pool. Collecting into a
    /// single `Result` is the join barrier: the first decode failure aborts
    /// the run.
    fn hash_all(&self, files: &[PathBuf]) -> Result<Vec<Fingerprint>> {
        let hasher = DifferenceHasher::new(self.config.hash_size);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.concurrency)
            .build()?;
        pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let fingerprint = hasher.hash_path(path)?;
                    debug!("{} -> {}", path.display(), fingerprint);
                    Ok(fingerprint)
                })
                .collect()
        })
    }
}
