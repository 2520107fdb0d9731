//! Run configuration for duplicate detection.

use crate::error::{Error, Result};

/// Smallest accepted hash grid size
pub const MIN_HASH_SIZE: u32 = 1;
/// Largest accepted hash grid size
pub const MAX_HASH_SIZE: u32 = 32;

/// Configuration for one deduplication run. Immutable once the run starts.
#[derive(Debug, Clone)]
pub struct DedupeConfig {
    /// Side length of the hash grid; the fingerprint holds `hash_size²` bits.
    pub hash_size: u32,
    /// Maximum number of images collected into a single duplicate group.
    pub max_duplicates: usize,
    /// Maximum Hamming distance for two fingerprints to count as duplicates.
    pub max_distance: u32,
    /// Number of worker threads used for the hashing phase.
    pub concurrency: usize,
}

impl Default for DedupeConfig {
    fn default() -> Self {
        Self {
            hash_size: 8,
            max_duplicates: 100,
            max_distance: 5,
            concurrency: 1,
        }
    }
}

impl DedupeConfig {
    /// Create a configuration with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the hash grid size
    pub fn with_hash_size(mut self, hash_size: u32) -> Self {
        self.hash_size = hash_size;
        self
    }

    /// Set the maximum group size
    pub fn with_max_duplicates(mut self, max_duplicates: usize) -> Self {
        self.max_duplicates = max_duplicates;
        self
    }

    /// Set the distance threshold
    pub fn with_max_distance(mut self, max_distance: u32) -> Self {
        self.max_distance = max_distance;
        self
    }

    /// Set the hashing worker count
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Validate the settings. The engine itself does not call this; range
    /// checks are a caller concern and the CLI runs them before starting.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_HASH_SIZE..=MAX_HASH_SIZE).contains(&self.hash_size) {
            return Err(Error::Configuration {
                reason: format!(
                    "hash size must be between {} and {}, got {}",
                    MIN_HASH_SIZE, MAX_HASH_SIZE, self.hash_size
                ),
            });
        }

        if self.max_duplicates == 0 {
            return Err(Error::Configuration {
                reason: "max duplicates must be at least 1".to_string(),
            });
        }

        if self.concurrency == 0 {
            return Err(Error::Configuration {
                reason: "concurrency must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
