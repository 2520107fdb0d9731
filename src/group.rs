//! Duplicate group assembly and ordering.
//!
//! Grouping is a single left-to-right pass over the hashed image list: the
//! first unclaimed image seeds a group from its index neighbors, and every
//! member is claimed so it can never reappear in a later group. The claimed
//! set lives and dies inside that one pass.

use std::ffi::OsStr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::DedupeConfig;
use crate::error::{Error, Result};
use crate::hash::Fingerprint;
use crate::index::FingerprintIndex;

/// One image in a resolved duplicate group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ImageInfo {
    /// Total pixel count
    pub fn pixels(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }
}

/// A set of mutually similar images, highest resolution first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateGroup {
    images: Vec<ImageInfo>,
}

impl DuplicateGroup {
    /// Build a group from an already-sorted image list.
    ///
    /// A group holds at least two images: the keeper and its duplicates.
    pub fn new(images: Vec<ImageInfo>) -> Self {
        assert!(images.len() >= 2, "a duplicate group needs at least two images");
        Self { images }
    }

    /// The images of the group, keeper first
    pub fn images(&self) -> &[ImageInfo] {
        &self.images
    }

    /// The image to keep: highest resolution, first filename on ties
    pub fn keeper(&self) -> &ImageInfo {
        &self.images[0]
    }

    /// Every image except the keeper
    pub fn redundant(&self) -> &[ImageInfo] {
        &self.images[1..]
    }

    /// Number of images in the group, always at least 2
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Never true; groups are constructed with at least two images
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Partition indexed images into duplicate groups of positions.
///
/// Scans positions in index order; each unclaimed position queries the index
/// for up to `max_duplicates + 1` neighbors (the extra slot absorbs the
/// self-match) within `max_distance`. Positions claimed by earlier groups
/// are dropped from the result; if fewer than two remain the seed is simply
/// unmatched. Claiming before moving on guarantees the groups partition a
/// subset of the input: no position ever lands in two groups.
pub fn assemble_groups(
    fingerprints: &[Fingerprint],
    index: &FingerprintIndex,
    config: &DedupeConfig,
) -> Vec<Vec<usize>> {
    let mut claimed = vec![false; fingerprints.len()];
    let mut groups = Vec::new();

    for (position, fingerprint) in fingerprints.iter().enumerate() {
        if claimed[position] {
            continue;
        }

        let neighbors = index.find(fingerprint, config.max_distance, config.max_duplicates + 1);
        let mut members: Vec<usize> = neighbors
            .iter()
            .map(|n| n.position)
            .filter(|&p| !claimed[p])
            .collect();

        if members.len() < 2 {
            continue;
        }
        members.truncate(config.max_duplicates);

        debug!(
            "group seeded at position {} with {} members",
            position,
            members.len()
        );
        for &member in &members {
            claimed[member] = true;
        }
        groups.push(members);
    }

    groups
}

/// Resolve member positions to image metadata and order the group.
///
/// Dimension reads go through the image header only. A failure here is fatal
/// for the run: the file existed at scan time, so an unreadable header means
/// the collection changed underneath us.
pub fn resolve_group(paths: &[PathBuf], members: &[usize]) -> Result<DuplicateGroup> {
    let mut images = members
        .iter()
        .map(|&position| {
            let path = &paths[position];
            let (width, height) =
                image::image_dimensions(path).map_err(|source| Error::Metadata {
                    path: path.clone(),
                    source,
                })?;
            Ok(ImageInfo {
                path: path.clone(),
                width,
                height,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    sort_by_resolution(&mut images);
    Ok(DuplicateGroup::new(images))
}

/// Sort descending by pixel count, ascending by filename on ties
pub fn sort_by_resolution(images: &mut [ImageInfo]) {
    images.sort_by(|a, b| {
        b.pixels()
            .cmp(&a.pixels())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });
}
