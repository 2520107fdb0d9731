//! Command-line interface for image-dedupe.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use dialoguer::Confirm;
use tracing::warn;

use crate::config::DedupeConfig;
use crate::engine::DedupeEngine;
use crate::group::DuplicateGroup;
use crate::logging;

/// Find visually duplicate images and optionally delete the lower-resolution copies
#[derive(Parser, Debug)]
#[command(name = "image-dedupe")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find visually duplicate images with difference hashing")]
pub struct Cli {
    /// Directories or image files to scan (directories are not recursed into)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Hash grid size; the fingerprint holds hash-size² bits (1-32)
    #[arg(long, value_name = "N", default_value_t = 8)]
    pub hash_size: u32,

    /// Maximum number of images per duplicate group
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub max_duplicates: usize,

    /// Maximum Hamming distance between duplicate fingerprints
    #[arg(long, value_name = "N", default_value_t = 5)]
    pub max_distance: u32,

    /// Number of worker threads for the hashing phase
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub concurrency: usize,

    /// Delete every image in a group except the highest-resolution one,
    /// asking for confirmation per group
    #[arg(long)]
    pub delete: bool,

    /// Delete without asking for confirmation
    #[arg(long)]
    pub force_delete: bool,

    /// Print the duplicate groups as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run the CLI end to end
pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.verbose);

    for path in &cli.paths {
        if !path.exists() {
            bail!("path does not exist: {}", path.display());
        }
    }

    let config = DedupeConfig::new()
        .with_hash_size(cli.hash_size)
        .with_max_duplicates(cli.max_duplicates)
        .with_max_distance(cli.max_distance)
        .with_concurrency(cli.concurrency);
    config.validate()?;

    let engine = DedupeEngine::new(config);
    let groups = engine.find_duplicates(&cli.paths)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&groups)?);
    } else {
        print_groups(&groups);
    }

    if cli.delete || cli.force_delete {
        let (deleted, failed) = delete_duplicates(&groups, cli.force_delete)?;
        println!("Deleted {} image(s), {} failure(s).", deleted, failed);
    }

    Ok(())
}

fn print_groups(groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        println!("No duplicates found.");
        return;
    }

    println!("Found {} duplicate group(s):", groups.len());
    for (i, group) in groups.iter().enumerate() {
        println!("Group {}:", i + 1);
        for (j, img) in group.images().iter().enumerate() {
            let marker = if j == 0 { "keep" } else { "dupe" };
            println!(
                "  [{}] {} ({}x{})",
                marker,
                img.path.display(),
                img.width,
                img.height
            );
        }
    }
}

/// Delete the redundant images of every group, keeping the sorted first.
/// Per-file failures are logged and counted but never stop the sweep.
/// Returns the number of deleted files and the number of failures.
fn delete_duplicates(groups: &[DuplicateGroup], force: bool) -> Result<(usize, usize)> {
    let mut deleted = 0usize;
    let mut failed = 0usize;

    for (i, group) in groups.iter().enumerate() {
        if !force {
            let prompt = format!(
                "Group {}: delete {} image(s), keeping {}?",
                i + 1,
                group.redundant().len(),
                group.keeper().path.display()
            );
            let confirmed = Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .context("failed to read confirmation")?;
            if !confirmed {
                println!("Skipping group {}.", i + 1);
                continue;
            }
        }

        for img in group.redundant() {
            match fs::remove_file(&img.path) {
                Ok(()) => {
                    println!("Deleted {}", img.path.display());
                    deleted += 1;
                }
                Err(err) => {
                    warn!("failed to delete {}: {}", img.path.display(), err);
                    failed += 1;
                }
            }
        }
    }

    Ok((deleted, failed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::ImageInfo;
    use std::fs::File;
    use std::path::Path;

    fn image_file(dir: &Path, name: &str) -> ImageInfo {
        let path = dir.join(name);
        File::create(&path).unwrap();
        ImageInfo {
            path,
            width: 10,
            height: 10,
        }
    }

    #[test]
    fn test_force_delete_keeps_keeper_removes_redundant() {
        let dir = tempfile::tempdir().unwrap();
        let keep = image_file(dir.path(), "keep.png");
        let dupe_a = image_file(dir.path(), "dupe_a.png");
        let dupe_b = image_file(dir.path(), "dupe_b.png");
        let groups = vec![DuplicateGroup::new(vec![
            keep.clone(),
            dupe_a.clone(),
            dupe_b.clone(),
        ])];

        let (deleted, failed) = delete_duplicates(&groups, true).unwrap();

        assert_eq!(deleted, 2);
        assert_eq!(failed, 0);
        assert!(keep.path.exists());
        assert!(!dupe_a.path.exists());
        assert!(!dupe_b.path.exists());
    }

    #[test]
    fn test_delete_failure_is_counted_and_sweep_continues() {
        let dir = tempfile::tempdir().unwrap();
        let keep = image_file(dir.path(), "keep.png");
        let gone = ImageInfo {
            path: dir.path().join("already-gone.png"),
            width: 5,
            height: 5,
        };
        let dupe = image_file(dir.path(), "dupe.png");
        // The unremovable file sorts before the real duplicate, so a failure
        // must not stop the rest of the group from being deleted.
        let groups = vec![DuplicateGroup::new(vec![keep.clone(), gone, dupe.clone()])];

        let (deleted, failed) = delete_duplicates(&groups, true).unwrap();

        assert_eq!(deleted, 1);
        assert_eq!(failed, 1);
        assert!(keep.path.exists());
        assert!(!dupe.path.exists());
    }
}
