//! Input-path expansion and image-file filtering.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// File extensions treated as images, lowercase
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

/// Whether a path carries a recognized image extension
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Expand input paths into a sorted, de-duplicated list of image files.
///
/// Directories contribute their immediate image-file children only (no
/// recursion); explicit file paths are kept when they exist and look like
/// images. Missing paths, non-image files and unreadable directory entries
/// are silently skipped. The final sort makes the hashing order, and with it
/// the whole run, deterministic regardless of input order.
pub fn collect_image_files(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            for entry in WalkDir::new(input)
                .min_depth(1)
                .max_depth(1)
                .follow_links(false)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if entry.file_type().is_file() && has_image_extension(path) {
                    files.push(path.to_path_buf());
                }
            }
        } else if input.is_file() && has_image_extension(input) {
            files.push(input.clone());
        } else {
            debug!("skipping missing or non-image input: {}", input.display());
        }
    }

    files.sort();
    files.dedup();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_extension_filter() {
        assert!(has_image_extension(Path::new("photo.jpg")));
        assert!(has_image_extension(Path::new("photo.JPEG")));
        assert!(has_image_extension(Path::new("photo.webp")));
        assert!(!has_image_extension(Path::new("notes.txt")));
        assert!(!has_image_extension(Path::new("noextension")));
    }

    #[test]
    fn test_directory_expansion_is_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.png"));
        touch(&dir.path().join("a.jpg"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested").join("deep.png"));

        let files = collect_image_files(&[dir.path().to_path_buf()]);
        assert_eq!(
            files,
            vec![dir.path().join("a.jpg"), dir.path().join("b.png")]
        );
    }

    #[test]
    fn test_missing_and_non_image_inputs_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("notes.txt"));

        let inputs = vec![
            dir.path().join("notes.txt"),
            dir.path().join("does-not-exist.png"),
        ];
        assert!(collect_image_files(&inputs).is_empty());
    }

    #[test]
    fn test_merged_inputs_sorted_and_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.png");
        let b = dir.path().join("b.png");
        touch(&a);
        touch(&b);

        // Directory plus an explicit file that the directory already covers.
        let files = collect_image_files(&[dir.path().to_path_buf(), b.clone(), a.clone()]);
        assert_eq!(files, vec![a, b]);
    }
}
