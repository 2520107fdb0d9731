//! Difference-hash fingerprinting.
//!
//! A dHash thresholds horizontal intensity gradients on a downsized grayscale
//! grid: the image is squashed to `(n+1) × n` pixels and each of the `n²`
//! bits records whether a pixel is darker than its right neighbor. Visually
//! similar images keep most gradients, so their fingerprints stay within a
//! small Hamming distance even across resizes and recompression.

use std::fmt;
use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::error::{Error, Result};

/// Packed dHash bit sequence for one image.
///
/// Bits are packed most-significant-bit first in emission order; when the
/// bit count is not a multiple of 8 the trailing byte is zero-padded. Two
/// fingerprints are only comparable when produced with the same `hash_size`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    bytes: Vec<u8>,
}

impl Fingerprint {
    /// Wrap an already-packed byte sequence
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Packed bytes of the fingerprint
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Bit-level Hamming distance to another fingerprint of the same size
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        debug_assert_eq!(
            self.bytes.len(),
            other.bytes.len(),
            "fingerprints from different hash sizes are not comparable"
        );
        self.bytes
            .iter()
            .zip(&other.bytes)
            .map(|(a, b)| (a ^ b).count_ones())
            .sum()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Fingerprint extractor computing an `n×n`-bit dHash per image
#[derive(Debug, Clone)]
pub struct DifferenceHasher {
    hash_size: u32,
}

impl DifferenceHasher {
    /// Create a hasher for the given grid size
    pub fn new(hash_size: u32) -> Self {
        Self { hash_size }
    }

    /// Decode an image file and fingerprint it
    pub fn hash_path(&self, path: &Path) -> Result<Fingerprint> {
        let img = image::open(path).map_err(|source| Error::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.hash_image(&img))
    }

    /// Fingerprint an already-decoded image
    pub fn hash_image(&self, img: &DynamicImage) -> Fingerprint {
        let n = self.hash_size;
        // Fill-resize, deliberately ignoring aspect ratio: one extra column
        // provides the right-hand neighbor for the last grid cell.
        let gray = img.resize_exact(n + 1, n, FilterType::Triangle).to_luma8();

        let bit_count = (n * n) as usize;
        let mut bytes = vec![0u8; (bit_count + 7) / 8];
        let mut bit = 0;
        for row in 0..n {
            for col in 0..n {
                let left = gray.get_pixel(col, row)[0];
                let right = gray.get_pixel(col + 1, row)[0];
                if left < right {
                    bytes[bit / 8] |= 0x80 >> (bit % 8);
                }
                bit += 1;
            }
        }

        Fingerprint::new(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};

    fn luma_image(width: u32, height: u32, pixels: &[u8]) -> DynamicImage {
        assert_eq!((width * height) as usize, pixels.len());
        let mut img = GrayImage::new(width, height);
        for (i, value) in pixels.iter().enumerate() {
            let x = i as u32 % width;
            let y = i as u32 / width;
            img.put_pixel(x, y, Luma([*value]));
        }
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_known_bit_pattern() {
        // 3x2 source matches the 2x2 hash grid exactly, so no resampling
        // ambiguity: bits are (0<255, 255<0, 10<20, 20<200) = 1011.
        let img = luma_image(3, 2, &[0, 255, 0, 10, 20, 200]);
        let fp = DifferenceHasher::new(2).hash_image(&img);
        assert_eq!(fp.as_bytes(), &[0b1011_0000]);
    }

    #[test]
    fn test_fingerprint_length_matches_grid() {
        let img = luma_image(9, 8, &[128; 72]);
        let fp = DifferenceHasher::new(8).hash_image(&img);
        assert_eq!(fp.as_bytes().len(), 8);

        // 3x3 grid = 9 bits, zero-padded into 2 bytes
        let img = luma_image(4, 3, &[128; 12]);
        let fp = DifferenceHasher::new(3).hash_image(&img);
        assert_eq!(fp.as_bytes().len(), 2);
    }

    #[test]
    fn test_equal_pixels_emit_zero_bits() {
        // Strictly-less comparison: a flat image has no rising gradients.
        let img = luma_image(9, 8, &[77; 72]);
        let fp = DifferenceHasher::new(8).hash_image(&img);
        assert!(fp.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_hashing_is_deterministic() {
        let img = luma_image(3, 2, &[0, 255, 0, 10, 20, 200]);
        let hasher = DifferenceHasher::new(2);
        assert_eq!(hasher.hash_image(&img), hasher.hash_image(&img));
    }

    #[test]
    fn test_distance_counts_differing_bits() {
        let a = Fingerprint::new(vec![0xff, 0x00]);
        let b = Fingerprint::new(vec![0x0f, 0x01]);
        assert_eq!(a.distance(&b), 5);
        assert_eq!(a.distance(&a), 0);
    }

    #[test]
    fn test_display_is_lowercase_hex() {
        let fp = Fingerprint::new(vec![0xb0, 0x0a]);
        assert_eq!(fp.to_string(), "b00a");
    }
}
