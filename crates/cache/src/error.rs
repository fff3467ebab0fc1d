//! Error types for the raster cache.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading or materializing a cached raster.
///
/// A missing cache entry is not an error; it is a miss and gets computed.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache directory failed.
    #[error("cache i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The raster codec could not decode or encode an entry.
    #[error("raster codec failed: {0}")]
    Image(#[from] image::ImageError),

    /// An existing entry decoded to a raster of the wrong size.
    #[error("cache entry {} is {}x{}, expected {}x{}", .path.display(), .found.0, .found.1, .expected.0, .expected.1)]
    CorruptEntry {
        path: PathBuf,
        expected: (u32, u32),
        found: (u32, u32),
    },

    /// The region does not fit the raster format's 32-bit dimensions.
    #[error("region {w}x{h} exceeds raster size limits")]
    RegionTooLarge { w: i64, h: i64 },
}

impl CacheError {
    /// True for failures of the cache storage itself, where evaluating the
    /// field without the cache is still possible.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            CacheError::Io(_) | CacheError::Image(_) | CacheError::CorruptEntry { .. }
        )
    }
}
