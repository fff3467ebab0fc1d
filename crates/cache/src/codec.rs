//! PNG encoding and decoding of cached rasters.
//!
//! Cache entries are written with the fastest compression and no filtering,
//! trading file size for write speed. Every write goes to a temporary file in
//! the destination directory and is renamed into place, so readers never see
//! a partially written entry.

use crate::error::CacheError;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ExtendedColorType, GrayImage, ImageEncoder, ImageError};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// File extension of cache entries.
pub const RASTER_EXTENSION: &str = "png";

/// Writes an 8-bit grayscale raster, favoring speed over size.
pub fn write_gray(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), CacheError> {
    write_atomic(path, |w| {
        PngEncoder::new_with_quality(w, CompressionType::Fast, FilterType::NoFilter)
            .write_image(pixels, width, height, ExtendedColorType::L8)
    })
}

/// Writes an 8-bit RGBA raster with default compression.
pub fn write_rgba(path: &Path, width: u32, height: u32, pixels: &[u8]) -> Result<(), CacheError> {
    write_atomic(path, |w| {
        PngEncoder::new(w).write_image(pixels, width, height, ExtendedColorType::Rgba8)
    })
}

/// Decodes any supported raster at `path` into 8-bit luma.
pub fn read_gray(path: &Path) -> Result<GrayImage, CacheError> {
    image::open(path)
        .map(DynamicImage::into_luma8)
        .map_err(|e| match e {
            ImageError::IoError(io) => CacheError::Io(io),
            other => CacheError::Image(other),
        })
}

fn write_atomic(
    path: &Path,
    encode: impl FnOnce(&mut dyn Write) -> Result<(), ImageError>,
) -> Result<(), CacheError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode(&mut writer)?;
        writer.flush()?;
    }
    tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;
    Ok(())
}
