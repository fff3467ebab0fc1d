//! Read-through, write-through raster materialization of a [`SignalField`].
//!
//! A [`RasterCache`] quantizes a field over an integer region onto 8-bit
//! grayscale. The first construction for a given fingerprint evaluates every
//! pixel and persists the raster under `<dir>/<fingerprint>.png`; later
//! constructions decode that file instead. Entries are never verified against
//! the current field logic and never evicted.

use crate::codec::{self, RASTER_EXTENSION};
use crate::error::CacheError;
use crate::fingerprint::fingerprint;
use log::{debug, info, warn};
use sigfield_core::math::scale_to_int;
use sigfield_core::{Region, SignalField};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Where a [`RasterCache`]'s pixels came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Decoded from an existing entry.
    Hit,
    /// Evaluated and written to a new entry.
    Miss,
    /// Evaluated without touching the disk.
    Uncached,
}

/// A quantized raster of a field over a fixed region, backed by disk.
#[derive(Debug, Clone)]
pub struct RasterCache {
    region: Region,
    fingerprint: String,
    path: Option<PathBuf>,
    status: CacheStatus,
    pixels: Vec<u8>,
}

/// Path of the entry for `fingerprint` under `dir`.
pub fn entry_path(dir: &Path, fingerprint: &str) -> PathBuf {
    dir.join(format!("{fingerprint}.{RASTER_EXTENSION}"))
}

/// Maps `v` from the field range onto [0, 255], truncating.
///
/// Out-of-range values saturate instead of wrapping.
pub fn quantize(v: f64, min: f64, max: f64) -> u8 {
    scale_to_int(v, min, max, 0, 255).clamp(0, 255) as u8
}

impl RasterCache {
    /// Loads the raster for `field` over `region` from `dir`, computing and
    /// persisting it first on a miss. Creates `dir` if needed.
    ///
    /// Storage failures are returned as errors, never treated as misses.
    pub fn new(
        field: &dyn SignalField,
        region: Region,
        dir: impl AsRef<Path>,
    ) -> Result<Self, CacheError> {
        let (w, h) = raster_dims(&region)?;
        let fingerprint = fingerprint(field, &region);
        let dir = dir.as_ref();
        let path = entry_path(dir, &fingerprint);

        let exists = match fs::metadata(&path) {
            Ok(meta) => meta.is_file(),
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        if exists {
            let img = codec::read_gray(&path)?;
            if img.dimensions() != (w, h) {
                return Err(CacheError::CorruptEntry {
                    path,
                    expected: (w, h),
                    found: img.dimensions(),
                });
            }
            debug!("raster cache hit {fingerprint}");
            return Ok(Self {
                region,
                fingerprint,
                path: Some(path),
                status: CacheStatus::Hit,
                pixels: img.into_raw(),
            });
        }

        debug!("raster cache miss {fingerprint}, evaluating {w}x{h}");
        fs::create_dir_all(dir)?;
        let pixels = materialize(field, &region);
        codec::write_gray(&path, w, h, &pixels)?;
        info!("cached {w}x{h} raster at {}", path.display());
        Ok(Self {
            region,
            fingerprint,
            path: Some(path),
            status: CacheStatus::Miss,
            pixels,
        })
    }

    /// Evaluates the raster without reading or writing any cache entry.
    pub fn in_memory(field: &dyn SignalField, region: Region) -> Result<Self, CacheError> {
        raster_dims(&region)?;
        Ok(Self {
            fingerprint: fingerprint(field, &region),
            path: None,
            status: CacheStatus::Uncached,
            pixels: materialize(field, &region),
            region,
        })
    }

    /// Like [`new`](Self::new), but falls back to [`in_memory`](Self::in_memory)
    /// when the cache storage fails. Oversized regions still fail.
    pub fn new_or_in_memory(
        field: &dyn SignalField,
        region: Region,
        dir: impl AsRef<Path>,
    ) -> Result<Self, CacheError> {
        match Self::new(field, region, dir) {
            Err(e) if e.is_storage_failure() => {
                warn!("raster cache unavailable ({e}), evaluating in memory");
                Self::in_memory(field, region)
            }
            other => other,
        }
    }

    /// Grayscale value at `(x, y)` in [0, 1]; 0 outside the region.
    pub fn sample(&self, x: i64, y: i64) -> f64 {
        self.region
            .index(x, y)
            .map_or(0.0, |i| self.pixels[i] as f64 / 255.0)
    }

    /// The integer region the raster covers.
    pub fn region(&self) -> Region {
        self.region
    }

    /// The 64-character cache key.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Entry path, `None` for uncached rasters.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the pixels were decoded, computed and stored, or computed only.
    pub fn status(&self) -> CacheStatus {
        self.status
    }

    /// Row-major 8-bit samples, one per pixel of the region.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// The region's size in the raster format's 32-bit dimensions.
fn raster_dims(region: &Region) -> Result<(u32, u32), CacheError> {
    let too_large = || CacheError::RegionTooLarge {
        w: region.width() as i64,
        h: region.height() as i64,
    };
    let w = u32::try_from(region.width()).map_err(|_| too_large())?;
    let h = u32::try_from(region.height()).map_err(|_| too_large())?;
    Ok((w, h))
}

/// Evaluates and quantizes every pixel of `region`, row by row.
fn materialize(field: &dyn SignalField, region: &Region) -> Vec<u8> {
    let (min, max) = field.range();
    let mut pixels = vec![0u8; region.len()];
    let fill_row = |(row, line): (usize, &mut [u8])| {
        let y = (region.y() + row as i64) as f64;
        for (col, px) in line.iter_mut().enumerate() {
            let x = (region.x() + col as i64) as f64;
            *px = quantize(field.eval(x, y), min, max);
        }
    };

    #[cfg(feature = "parallel")]
    pixels
        .par_chunks_mut(region.width())
        .enumerate()
        .for_each(fill_row);

    #[cfg(not(feature = "parallel"))]
    pixels
        .chunks_mut(region.width())
        .enumerate()
        .for_each(fill_row);

    pixels
}
