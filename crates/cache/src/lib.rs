#![deny(unsafe_code)]
//! Content-addressed raster cache for sigfield signal fields.
//!
//! [`RasterCache`] materializes a [`SignalField`](sigfield_core::SignalField)
//! over an integer region as 8-bit grayscale and persists it under a key
//! derived from the field's signature and the region, so identical requests
//! are computed at most once per cache directory.

pub mod codec;
pub mod error;
pub mod fingerprint;
pub mod pixel;
pub mod raster;

pub use error::CacheError;
pub use fingerprint::fingerprint;
pub use pixel::colorize;
pub use raster::{entry_path, quantize, CacheStatus, RasterCache};
