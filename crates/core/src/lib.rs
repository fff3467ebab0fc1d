#![deny(unsafe_code)]
//! Core types for sigfield, a procedural scalar-field generator with a
//! content-addressed raster cache.
//!
//! Provides the [`SignalField`] trait and its two generators
//! ([`FractalNoiseField`], [`DistanceField`]), the binary [`Signature`]
//! layout they describe themselves with, [`ColorRamp`] for colorizing
//! samples, the [`Xorshift64`] PRNG, and JSON parameter helpers.

pub mod color;
pub mod distance;
pub mod error;
pub mod fractal;
pub mod math;
pub mod params;
pub mod poisson;
pub mod prng;
pub mod ramp;
pub mod signal;

pub use color::Rgba;
pub use distance::{DistanceField, DistanceParams, CRACKLE};
pub use error::FieldError;
pub use fractal::{FractalNoiseField, NoiseParams};
pub use poisson::Point;
pub use prng::Xorshift64;
pub use ramp::{ColorRamp, ColorStop};
pub use signal::{Bounds, Region, SignalField, Signature};
