//! Colorizing grayscale rasters through a [`ColorRamp`].

use crate::raster::RasterCache;
use sigfield_core::ColorRamp;

/// Maps every cached sample through `ramp` into an RGBA8 buffer of
/// `width * height * 4` bytes, alpha forced opaque.
pub fn colorize(raster: &RasterCache, ramp: &ColorRamp) -> Vec<u8> {
    raster
        .pixels()
        .iter()
        .flat_map(|&v| ramp.sample(v as f64 / 255.0).to_array())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigfield_core::{Region, Rgba, SignalField, Signature};

    struct Flat(f64);

    impl SignalField for Flat {
        fn signature(&self) -> Vec<u8> {
            Signature::new().push_real(self.0).finish()
        }

        fn range(&self) -> (f64, f64) {
            (0.0, 1.0)
        }

        fn eval(&self, _x: f64, _y: f64) -> f64 {
            self.0
        }
    }

    fn raster(v: f64) -> RasterCache {
        RasterCache::in_memory(&Flat(v), Region::new(0, 0, 8, 4).unwrap()).unwrap()
    }

    #[test]
    fn colorize_correct_length() {
        let buf = colorize(&raster(0.5), &ColorRamp::ocean());
        assert_eq!(buf.len(), 8 * 4 * 4);
    }

    #[test]
    fn colorize_alpha_always_opaque() {
        let ramp = ColorRamp::new()
            .with_stop(0.0, Rgba::new(0, 0, 0, 0))
            .with_stop(1.0, Rgba::new(255, 255, 255, 0));
        let buf = colorize(&raster(0.3), &ramp);
        assert!(buf.chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn colorize_boundary_colors() {
        let ramp = ColorRamp::grayscale();
        assert_eq!(&colorize(&raster(0.0), &ramp)[..4], &[0, 0, 0, 255]);
        assert_eq!(&colorize(&raster(1.0), &ramp)[..4], &[255, 255, 255, 255]);
    }
}
