//! The [`SignalField`] capability and the types shared by every generator.
//!
//! A signal field is a deterministic scalar function over the plane that can
//! describe itself as a byte signature. The signature, together with the
//! requested [`Region`], is what a raster cache hashes into its key, so two
//! fields with equal signatures must evaluate identically.

use crate::error::FieldError;
use serde::{Deserialize, Serialize};

/// A deterministic 2D scalar generator that can be cached.
///
/// This trait is **object-safe**; caches accept `&dyn SignalField`.
pub trait SignalField: Send + Sync {
    /// Parameter bytes uniquely describing this generator's output.
    ///
    /// Built with [`Signature`]: every value is an 8-byte big-endian word.
    fn signature(&self) -> Vec<u8>;

    /// Bounds `(min, max)` that [`eval`](SignalField::eval) is expected to
    /// stay within. Used to quantize samples onto 8 bits.
    fn range(&self) -> (f64, f64);

    /// Evaluates the field at `(x, y)`. Total over the whole plane.
    fn eval(&self, x: f64, y: f64) -> f64;
}

/// Builder for the fixed-width binary signature layout.
///
/// Integers are written as 64-bit two's complement, reals as their IEEE-754
/// bit pattern, both big-endian, concatenated in push order.
#[derive(Debug, Default, Clone)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Signature {
    /// Creates an empty signature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an integer word.
    pub fn push_int(mut self, v: i64) -> Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    /// Appends a real word.
    pub fn push_real(mut self, v: f64) -> Self {
        self.bytes.extend_from_slice(&v.to_bits().to_be_bytes());
        self
    }

    /// Returns the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

/// Integer-aligned rectangle of raster pixels, origin at `(x, y)`.
///
/// Only constructed through [`Region::new`], so every region has a positive
/// size, a pixel count that fits in `usize`, and representable far edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    x: i64,
    y: i64,
    w: i64,
    h: i64,
}

impl Region {
    /// Creates a region, rejecting non-positive sizes and pixel counts that
    /// do not fit in `usize`.
    pub fn new(x: i64, y: i64, w: i64, h: i64) -> Result<Self, FieldError> {
        if w <= 0 || h <= 0 {
            return Err(FieldError::InvalidDimensions);
        }
        let wu = usize::try_from(w).map_err(|_| FieldError::InvalidDimensions)?;
        let hu = usize::try_from(h).map_err(|_| FieldError::InvalidDimensions)?;
        wu.checked_mul(hu).ok_or(FieldError::InvalidDimensions)?;
        // The far edge must also be representable.
        x.checked_add(w).ok_or(FieldError::InvalidDimensions)?;
        y.checked_add(h).ok_or(FieldError::InvalidDimensions)?;
        Ok(Self { x, y, w, h })
    }

    /// Left edge.
    pub fn x(&self) -> i64 {
        self.x
    }

    /// Top edge.
    pub fn y(&self) -> i64 {
        self.y
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.w as usize
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.h as usize
    }

    /// Total pixel count.
    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    /// Always false for a validated region.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Closed-open containment test.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Row-major buffer index of `(x, y)`, or `None` outside the region.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }
        Some((y - self.y) as usize * self.width() + (x - self.x) as usize)
    }

    /// `x, y, w, h` as four big-endian 64-bit words, the layout hashed into
    /// cache fingerprints.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (chunk, v) in out.chunks_exact_mut(8).zip([self.x, self.y, self.w, self.h]) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
        out
    }
}

/// Real-valued rectangle, origin at `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Bounds {
    /// Creates a rectangle. No validation; an empty or inverted rectangle
    /// contains nothing.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Closed-open containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }

    /// Grows the rectangle by `margin` on every side.
    pub fn inflate(&self, margin: f64) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            w: self.w + 2.0 * margin,
            h: self.h + 2.0 * margin,
        }
    }
}

impl From<Region> for Bounds {
    fn from(r: Region) -> Self {
        Self::new(r.x as f64, r.y as f64, r.w as f64, r.h as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Constant(f64);

    impl SignalField for Constant {
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

    #[test]
    fn signal_field_is_object_safe() {
        let field: Box<dyn SignalField> = Box::new(Constant(0.25));
        assert_eq!(field.eval(3.0, 4.0), 0.25);
        assert_eq!(field.range(), (0.0, 1.0));
    }

    #[test]
    fn signature_words_are_big_endian() {
        let bytes = Signature::new().push_int(1).push_int(-1).finish();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&bytes[8..], &[0xFF; 8]);
    }

    #[test]
    fn signature_reals_use_ieee_bits() {
        let bytes = Signature::new().push_real(1.0).finish();
        assert_eq!(bytes, 0x3FF0_0000_0000_0000u64.to_be_bytes().to_vec());
    }

    #[test]
    fn region_rejects_non_positive_sizes() {
        assert!(Region::new(0, 0, 0, 10).is_err());
        assert!(Region::new(0, 0, 10, -1).is_err());
        assert!(Region::new(0, 0, 10, 10).is_ok());
    }

    #[test]
    fn region_rejects_overflowing_edge() {
        assert!(Region::new(i64::MAX, 0, 1, 1).is_err());
    }

    #[test]
    fn region_contains_is_closed_open() {
        let r = Region::new(10, 20, 5, 5).unwrap();
        assert!(r.contains(10, 20));
        assert!(r.contains(14, 24));
        assert!(!r.contains(15, 20));
        assert!(!r.contains(10, 25));
        assert!(!r.contains(9, 20));
    }

    #[test]
    fn region_at_the_integer_limits_does_not_overflow() {
        let r = Region::new(i64::MAX - 10, i64::MIN, 10, 5).unwrap();
        assert!(r.contains(i64::MAX - 1, i64::MIN));
        assert!(!r.contains(i64::MAX, i64::MIN));
        assert!(!r.contains(i64::MIN, i64::MAX));
        assert_eq!(r.index(i64::MAX - 1, i64::MIN + 4), Some(49));
        assert_eq!(r.index(i64::MAX, i64::MAX), None);
    }

    #[test]
    fn region_index_is_row_major() {
        let r = Region::new(-2, -2, 4, 3).unwrap();
        assert_eq!(r.index(-2, -2), Some(0));
        assert_eq!(r.index(1, -2), Some(3));
        assert_eq!(r.index(-2, -1), Some(4));
        assert_eq!(r.index(2, 0), None);
        assert_eq!(r.len(), 12);
    }

    #[test]
    fn region_bytes_are_four_be_words() {
        let r = Region::new(1, 2, 3, 4).unwrap();
        let bytes = r.to_be_bytes();
        assert_eq!(bytes[7], 1);
        assert_eq!(bytes[15], 2);
        assert_eq!(bytes[23], 3);
        assert_eq!(bytes[31], 4);
        assert!(bytes.iter().enumerate().all(|(i, &b)| i % 8 == 7 || b == 0));
    }

    #[test]
    fn bounds_inflate_grows_every_side() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0).inflate(2.0);
        assert_eq!(b, Bounds::new(-2.0, -2.0, 14.0, 14.0));
        assert!(b.contains(-2.0, 11.9));
        assert!(!b.contains(12.0, 0.0));
    }
}
