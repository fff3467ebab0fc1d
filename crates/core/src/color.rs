//! 8-bit RGBA colors and linear color mixing.
//!
//! Mixing interpolates each channel linearly and truncates back to 8 bits,
//! so the midpoint of black and white is 127, not 128.

use crate::error::FieldError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Non-premultiplied 8-bit RGBA color.
///
/// Serializes as `"#rrggbb"` when opaque and `"#rrggbbaa"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgba = Rgba::opaque(255, 255, 255);

    /// Creates a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color with alpha 255.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Opaque gray of intensity `v`.
    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    /// Parses `"#rrggbb"`, `"#rrggbbaa"`, or the same without `#` (case insensitive).
    pub fn from_hex(hex: &str) -> Result<Rgba, FieldError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(FieldError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        if !hex.is_ascii() {
            return Err(FieldError::InvalidColor(format!("non-ascii color '{hex}'")));
        }
        let channel = |i: usize, name: &str| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| FieldError::InvalidColor(format!("invalid {name} component: {e}")))
        };
        let a = if hex.len() == 8 { channel(6, "alpha")? } else { 255 };
        Ok(Rgba::new(
            channel(0, "red")?,
            channel(2, "green")?,
            channel(4, "blue")?,
            a,
        ))
    }

    /// `"#rrggbb"` for opaque colors, `"#rrggbbaa"` otherwise.
    pub fn to_hex(self) -> String {
        let Rgba { r, g, b, a } = self;
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Channels in `[r, g, b, a]` order, as stored in RGBA8 buffers.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn mix_channel(a: u8, b: u8, t: f64) -> u8 {
    ((1.0 - t) * a as f64 + t * b as f64) as u8
}

/// Linearly interpolates every channel from `c1` (t = 0) to `c2` (t = 1).
///
/// With `opaque` the result's alpha is forced to 255 instead of mixed, which
/// keeps repeated mixing from fading translucent stops.
pub fn mix(c1: Rgba, c2: Rgba, t: f64, opaque: bool) -> Rgba {
    Rgba {
        r: mix_channel(c1.r, c2.r, t),
        g: mix_channel(c1.g, c2.g, t),
        b: mix_channel(c1.b, c2.b, t),
        a: if opaque { 255 } else { mix_channel(c1.a, c2.a, t) },
    }
}
