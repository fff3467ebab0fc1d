//! Color ramps: piecewise-linear gradients between positioned color stops.
//!
//! Stops are kept sorted by position at all times. [`ColorRamp::push`]
//! inserts in order, so sampling never sees an unsorted ramp.

use crate::color::{mix, Rgba};
use crate::error::FieldError;
use crate::math::scale;
use serde::{Deserialize, Serialize};

/// Names accepted by [`ColorRamp::from_name`].
const RAMP_NAMES: &[&str] = &["grayscale", "heat", "spectrum", "ocean", "fire"];

/// A color anchored at a position in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub position: f64,
    pub color: Rgba,
}

impl ColorStop {
    /// Creates a stop at `position` in [0, 1].
    pub fn new(position: f64, color: Rgba) -> Self {
        Self { position, color }
    }
}

/// Ordered color stops sampled by linear interpolation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<ColorStop>", into = "Vec<ColorStop>")]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl ColorRamp {
    /// An empty ramp. Samples as opaque black until it has two stops.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ramp from stops in any order (stable sort by position).
    pub fn from_stops(stops: Vec<ColorStop>) -> Self {
        let mut ramp = Self { stops };
        ramp.sort();
        ramp
    }

    /// Evenly spaced stops from hex strings: the first at 0, the last at 1.
    pub fn from_hex(hexes: &[&str]) -> Result<Self, FieldError> {
        let n = hexes.len();
        let stops = hexes
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let position = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
                Rgba::from_hex(h).map(|c| ColorStop::new(position, c))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { stops })
    }

    /// Inserts a stop after any existing stops at the same position.
    pub fn push(&mut self, stop: ColorStop) {
        let at = self
            .stops
            .partition_point(|s| s.position.total_cmp(&stop.position).is_le());
        self.stops.insert(at, stop);
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_stop(mut self, position: f64, color: Rgba) -> Self {
        self.push(ColorStop::new(position, color));
        self
    }

    /// Stable ascending sort by position. Idempotent.
    pub fn sort(&mut self) {
        self.stops
            .sort_by(|a, b| a.position.total_cmp(&b.position));
    }

    /// The stops in ascending position order.
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True if the ramp has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Samples at `t` with alpha forced opaque.
    pub fn sample(&self, t: f64) -> Rgba {
        self.sample_with(t, true)
    }

    /// Samples at `t`, mixing alpha too unless `opaque` is set.
    ///
    /// Fewer than two stops yields opaque black. Positions before the first
    /// stop (or below 0, or NaN) give the first color; positions after the
    /// last stop or above 1 give the last color.
    pub fn sample_with(&self, t: f64, opaque: bool) -> Rgba {
        let n = self.stops.len();
        if n < 2 {
            return Rgba::BLACK;
        }
        let (first, last) = (self.stops[0], self.stops[n - 1]);
        if t.is_nan() || t < 0.0 || t < first.position {
            return first.color;
        }
        if t > 1.0 || t > last.position {
            return last.color;
        }
        let i = self
            .stops
            .windows(2)
            .position(|w| t <= w[1].position)
            .unwrap_or(n - 2);
        let (lo, hi) = (self.stops[i], self.stops[i + 1]);
        let ratio = if hi.position > lo.position {
            scale(t, lo.position, hi.position, 0.0, 1.0)
        } else {
            0.0
        };
        mix(lo.color, hi.color, ratio, opaque)
    }

    // -- Built-in ramps --

    /// Black to white.
    pub fn grayscale() -> Self {
        Self::from_hex(&["#000000", "#ffffff"]).expect("grayscale ramp hex values are valid")
    }

    /// Black through red and yellow to white.
    pub fn heat() -> Self {
        Self::from_hex(&["#000000", "#ff0000", "#ffff00", "#ffffff"])
            .expect("heat ramp hex values are valid")
    }

    /// Black, red, green, blue, white at quarter steps.
    pub fn spectrum() -> Self {
        Self::from_hex(&["#000000", "#ff0000", "#00ff00", "#0000ff", "#ffffff"])
            .expect("spectrum ramp hex values are valid")
    }

    /// Deep blues to cyan.
    pub fn ocean() -> Self {
        Self::from_hex(&["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"])
            .expect("ocean ramp hex values are valid")
    }

    /// Reds, oranges, yellows.
    pub fn fire() -> Self {
        Self::from_hex(&["#800000", "#cc0000", "#ff4500", "#ff8c00", "#ffd700"])
            .expect("fire ramp hex values are valid")
    }

    /// Looks up a built-in ramp by name.
    pub fn from_name(name: &str) -> Result<Self, FieldError> {
        match name {
            "grayscale" => Ok(Self::grayscale()),
            "heat" => Ok(Self::heat()),
            "spectrum" => Ok(Self::spectrum()),
            "ocean" => Ok(Self::ocean()),
            "fire" => Ok(Self::fire()),
            _ => Err(FieldError::InvalidRamp(format!(
                "unknown ramp '{name}', expected one of: {}",
                RAMP_NAMES.join(", ")
            ))),
        }
    }

    /// Names accepted by [`from_name`](Self::from_name).
    pub fn list_names() -> &'static [&'static str] {
        RAMP_NAMES
    }
}

impl From<Vec<ColorStop>> for ColorRamp {
    fn from(stops: Vec<ColorStop>) -> Self {
        Self::from_stops(stops)
    }
}

impl From<ColorRamp> for Vec<ColorStop> {
    fn from(ramp: ColorRamp) -> Self {
        ramp.stops
    }
}
