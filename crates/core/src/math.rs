//! Scalar helpers: linear rescaling, clamping, and mixing.
//!
//! All functions are pure. The float rescalers divide by `in_max - in_min`;
//! a degenerate input interval yields a non-finite result.

/// Maps `v` from `[in_min, in_max]` onto `[out_min, out_max]` linearly.
///
/// Values outside the input interval extrapolate; clamp afterwards if needed.
pub fn scale(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (v - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Like [`scale`] with an integer target interval, truncating toward zero.
///
/// Non-finite intermediates saturate (Rust `as` semantics), NaN becomes 0.
pub fn scale_to_int(v: f64, in_min: f64, in_max: f64, out_min: i64, out_max: i64) -> i64 {
    ((v - in_min) * (out_max - out_min) as f64 / (in_max - in_min) + out_min as f64) as i64
}

/// Like [`scale`] with an integer source value and interval.
pub fn scale_from_int(v: i64, in_min: i64, in_max: i64, out_min: f64, out_max: f64) -> f64 {
    (v - in_min) as f64 * (out_max - out_min) / (in_max - in_min) as f64 + out_min
}

/// Integer-only rescale. Returns `out_min` for an empty input interval.
pub fn scale_int(v: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    if in_max == in_min {
        return out_min;
    }
    (v - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Restricts `v` to `[min, max]`. NaN passes through unchanged.
pub fn clamp(v: f64, min: f64, max: f64) -> f64 {
    if v > max {
        max
    } else if v < min {
        min
    } else {
        v
    }
}

/// Linear mix: `t = 0` gives `a`, `t = 1` gives `b`.
pub fn mix(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

/// [`mix`] on integers, truncating the result.
pub fn mix_int(a: i64, b: i64, t: f64) -> i64 {
    mix(a as f64, b as f64, t) as i64
}
