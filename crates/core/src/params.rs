//! Lenient typed lookups into a JSON parameter object.
//!
//! Generator configs arrive as `serde_json::Value` objects (from the CLI or a
//! config file). A missing key or a value of the wrong type falls back to the
//! supplied default, so lookups never fail.

use crate::prng::fnv1a64;
use serde_json::Value;

/// `params[name]` as f64; integers are accepted and widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a signed integer. Floats are rejected.
pub fn param_i64(params: &Value, name: &str, default: i64) -> i64 {
    params.get(name).and_then(Value::as_i64).unwrap_or(default)
}

/// `params[name]` as u32; out-of-range values fall back to `default`.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// `params[name]` as bool.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// `params[name]` as a 64-bit seed.
///
/// Integers are taken as-is (negative values keep their two's complement
/// bits). Strings are hashed with [`fnv1a64`], so `"seed": "granite"` names a
/// reproducible seed.
pub fn param_seed(params: &Value, name: &str, default: u64) -> u64 {
    match params.get(name) {
        Some(Value::String(s)) => fnv1a64(s),
        Some(v) => v
            .as_u64()
            .or_else(|| v.as_i64().map(|i| i as u64))
            .unwrap_or(default),
        None => default,
    }
}
