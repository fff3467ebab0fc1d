//! Fractal (multi-octave) OpenSimplex noise.
//!
//! Each octave samples the base noise at a frequency multiplied by
//! `lacunarity` and weights it by an amplitude multiplied by `persistence`.
//! The weighted sum is divided by the total amplitude, so the result is an
//! average of bounded samples and stays within the base noise range.

use crate::error::FieldError;
use crate::params::{param_bool, param_f64, param_seed, param_u32};
use crate::prng::fold_seed;
use crate::signal::{Signature, SignalField};
use noise::{NoiseFn, OpenSimplex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_SCALE: f64 = 0.005;
const DEFAULT_OCTAVES: u32 = 5;
const DEFAULT_LACUNARITY: f64 = 2.0;
const DEFAULT_PERSISTENCE: f64 = 0.5;

/// Largest scaled coordinate handed to the base noise. The lattice lookup
/// floors coordinates into `isize`, so this stays far inside that range
/// while keeping integer precision.
const MAX_COORD: f64 = 4_503_599_627_370_496.0; // 2^52

/// Shape parameters of a [`FractalNoiseField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseParams {
    /// Base noise seed, folded to 32 bits.
    pub seed: i64,
    /// Base frequency: smaller values zoom in.
    pub scale: f64,
    /// Number of layers, at least 1.
    pub octaves: u32,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves, greater than 0.
    pub persistence: f64,
    /// Append the seed to the cache signature. Off by default, which makes
    /// fields differing only by seed share cache entries.
    pub seed_in_signature: bool,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: DEFAULT_SCALE,
            octaves: DEFAULT_OCTAVES,
            lacunarity: DEFAULT_LACUNARITY,
            persistence: DEFAULT_PERSISTENCE,
            seed_in_signature: false,
        }
    }
}

impl NoiseParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    /// A string `seed` is hashed into a numeric one.
    pub fn from_json(params: &Value) -> Self {
        Self {
            seed: param_seed(params, "seed", 0) as i64,
            scale: param_f64(params, "scale", DEFAULT_SCALE),
            octaves: param_u32(params, "octaves", DEFAULT_OCTAVES),
            lacunarity: param_f64(params, "lacunarity", DEFAULT_LACUNARITY),
            persistence: param_f64(params, "persistence", DEFAULT_PERSISTENCE),
            seed_in_signature: param_bool(params, "seed_in_signature", false),
        }
    }
}

/// Layered OpenSimplex noise with fixed parameters.
pub struct FractalNoiseField {
    noise: OpenSimplex,
    params: NoiseParams,
}

impl FractalNoiseField {
    /// Builds the field.
    ///
    /// Rejects zero octaves, non-finite multipliers, a non-positive
    /// persistence, and octave counts whose total amplitude or top frequency
    /// overflows.
    pub fn new(params: NoiseParams) -> Result<Self, FieldError> {
        if params.octaves == 0 {
            return Err(FieldError::InvalidParameter(
                "octaves must be at least 1".to_string(),
            ));
        }
        for (name, v) in [
            ("scale", params.scale),
            ("lacunarity", params.lacunarity),
            ("persistence", params.persistence),
        ] {
            if !v.is_finite() {
                return Err(FieldError::InvalidParameter(format!(
                    "{name} must be finite, got {v}"
                )));
            }
        }
        if params.persistence <= 0.0 {
            return Err(FieldError::InvalidParameter(format!(
                "persistence must be positive, got {}",
                params.persistence
            )));
        }
        let total = total_amplitude(params.persistence, params.octaves);
        if !total.is_finite() {
            return Err(FieldError::InvalidParameter(format!(
                "persistence {} overflows over {} octaves",
                params.persistence, params.octaves
            )));
        }
        let top = params.scale * params.lacunarity.powf(f64::from(params.octaves - 1));
        if !top.is_finite() {
            return Err(FieldError::InvalidParameter(format!(
                "scale {} and lacunarity {} overflow over {} octaves",
                params.scale, params.lacunarity, params.octaves
            )));
        }
        Ok(Self {
            noise: OpenSimplex::new(fold_seed(params.seed)),
            params,
        })
    }

    /// Builds the field from a JSON object, see [`NoiseParams::from_json`].
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        Self::new(NoiseParams::from_json(params))
    }

    /// The parameters the field was built with.
    pub fn params(&self) -> &NoiseParams {
        &self.params
    }

    /// One-dimensional noise, sampled along the x axis of the 2D base noise.
    pub fn eval1(&self, x: f64) -> f64 {
        self.layered(&[x], |f| self.noise.get([x * f, 0.0]))
    }

    /// Two-dimensional noise.
    pub fn eval2(&self, x: f64, y: f64) -> f64 {
        self.layered(&[x, y], |f| self.noise.get([x * f, y * f]))
    }

    /// Three-dimensional noise.
    pub fn eval3(&self, x: f64, y: f64, z: f64) -> f64 {
        self.layered(&[x, y, z], |f| self.noise.get([x * f, y * f, z * f]))
    }

    /// Four-dimensional noise.
    pub fn eval4(&self, x: f64, y: f64, z: f64, w: f64) -> f64 {
        self.layered(&[x, y, z, w], |f| {
            self.noise.get([x * f, y * f, z * f, w * f])
        })
    }

    /// Amplitude-weighted average of `sample(frequency)` over the octaves.
    ///
    /// Octaves whose scaled `coords` would leave [`MAX_COORD`] are skipped
    /// along with every higher one. Non-finite coordinates, or coordinates
    /// already out of reach at the base frequency, evaluate to 0.
    fn layered(&self, coords: &[f64], sample: impl Fn(f64) -> f64) -> f64 {
        if !coords.iter().all(|c| c.is_finite()) {
            return 0.0;
        }
        let reach = coords.iter().fold(0.0, |m: f64, c| m.max(c.abs()));
        let (mut sum, mut total) = (0.0, 0.0);
        let (mut amp, mut freq) = (1.0, self.params.scale);
        for _ in 0..self.params.octaves {
            let scaled = reach * freq.abs();
            // 0 * inf is NaN.
            if scaled.is_nan() || scaled > MAX_COORD || amp == 0.0 {
                break;
            }
            sum += sample(freq) * amp;
            total += amp;
            amp *= self.params.persistence;
            freq *= self.params.lacunarity;
        }
        if total > 0.0 {
            sum / total
        } else {
            0.0
        }
    }
}

/// Sum of `persistence^i` for `i` in `0..octaves`.
fn total_amplitude(persistence: f64, octaves: u32) -> f64 {
    let n = f64::from(octaves);
    if persistence == 1.0 {
        n
    } else {
        (persistence.powf(n) - 1.0) / (persistence - 1.0)
    }
}

impl SignalField for FractalNoiseField {
    fn signature(&self) -> Vec<u8> {
        let sig = Signature::new()
            .push_real(self.params.scale)
            .push_int(self.params.octaves as i64)
            .push_real(self.params.lacunarity)
            .push_real(self.params.persistence);
        if self.params.seed_in_signature {
            sig.push_int(self.params.seed).finish()
        } else {
            sig.finish()
        }
    }

    /// A loose bound: the base noise is bounded by [-1, 1] and the octave
    /// sum is an average.
    fn range(&self) -> (f64, f64) {
        (-1.0, 1.0)
    }

    fn eval(&self, x: f64, y: f64) -> f64 {
        self.eval2(x, y)
    }
}
