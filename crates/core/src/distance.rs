//! Distance-to-nearest-point fields over a seeded Poisson-disc point set.
//!
//! The point set is sampled once at construction over the declared bounds
//! grown by `scale` on each side, so cells near the border still see their
//! outside neighbours. Evaluation ranks the distances from the query to every
//! point and maps either the k-th nearest distance (ranked mode) or the gap
//! between the two nearest (crackle mode, `k = -1`) into [0, 1], where 1
//! means "on the feature".

use crate::error::FieldError;
use crate::math::{clamp, scale};
use crate::params::{param_f64, param_i64, param_seed, param_u32};
use crate::poisson::{self, Point};
use crate::prng::Xorshift64;
use crate::signal::{Bounds, Signature, SignalField};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Rank value selecting crackle mode.
pub const CRACKLE: i64 = -1;

const DEFAULT_SIZE: f64 = 256.0;
const DEFAULT_SCALE: f64 = 32.0;
const DEFAULT_K: i64 = 0;
const DEFAULT_PDS_ATTEMPTS: u32 = 30;

/// Parameters of a [`DistanceField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceParams {
    pub seed: u64,
    /// Region where the field is non-zero.
    pub bounds: Bounds,
    /// Minimum spacing between points, also the sampling margin.
    pub scale: f64,
    /// Neighbour rank (0 = nearest) or [`CRACKLE`].
    pub k: i64,
    /// Candidate placements per active point during sampling.
    pub pds_attempts: u32,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            seed: 0,
            bounds: Bounds::new(0.0, 0.0, DEFAULT_SIZE, DEFAULT_SIZE),
            scale: DEFAULT_SCALE,
            k: DEFAULT_K,
            pds_attempts: DEFAULT_PDS_ATTEMPTS,
        }
    }
}

impl DistanceParams {
    /// Extracts parameters from a flat JSON object (`seed`, `x`, `y`, `w`,
    /// `h`, `scale`, `k`, `pds_attempts`), falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            seed: param_seed(params, "seed", 0),
            bounds: Bounds::new(
                param_f64(params, "x", 0.0),
                param_f64(params, "y", 0.0),
                param_f64(params, "w", DEFAULT_SIZE),
                param_f64(params, "h", DEFAULT_SIZE),
            ),
            scale: param_f64(params, "scale", DEFAULT_SCALE),
            k: param_i64(params, "k", DEFAULT_K),
            pds_attempts: param_u32(params, "pds_attempts", DEFAULT_PDS_ATTEMPTS),
        }
    }

    /// Number of nearest distances evaluation needs.
    fn window(&self) -> Result<usize, FieldError> {
        match self.k {
            CRACKLE => Ok(2),
            k if k < CRACKLE => Err(FieldError::InvalidParameter(format!(
                "k must be -1 (crackle) or a non-negative rank, got {k}"
            ))),
            k => usize::try_from(k)
                .ok()
                .and_then(|k| k.checked_add(2))
                .ok_or_else(|| FieldError::InvalidParameter(format!("rank {k} too large"))),
        }
    }
}

/// Voronoi-style distance field with a fixed, eagerly sampled point set.
pub struct DistanceField {
    params: DistanceParams,
    window: usize,
    points: Vec<Point>,
}

impl DistanceField {
    /// Samples the point set and checks it is large enough for the rank.
    ///
    /// This is the only expensive step; evaluation afterwards is a linear
    /// scan over the points.
    pub fn new(params: DistanceParams) -> Result<Self, FieldError> {
        if !params.scale.is_finite() || params.scale <= 0.0 {
            return Err(FieldError::InvalidParameter(format!(
                "scale must be positive and finite, got {}",
                params.scale
            )));
        }
        let window = params.window()?;
        let mut rng = Xorshift64::new(params.seed);
        let points = poisson::sample(
            params.bounds.inflate(params.scale),
            params.scale,
            params.pds_attempts,
            &mut rng,
        );
        if points.len() < window {
            return Err(FieldError::InsufficientPoints {
                k: params.k,
                required: window,
                available: points.len(),
            });
        }
        debug!(
            "distance field seed {} k {} sampled {} points",
            params.seed,
            params.k,
            points.len()
        );
        Ok(Self {
            params,
            window,
            points,
        })
    }

    /// Builds the field from a flat JSON object, see [`DistanceParams::from_json`].
    pub fn from_json(params: &Value) -> Result<Self, FieldError> {
        Self::new(DistanceParams::from_json(params))
    }

    /// The parameters the field was built with.
    pub fn params(&self) -> &DistanceParams {
        &self.params
    }

    /// The sampled point set, in generation order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The `window` smallest distances from `(x, y)`, ascending.
    fn nearest(&self, x: f64, y: f64) -> Vec<f64> {
        let mut dists: Vec<f64> = self.points.iter().map(|p| p.distance_to(x, y)).collect();
        if dists.len() > self.window {
            dists.select_nth_unstable_by(self.window - 1, f64::total_cmp);
            dists.truncate(self.window);
        }
        dists.sort_unstable_by(f64::total_cmp);
        dists
    }
}

impl SignalField for DistanceField {
    fn signature(&self) -> Vec<u8> {
        let p = &self.params;
        Signature::new()
            .push_int(p.seed as i64)
            .push_real(p.bounds.x)
            .push_real(p.bounds.y)
            .push_real(p.bounds.w)
            .push_real(p.bounds.h)
            .push_real(p.scale)
            .push_int(p.k)
            .push_int(p.pds_attempts as i64)
            .finish()
    }

    fn range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    /// 0 outside the bounds; otherwise `1 - target / (border + 1)` clamped
    /// to [0, 1].
    fn eval(&self, x: f64, y: f64) -> f64 {
        if !self.params.bounds.contains(x, y) {
            return 0.0;
        }
        let d = self.nearest(x, y);
        let (target, border) = match self.params.k {
            CRACKLE => (d[1] - d[0], (d[0] + d[1]) / 2.0),
            k => (d[k as usize], d[k as usize + 1]),
        };
        clamp(1.0 - scale(target, 0.0, border + 1.0, 0.0, 1.0), 0.0, 1.0)
    }
}
