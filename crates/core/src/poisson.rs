//! Seeded Poisson-disc sampling (Bridson's algorithm).
//!
//! Produces points that are at least `radius` apart, filling the bounds until
//! every active point has failed `attempts` candidate placements. Identical
//! bounds, radius, attempts, and PRNG state give identical point sets.

use crate::prng::Xorshift64;
use crate::signal::Bounds;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::f64::consts::{SQRT_2, TAU};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `(x, y)`.
    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Background acceleration grid: each cell holds at most one point.
struct Grid {
    origin: Bounds,
    cell: f64,
    cols: usize,
    rows: usize,
    slots: Vec<Option<usize>>,
}

impl Grid {
    fn new(bounds: Bounds, radius: f64) -> Option<Self> {
        let cell = radius / SQRT_2;
        let cols = ((bounds.w / cell).ceil() as usize).max(1);
        let rows = ((bounds.h / cell).ceil() as usize).max(1);
        let len = cols.checked_mul(rows)?;
        Some(Self {
            origin: bounds,
            cell,
            cols,
            rows,
            slots: vec![None; len],
        })
    }

    fn cell_of(&self, p: Point) -> (usize, usize) {
        let cx = ((p.x - self.origin.x) / self.cell) as usize;
        let cy = ((p.y - self.origin.y) / self.cell) as usize;
        (cx.min(self.cols - 1), cy.min(self.rows - 1))
    }

    fn insert(&mut self, p: Point, index: usize) {
        let (cx, cy) = self.cell_of(p);
        self.slots[cy * self.cols + cx] = Some(index);
    }

    /// True if no stored point lies closer than `radius` to `p`.
    fn is_clear(&self, p: Point, radius: f64, points: &[Point]) -> bool {
        let (cx, cy) = self.cell_of(p);
        let (x0, x1) = (cx.saturating_sub(2), (cx + 2).min(self.cols - 1));
        let (y0, y1) = (cy.saturating_sub(2), (cy + 2).min(self.rows - 1));
        (y0..=y1).all(|gy| {
            (x0..=x1).all(|gx| match self.slots[gy * self.cols + gx] {
                Some(i) => points[i].distance_to(p.x, p.y) >= radius,
                None => true,
            })
        })
    }
}

/// Samples points over `bounds` with minimum spacing `radius`.
///
/// Returns an empty set for a non-positive or non-finite radius, empty
/// bounds, or a background grid too large to allocate an index for.
pub fn sample(bounds: Bounds, radius: f64, attempts: u32, rng: &mut Xorshift64) -> Vec<Point> {
    let finite = [bounds.x, bounds.y, bounds.w, bounds.h, radius]
        .iter()
        .all(|v| v.is_finite());
    if !finite || radius <= 0.0 || bounds.w <= 0.0 || bounds.h <= 0.0 {
        return Vec::new();
    }
    let Some(mut grid) = Grid::new(bounds, radius) else {
        warn!("poisson grid for {bounds:?} at radius {radius} overflows, no points sampled");
        return Vec::new();
    };

    let mut points = Vec::new();
    let mut active = Vec::new();

    let first = Point::new(
        rng.next_range(bounds.x, bounds.x + bounds.w),
        rng.next_range(bounds.y, bounds.y + bounds.h),
    );
    grid.insert(first, 0);
    points.push(first);
    active.push(0);

    while !active.is_empty() {
        let slot = rng.next_index(active.len());
        let origin = points[active[slot]];
        let mut placed = None;
        for _ in 0..attempts {
            let angle = rng.next_f64() * TAU;
            let dist = rng.next_range(radius, 2.0 * radius);
            let candidate = Point::new(
                origin.x + dist * angle.cos(),
                origin.y + dist * angle.sin(),
            );
            if bounds.contains(candidate.x, candidate.y)
                && grid.is_clear(candidate, radius, &points)
            {
                placed = Some(candidate);
                break;
            }
        }
        match placed {
            Some(p) => {
                let index = points.len();
                grid.insert(p, index);
                points.push(p);
                active.push(index);
            }
            None => {
                active.swap_remove(slot);
            }
        }
    }

    debug!(
        "poisson sampled {} points over {:?} at radius {radius}",
        points.len(),
        bounds
    );
    points
}
