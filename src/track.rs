//! Track geometry and arc-length queries
//!
//! A `Track` is a densely sampled closed polyline plus a cumulative length
//! index over it. Every query takes a lap fraction `t` (0 = start/finish,
//! wrapping at 1) and resolves it by arc length, so equal steps in `t` are
//! equal distances along the track.

use glam::DVec2;
use serde::Serialize;

use crate::consts::TANGENT_EPSILON;
use crate::{cross, wrap_unit};

/// Immutable track produced by the generator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Track {
    points: Vec<DVec2>,
    cumulative_lengths: Vec<f64>,
    total_length: f64,
    /// Control polygon size before splining
    control_points: usize,
    tangent_epsilon: f64,
}

/// A high-curvature spot found by [`Track::corners`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Corner {
    pub t: f64,
    pub point: DVec2,
    /// Left normal of the track at `t`
    pub normal: DVec2,
}

/// Parameters for a curvature scan along the track
///
/// `threshold` is compared against [`Track::turn_sharpness`], which is in
/// squared canvas units, so presets are tuned for typical canvas sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerScan {
    /// Evenly spaced lap fractions to test
    pub samples: usize,
    /// Difference window, in units of one sample step
    pub window: f64,
    pub threshold: f64,
    /// Minimum cyclic lap-fraction gap between reported corners
    pub min_separation: f64,
    pub max: Option<usize>,
}

impl CornerScan {
    /// Every tight sample, for kerb placement
    pub const KERBS: Self = Self {
        samples: 120,
        window: 2.0,
        threshold: 3.5,
        min_separation: 0.0,
        max: None,
    };

    /// Well separated major corners, for turn labels (T1, T2, ...)
    pub const LABELS: Self = Self {
        samples: 100,
        window: 3.0,
        threshold: 8.0,
        min_separation: 0.1,
        max: Some(8),
    };
}

impl Track {
    /// Build the arc-length index over a closed polyline
    pub fn from_polyline(points: Vec<DVec2>, control_points: usize) -> Self {
        let mut cumulative_lengths = Vec::with_capacity(points.len());
        let mut total_length = 0.0;
        if let Some(&first) = points.first() {
            cumulative_lengths.push(0.0);
            for pair in points.windows(2) {
                total_length += pair[0].distance(pair[1]);
                cumulative_lengths.push(total_length);
            }
            // Closing edge back to the start
            if let Some(&last) = points.last() {
                total_length += last.distance(first);
            }
        }

        Self {
            points,
            cumulative_lengths,
            total_length,
            control_points,
            tangent_epsilon: TANGENT_EPSILON,
        }
    }

    pub(crate) fn with_tangent_epsilon(mut self, epsilon: f64) -> Self {
        self.tangent_epsilon = epsilon;
        self
    }

    /// Dense closed polyline (last point joins the first)
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Running arc length at each vertex of [`Track::points`]
    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.cumulative_lengths
    }

    /// Full lap length including the closing segment
    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn control_points(&self) -> usize {
        self.control_points
    }

    /// Position at lap fraction `t`
    ///
    /// `t` wraps, so `point_at(1.25) == point_at(0.25)`. Lookup is a binary
    /// search over the cumulative lengths. Positions past the last vertex
    /// interpolate along the closing segment back to the first.
    pub fn point_at(&self, t: f64) -> DVec2 {
        let n = self.points.len();
        match n {
            0 => return DVec2::ZERO,
            1 => return self.points[0],
            _ => {}
        }

        let target = wrap_unit(t) * self.total_length;
        let i = self
            .cumulative_lengths
            .partition_point(|&len| len < target)
            .saturating_sub(1);
        let j = (i + 1) % n;

        let (a, b) = (self.points[i], self.points[j]);
        let seg_len = a.distance(b);
        let frac = if seg_len > 0.0 {
            ((target - self.cumulative_lengths[i]) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        a + (b - a) * frac
    }

    /// Unit direction of travel at lap fraction `t`
    ///
    /// Central difference over `±tangent_epsilon`. If both probes land on
    /// the same point the zero vector comes back instead of NaN.
    pub fn tangent_at(&self, t: f64) -> DVec2 {
        let a = self.point_at(t - self.tangent_epsilon);
        let b = self.point_at(t + self.tangent_epsilon);
        let d = b - a;
        let len = d.length();
        d / if len > 0.0 { len } else { 1.0 }
    }

    /// Left-hand normal at `t` (tangent rotated +90°)
    pub fn normal_at(&self, t: f64) -> DVec2 {
        self.tangent_at(t).perp()
    }

    /// Point `distance` units to the left of the centreline at `t`
    ///
    /// Negative distances go right.
    pub fn offset_point(&self, t: f64, distance: f64) -> DVec2 {
        self.point_at(t) + self.normal_at(t) * distance
    }

    /// Both ends of the start/finish line, `half_width` either side of `t = 0`
    pub fn start_line(&self, half_width: f64) -> (DVec2, DVec2) {
        (self.offset_point(0.0, half_width), self.offset_point(0.0, -half_width))
    }

    /// Unsigned turn measure: |cross| of the chords into and out of `t`
    pub fn turn_sharpness(&self, t: f64, dt: f64) -> f64 {
        let prev = self.point_at(t - dt);
        let curr = self.point_at(t);
        let next = self.point_at(t + dt);
        cross(curr - prev, next - curr).abs()
    }

    /// Scan the lap for corners sharper than `scan.threshold`
    pub fn corners(&self, scan: &CornerScan) -> Vec<Corner> {
        let mut corners: Vec<Corner> = Vec::new();
        if scan.samples == 0 {
            return corners;
        }
        let dt = scan.window / scan.samples as f64;

        for i in 0..scan.samples {
            if scan.max.is_some_and(|max| corners.len() >= max) {
                break;
            }
            let t = i as f64 / scan.samples as f64;
            if self.turn_sharpness(t, dt) <= scan.threshold {
                continue;
            }
            let too_close = corners.iter().any(|c| {
                let diff = (c.t - t).abs();
                diff.min(1.0 - diff) < scan.min_separation
            });
            if !too_close {
                corners.push(Corner {
                    t,
                    point: self.point_at(t),
                    normal: self.normal_at(t),
                });
            }
        }

        log::trace!("Corner scan: {} of {} samples", corners.len(), scan.samples);
        corners
    }

    /// Axis-aligned bounds of the polyline as (min, max)
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let Some(&first) = self.points.first() else {
            return (DVec2::ZERO, DVec2::ZERO);
        };
        self.points
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)))
    }

    /// Closed SVG path data (`M x,y L x,y ... Z`), one decimal place
    pub fn svg_path(&self) -> String {
        if self.points.is_empty() {
            return String::new();
        }
        let mut d = String::with_capacity(self.points.len() * 14);
        for (i, p) in self.points.iter().enumerate() {
            if i > 0 {
                d.push(' ');
            }
            let cmd = if i == 0 { 'M' } else { 'L' };
            d.push_str(&format!("{}{:.1},{:.1}", cmd, p.x, p.y));
        }
        d.push_str(" Z");
        d
    }

    /// Polyline as interleaved `[x0, y0, x1, y1, ...]`
    pub fn points_flat(&self) -> Vec<f64> {
        self.points.iter().flat_map(|p| [p.x, p.y]).collect()
    }
}
