//! Race Track - deterministic procedural track geometry
//!
//! Core modules:
//! - `pipeline`: Seeded generation stages (PRNG, sampling, hull, relaxation, spline)
//! - `track`: The immutable `Track` and its arc-length queries
//! - `settings`: Generator tuning with JSON load/save
//! - `cache`: Caller-owned track cache keyed by (seed, width, height)
//!
//! The same seed and canvas always produce the same track, bit for bit.

pub mod cache;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod settings;
pub mod track;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use cache::TrackCache;
pub use error::{Result, TrackError};
pub use generator::{Canvas, generate, generate_with};
pub use settings::GeneratorSettings;
pub use track::{Corner, CornerScan, Track};

pub use glam::DVec2;

/// Generator constants
///
/// Changing any of these changes the track produced for every existing seed.
pub mod consts {
    /// Minimum number of raw control points
    pub const MIN_POINTS: u32 = 8;
    /// Extra points drawn on top of `MIN_POINTS` (count is `MIN_POINTS + [0, POINT_RANGE)`)
    pub const POINT_RANGE: u32 = 5;
    /// Sampling ellipse half-axes as a fraction of canvas width/height
    pub const ELLIPSE_SCALE: f64 = 0.35;
    /// Lower bound of the random radial factor (upper bound is 1.0)
    pub const MIN_RADIUS_FACTOR: f64 = 0.5;

    /// Midpoint displacement as a fraction of min(width, height)
    pub const DISPLACEMENT_SCALE: f64 = 0.12;

    /// Minimum control edge length as a fraction of min(width, height)
    pub const MIN_DISTANCE_SCALE: f64 = 0.08;
    /// Minimum turn angle at a control vertex (30°)
    pub const MIN_ANGLE: f64 = std::f64::consts::PI / 6.0;
    /// Outward push applied to a too-sharp vertex, in canvas units
    pub const PUSH_STEP: f64 = 5.0;
    /// Relaxation passes (fixed, no convergence check)
    pub const RELAX_ITERATIONS: u32 = 5;

    /// Catmull-Rom samples per control segment
    pub const SAMPLES_PER_SEGMENT: u32 = 60;

    /// Lap-fraction step for central-difference tangents
    pub const TANGENT_EPSILON: f64 = 0.0005;

    /// Social preview canvas
    pub const OG_WIDTH: f64 = 1200.0;
    pub const OG_HEIGHT: f64 = 630.0;
}

/// Wrap a lap fraction into [0, 1)
///
/// Negative and >1 values wrap around, so `-0.25` maps to `0.75`.
#[inline]
pub fn wrap_unit(t: f64) -> f64 {
    ((t % 1.0) + 1.0) % 1.0
}

/// 2D cross product (z component of a × b)
#[inline]
pub fn cross(a: DVec2, b: DVec2) -> f64 {
    a.x * b.y - a.y * b.x
}
