//! Seed string → Track
//!
//! Random points → convex hull → midpoint displacement → relaxation →
//! Catmull-Rom spline → arc-length index.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{OG_HEIGHT, OG_WIDTH};
use crate::error::{Result, TrackError};
use crate::pipeline::{
    Mulberry32, catmull_rom_closed, check_constraints, convex_hull, displace_midpoints, relax,
    sample_control_points,
};
use crate::settings::GeneratorSettings;
use crate::track::Track;

/// Canvas a track is laid out on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    /// Social preview image canvas (1200x630)
    pub const OG_IMAGE: Self = Self {
        center: DVec2::new(OG_WIDTH / 2.0, OG_HEIGHT / 2.0),
        width: OG_WIDTH,
        height: OG_HEIGHT,
    };

    /// Canvas of the given size, centred in itself
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::with_center(width / 2.0, height / 2.0, width, height)
    }

    pub fn with_center(center_x: f64, center_y: f64, width: f64, height: f64) -> Result<Self> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) || !center_x.is_finite() || !center_y.is_finite() {
            return Err(TrackError::InvalidDimensions { width, height });
        }
        Ok(Self {
            center: DVec2::new(center_x, center_y),
            width,
            height,
        })
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }

    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Generate the canonical track for `seed`
///
/// Never fails. Non-positive or non-finite dimensions are outside the
/// contract and yield a degenerate track; validate with [`Canvas::new`]
/// first when the size comes from outside.
pub fn generate(seed: &str, center_x: f64, center_y: f64, width: f64, height: f64) -> Track {
    let canvas = Canvas {
        center: DVec2::new(center_x, center_y),
        width,
        height,
    };
    generate_with(seed, &canvas, &GeneratorSettings::default())
}

/// Convex hull of `raw`, or its first three points when the hull collapses
fn hull_or_raw(raw: &[DVec2]) -> Vec<DVec2> {
    let hull = convex_hull(raw);
    if hull.len() >= 3 {
        return hull;
    }
    log::warn!("Degenerate hull ({} points), using raw points", hull.len());
    raw.iter().take(3).copied().collect()
}

/// Generate a track with explicit settings
///
/// `settings` are used as given; run [`GeneratorSettings::validate`] on
/// values that come from outside.
pub fn generate_with(seed: &str, canvas: &Canvas, settings: &GeneratorSettings) -> Track {
    let mut rng = Mulberry32::from_seed_str(seed);
    let min_side = canvas.min_side();

    // 1. Raw points around the ellipse
    let raw = sample_control_points(&mut rng, canvas.center, canvas.size(), settings);

    // 2. Convex outline
    let hull = hull_or_raw(&raw);

    // 3. Chicanes
    let displacement = min_side * settings.displacement_scale;
    let mut controls = displace_midpoints(&hull, &mut rng, displacement);

    // 4. Spread out tight spots
    let params = settings.relax_params(min_side);
    relax(&mut controls, &params);
    if cfg!(debug_assertions) {
        let violations = check_constraints(&controls, &params);
        if !violations.is_clean() {
            log::warn!(
                "Seed {:?}: relaxation left {} short edges, {} sharp turns",
                seed,
                violations.short_edges,
                violations.sharp_turns
            );
        }
    }

    // 5. Smooth and index
    let dense = catmull_rom_closed(&controls, settings.samples_per_segment as usize);
    let track = Track::from_polyline(dense, controls.len())
        .with_tangent_epsilon(settings.tangent_epsilon);

    log::debug!(
        "Track {:?}: {} raw, {} hull, {} control, {} samples, length {:.1}",
        seed,
        raw.len(),
        hull.len(),
        controls.len(),
        track.points().len(),
        track.total_length()
    );
    track
}
