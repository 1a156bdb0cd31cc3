//! Raw control point sampling
//!
//! Points sit at even angular steps around an ellipse centred on the canvas,
//! each pulled inward by a random radial factor.

use glam::DVec2;
use std::f64::consts::TAU;

use super::rng::Mulberry32;
use crate::settings::GeneratorSettings;

/// Scatter the raw control points for a track
///
/// Draws the point count first, then one radial factor per point, in
/// angular order. `size` is the canvas (width, height).
pub fn sample_control_points(
    rng: &mut Mulberry32,
    center: DVec2,
    size: DVec2,
    settings: &GeneratorSettings,
) -> Vec<DVec2> {
    let count = settings.min_points as usize
        + (rng.next_f64() * settings.point_range as f64).floor() as usize;
    let radii = size * settings.ellipse_scale;
    let spread = 1.0 - settings.min_radius_factor;

    (0..count)
        .map(|i| {
            let angle = (i as f64 / count as f64) * TAU;
            let factor = settings.min_radius_factor + rng.next_f64() * spread;
            DVec2::new(
                center.x + angle.cos() * radii.x * factor,
                center.y + angle.sin() * radii.y * factor,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(seed: &str) -> Vec<DVec2> {
        let mut rng = Mulberry32::from_seed_str(seed);
        sample_control_points(
            &mut rng,
            DVec2::new(400.0, 225.0),
            DVec2::new(800.0, 450.0),
            &GeneratorSettings::default(),
        )
    }

    #[test]
    fn test_point_count_in_range() {
        for seed in ["a", "b", "octocat/Hello-World", "torvalds/linux", ""] {
            let points = sample(seed);
            assert!((8..=12).contains(&points.len()), "{} -> {}", seed, points.len());
        }
    }

    #[test]
    fn test_points_inside_ellipse_band() {
        let center = DVec2::new(400.0, 225.0);
        let radii = DVec2::new(800.0 * 0.35, 450.0 * 0.35);
        for p in sample("octocat/Hello-World") {
            // Normalised elliptical radius equals the radial factor
            let d = (p - center) / radii;
            let r = d.length();
            assert!(r >= 0.5 - 1e-12 && r < 1.0, "factor {}", r);
        }
    }

    #[test]
    fn test_angular_order() {
        let center = DVec2::new(400.0, 225.0);
        let points = sample("angles");
        let angles: Vec<f64> = points
            .iter()
            .map(|p| {
                let a = (p.y - center.y).atan2(p.x - center.x);
                if a < -1e-9 { a + TAU } else { a.max(0.0) }
            })
            .collect();
        assert!(angles.windows(2).all(|w| w[0] < w[1]));
    }
}
