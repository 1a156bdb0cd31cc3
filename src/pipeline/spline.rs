//! Closed uniform Catmull-Rom resampling

use glam::DVec2;

/// Point on a Catmull-Rom segment from `p1` (t = 0) to `p2` (t = 1)
#[inline]
pub fn catmull_rom_point(p0: DVec2, p1: DVec2, p2: DVec2, p3: DVec2, t: f64) -> DVec2 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * ((2.0 * p1)
        + (-p0 + p2) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * t3)
}

/// Sample a closed Catmull-Rom loop through `points`
///
/// Each segment contributes `samples_per_segment` samples starting at its
/// first control point and excluding its end, so the output has exactly
/// `points.len() * samples_per_segment` entries and no duplicated seam.
pub fn catmull_rom_closed(points: &[DVec2], samples_per_segment: usize) -> Vec<DVec2> {
    let n = points.len();
    let mut result = Vec::with_capacity(n * samples_per_segment);

    for i in 0..n {
        let p0 = points[(i + n - 1) % n];
        let p1 = points[i];
        let p2 = points[(i + 1) % n];
        let p3 = points[(i + 2) % n];

        for j in 0..samples_per_segment {
            let t = j as f64 / samples_per_segment as f64;
            result.push(catmull_rom_point(p0, p1, p2, p3, t));
        }
    }

    result
}
