//! Midpoint displacement
//!
//! Roughens the convex hull into a track outline by inserting a displaced
//! midpoint on every edge.

use glam::DVec2;

use super::rng::Mulberry32;

/// Insert a displaced midpoint after every vertex of the closed polygon
///
/// The midpoint moves along the edge's left normal by a uniform signed
/// distance in `[-displacement, displacement)`. Zero-length edges get no
/// midpoint and draw no random number.
pub fn displace_midpoints(hull: &[DVec2], rng: &mut Mulberry32, displacement: f64) -> Vec<DVec2> {
    let n = hull.len();
    let mut result = Vec::with_capacity(n * 2);

    for (i, &curr) in hull.iter().enumerate() {
        let next = hull[(i + 1) % n];
        result.push(curr);

        let edge = next - curr;
        let len = edge.length();
        if len > 0.0 {
            let normal = DVec2::new(-edge.y / len, edge.x / len);
            let offset = (rng.next_f64() - 0.5) * 2.0 * displacement;
            result.push((curr + next) / 2.0 + normal * offset);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<DVec2> {
        vec![DVec2::new(0.0, 0.0), DVec2::new(100.0, 0.0), DVec2::new(0.0, 100.0)]
    }

    #[test]
    fn test_doubles_vertex_count_and_keeps_originals() {
        let hull = triangle();
        let mut rng = Mulberry32::new(7);
        let out = displace_midpoints(&hull, &mut rng, 12.0);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], hull[0]);
        assert_eq!(out[2], hull[1]);
        assert_eq!(out[4], hull[2]);
    }

    #[test]
    fn test_midpoints_stay_on_perpendicular_within_bound() {
        let hull = triangle();
        let mut rng = Mulberry32::new(99);
        let displacement = 12.0;
        let out = displace_midpoints(&hull, &mut rng, displacement);
        for i in 0..3 {
            let a = hull[i];
            let b = hull[(i + 1) % 3];
            let mid = (a + b) / 2.0;
            let offset = out[i * 2 + 1] - mid;
            // Perpendicular to the edge
            assert!(offset.dot(b - a).abs() < 1e-9);
            assert!(offset.length() <= displacement);
        }
    }

    #[test]
    fn test_zero_length_edge_skipped() {
        let hull = vec![DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0), DVec2::new(5.0, 1.0)];
        let mut rng = Mulberry32::new(3);
        let out = displace_midpoints(&hull, &mut rng, 10.0);
        assert_eq!(out.len(), 5);
    }

    #[test]
    fn test_zero_displacement_gives_plain_midpoints() {
        let hull = triangle();
        let mut rng = Mulberry32::new(1);
        let out = displace_midpoints(&hull, &mut rng, 0.0);
        assert_eq!(out[1], DVec2::new(50.0, 0.0));
        assert_eq!(out[3], DVec2::new(50.0, 50.0));
        assert_eq!(out[5], DVec2::new(0.0, 50.0));
    }
}
