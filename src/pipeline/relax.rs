//! Separation solver
//!
//! Fixed-iteration relaxation over the closed control polygon. Each pass
//! first spreads out edges shorter than the minimum length, then pushes out
//! vertices whose turn is sharper than the minimum angle. There is no
//! convergence check: the iteration count is the stopping rule.

use glam::DVec2;
use std::f64::consts::PI;

/// Relaxation constraints
#[derive(Debug, Clone, Copy)]
pub struct RelaxParams {
    pub min_distance: f64,
    pub min_angle: f64,
    pub push_step: f64,
    pub iterations: u32,
}

/// Interior angle at `curr` between the edges to `prev` and `next`
///
/// Returns π (straight) when either edge has zero length.
pub fn vertex_angle(prev: DVec2, curr: DVec2, next: DVec2) -> f64 {
    let v1 = prev - curr;
    let v2 = next - curr;
    let mag = v1.length() * v2.length();
    if mag == 0.0 {
        return PI;
    }
    (v1.dot(v2) / mag).clamp(-1.0, 1.0).acos()
}

/// Unit vector of `v`, treating a zero length as 1
#[inline]
fn unit_or_raw(v: DVec2) -> DVec2 {
    let len = v.length();
    if len == 0.0 { v } else { v / len }
}

/// Spread every edge shorter than `min_distance` to exactly that length
fn separate_edges(points: &mut [DVec2], min_distance: f64) {
    let n = points.len();
    for i in 0..n {
        let j = (i + 1) % n;
        let (a, b) = (points[i], points[j]);
        if a.distance(b) < min_distance {
            let mid = (a + b) / 2.0;
            let dir = unit_or_raw(b - a);
            let half = min_distance / 2.0;
            points[i] = mid - dir * half;
            points[j] = mid + dir * half;
        }
    }
}

/// Push every too-sharp vertex away from its neighbours' midpoint
fn open_sharp_turns(points: &mut [DVec2], min_angle: f64, push_step: f64) {
    let n = points.len();
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];
        if vertex_angle(prev, curr, next) < min_angle {
            let mid = (prev + next) / 2.0;
            points[i] = curr + unit_or_raw(curr - mid) * push_step;
        }
    }
}

/// Relax the control polygon in place
pub fn relax(points: &mut [DVec2], params: &RelaxParams) {
    if points.len() < 2 {
        return;
    }
    for _ in 0..params.iterations {
        separate_edges(points, params.min_distance);
        open_sharp_turns(points, params.min_angle, params.push_step);
    }
}

/// Constraint violations left after relaxation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Violations {
    pub short_edges: usize,
    pub sharp_turns: usize,
}

impl Violations {
    pub fn is_clean(&self) -> bool {
        self.short_edges == 0 && self.sharp_turns == 0
    }
}

/// Count edges and vertices that still break the constraints
///
/// The relaxation is a heuristic, so clustered inputs may not satisfy it.
/// `min_distance` is compared with a relative tolerance since a spread edge
/// lands on the limit up to rounding.
pub fn check_constraints(points: &[DVec2], params: &RelaxParams) -> Violations {
    let n = points.len();
    let mut violations = Violations::default();
    if n < 3 {
        return violations;
    }
    let tolerance = params.min_distance * 1e-9;
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let curr = points[i];
        let next = points[(i + 1) % n];
        if curr.distance(next) < params.min_distance - tolerance {
            violations.short_edges += 1;
        }
        if vertex_angle(prev, curr, next) < params.min_angle {
            violations.sharp_turns += 1;
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> RelaxParams {
        RelaxParams {
            min_distance: 20.0,
            min_angle: PI / 6.0,
            push_step: 5.0,
            iterations: 5,
        }
    }

    #[test]
    fn test_vertex_angle() {
        let o = DVec2::ZERO;
        assert!((vertex_angle(DVec2::X, o, DVec2::Y) - PI / 2.0).abs() < 1e-12);
        assert!((vertex_angle(DVec2::X, o, -DVec2::X) - PI).abs() < 1e-12);
        assert!(vertex_angle(DVec2::X, o, DVec2::X).abs() < 1e-6);
        // Degenerate edge reads as straight
        assert_eq!(vertex_angle(o, o, DVec2::X), PI);
    }

    #[test]
    fn test_short_edge_spread_around_midpoint() {
        let mut points = vec![DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0)];
        separate_edges(&mut points[..], 20.0);
        // Only the first pair is spread, then the closing pair is already long enough
        assert!((points[0] - DVec2::new(-8.0, 0.0)).length() < 1e-12);
        assert!((points[1] - DVec2::new(12.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_coincident_points_stay_put() {
        // Zero-length direction guard: no NaNs, points unchanged
        let mut points = vec![DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0), DVec2::new(50.0, 1.0)];
        separate_edges(&mut points[..], 20.0);
        assert!(points.iter().all(|p| p.is_finite()));
        assert_eq!(points[0], DVec2::new(1.0, 1.0));
    }

    #[test]
    fn test_sharp_turn_pushed_outward() {
        // Spike at index 1
        let mut points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(50.0, 200.0),
            DVec2::new(100.0, 0.0),
            DVec2::new(50.0, -100.0),
        ];
        let before = points[1];
        open_sharp_turns(&mut points, PI / 6.0, 5.0);
        assert!((points[1] - (before + DVec2::new(0.0, 5.0))).length() < 1e-9);
    }

    #[test]
    fn test_relax_preserves_count() {
        let mut points: Vec<DVec2> = (0..20)
            .map(|i| {
                let a = i as f64 / 20.0 * std::f64::consts::TAU;
                DVec2::new(a.cos() * 50.0, a.sin() * 30.0)
            })
            .collect();
        relax(&mut points, &params());
        assert_eq!(points.len(), 20);
        assert!(points.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_relax_clears_short_edges_on_loose_polygon() {
        // Regular 8-gon, radius 100, with two vertices nudged together
        let mut points: Vec<DVec2> = (0..8)
            .map(|i| {
                let a = i as f64 / 8.0 * std::f64::consts::TAU;
                DVec2::new(a.cos() * 100.0, a.sin() * 100.0)
            })
            .collect();
        points[1] = points[0] + DVec2::new(-3.0, 5.0);
        relax(&mut points, &params());
        assert!(check_constraints(&points, &params()).is_clean());
    }

    #[test]
    fn test_check_constraints_counts() {
        let points = vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(5.0, 0.0),
            DVec2::new(100.0, 100.0),
            DVec2::new(0.0, 100.0),
        ];
        let v = check_constraints(&points, &params());
        assert_eq!(v.short_edges, 1);
        assert!(!v.is_clean());
    }
}
