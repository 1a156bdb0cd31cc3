//! Convex hull (Andrew's monotone chain)

use glam::DVec2;

use crate::cross;

/// Turn direction of o→a→b (positive = left turn)
#[inline]
fn turn(o: DVec2, a: DVec2, b: DVec2) -> f64 {
    cross(a - o, b - o)
}

/// Pop from `chain` until appending `p` makes a strict left turn
fn push_left_turn(chain: &mut Vec<DVec2>, p: DVec2) {
    while chain.len() >= 2 && turn(chain[chain.len() - 2], chain[chain.len() - 1], p) <= 0.0 {
        chain.pop();
    }
    chain.push(p);
}

/// Convex hull of `points`
///
/// Returns the hull vertices counter-clockwise (in a y-up frame), starting
/// from the lowest-x point. Collinear boundary points are dropped.
/// Inputs with fewer than two points are returned as-is.
pub fn convex_hull(points: &[DVec2]) -> Vec<DVec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    if sorted.len() <= 1 {
        return sorted;
    }

    let mut lower = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        push_left_turn(&mut lower, p);
    }

    let mut upper = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        push_left_turn(&mut upper, p);
    }

    // Each chain ends where the other begins
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}
