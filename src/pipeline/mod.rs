//! Track generation pipeline
//!
//! Stages run strictly in order and share no state besides the PRNG:
//! - Seeded PRNG only (no OS entropy)
//! - Stable iteration order over control points
//! - No rendering or platform dependencies

pub mod displace;
pub mod hull;
pub mod relax;
pub mod rng;
pub mod sampler;
pub mod spline;

pub use displace::displace_midpoints;
pub use hull::convex_hull;
pub use relax::{RelaxParams, Violations, check_constraints, relax, vertex_angle};
pub use rng::{Mulberry32, hash_seed};
pub use sampler::sample_control_points;
pub use spline::{catmull_rom_closed, catmull_rom_point};
