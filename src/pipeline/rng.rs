//! Seeded PRNG for track generation
//!
//! Mulberry32 over a 32-bit string hash. Every operation wraps at 32 bits so
//! a browser client and a server render of the same seed see the same stream.
//! Downstream geometry uses `sqrt(x² + y²)` lengths, so sample coordinates
//! can differ from a `Math.hypot` client in the last bit.

use rand::rand_core::impls;
use rand::{RngCore, SeedableRng};

/// 2^32, maps a raw output into [0, 1)
const U32_RANGE: f64 = 4_294_967_296.0;

/// Hash a seed string into the 32-bit PRNG seed
///
/// Walks UTF-16 code units and accumulates `h * 31 + unit` with signed
/// wraparound. The empty string hashes to 0.
pub fn hash_seed(seed: &str) -> i32 {
    seed.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Mulberry32 generator state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: i32) -> Self {
        Self { state: seed as u32 }
    }

    /// Generator for a seed string
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_seed(seed))
    }

    /// Next value in [0, 1)
    ///
    /// Only 32 bits of entropy per draw. The pipeline must use this rather
    /// than `rand::Rng::random::<f64>()`, which consumes 64 bits.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / U32_RANGE
    }

    #[inline]
    fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let s = self.state;
        let mut t = (s ^ (s >> 15)).wrapping_mul(1 | s);
        t = t.wrapping_add((t ^ (t >> 7)).wrapping_mul(61 | t)) ^ t;
        t ^ (t >> 14)
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        impls::fill_bytes_via_next(self, dst)
    }
}

impl SeedableRng for Mulberry32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i32::from_le_bytes(seed))
    }
}
