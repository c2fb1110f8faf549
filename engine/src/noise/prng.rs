//! Seeded PRNG
//!
//! A 32-bit linear congruential generator. All arithmetic is wrapping `u32`
//! and the float conversion keeps only the top 24 bits, so the stream is
//! bit-identical on every platform and `next_f32` never returns 1.0.

use rand::{Error, RngCore, SeedableRng};

/// Numerical Recipes LCG multiplier
const MULTIPLIER: u32 = 1_664_525;
/// Numerical Recipes LCG increment
const INCREMENT: u32 = 1_013_904_223;
/// 2^-24, maps a 24-bit integer onto [0, 1)
const UNIT_SCALE: f32 = 1.0 / 16_777_216.0;

/// Linear congruential generator producing a reproducible stream.
///
/// Every feature that needs randomness owns its own instance seeded by the
/// caller; there is no shared global stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from an integer seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state (the last emitted value).
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        unit_f32(self)
    }
}

/// Draw a float in [0, 1) from any `RngCore` stream using the same
/// 24-bit mapping as [`Lcg::next_f32`].
pub fn unit_f32<R: RngCore + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 * UNIT_SCALE
}

impl RngCore for Lcg {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
        self.state
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
