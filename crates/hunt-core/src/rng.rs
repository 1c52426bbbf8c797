//! Seedable RNG wrapper for treasure generation.
//!
//! A hunt is reproducible when the session is built with an explicit seed;
//! hosts that want a fresh layout every page load use
//! [`HuntRng::from_entropy`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Session-level RNG.
///
/// Used only from the single-threaded session controller.
pub struct HuntRng(SmallRng);

impl HuntRng {
    pub fn new(seed: u64) -> Self {
        HuntRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.
    pub fn from_entropy() -> Self {
        HuntRng(SmallRng::from_entropy())
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl std::fmt::Debug for HuntRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("HuntRng")
    }
}
