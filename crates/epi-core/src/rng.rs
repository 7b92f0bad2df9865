//! Deterministic model-wide RNG.
//!
//! # Determinism strategy
//!
//! A model owns exactly one `SimRng`, seeded from `ModelConfig::seed`.  Every
//! stochastic draw (binomial infection counts, member selection, any host
//! randomness) is routed through it, and the simulation is single-threaded,
//! so two runs with the same seed and inputs consume the stream in the same
//! order and produce identical timelines.  Nothing in the workspace touches
//! `thread_rng` or another global source.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};

/// The single pseudo-random generator of a model.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types
    /// (`rng.inner().sample(...)`, etc.)
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

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Number of successes in `n` Bernoulli trials with probability `p`.
    ///
    /// `p` is clamped to [0, 1]; NaN is treated as 0.
    pub fn binomial(&mut self, n: u64, p: f64) -> u64 {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        if n == 0 || p == 0.0 {
            return 0;
        }
        match Binomial::new(n, p) {
            Ok(dist) => dist.sample(&mut self.0),
            Err(_) => 0,
        }
    }
}
