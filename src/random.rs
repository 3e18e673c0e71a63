//! Injectable randomness.
//!
//! Every stochastic decision in the engines (room tie-breaks, conflict draws,
//! load randomization) goes through [`RandomSource`], so tests can pin the
//! exact sequence of draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniform random draws.
pub trait RandomSource {
    /// Returns a uniform value in `[0, 1)`.
    fn unit(&mut self) -> f64;

    /// Returns a uniform index in `0..n`.
    ///
    /// `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "below() called with an empty range");
        ((self.unit() * n as f64) as usize).min(n.saturating_sub(1))
    }
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(R);

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl RngSource<StdRng> {
    /// Seeded standard generator, reproducible across runs.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }

    fn below(&mut self, n: usize) -> usize {
        self.0.gen_range(0..n)
    }
}

/// Replays a fixed list of unit draws, cycling when exhausted.
///
/// Intended for tests that need to pin tie-breaks and conflict outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a scripted source.
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty or any value is outside `[0, 1)`.
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        let values = values.into();
        assert!(!values.is_empty(), "scripted source needs at least one value");
        assert!(
            values.iter().all(|v| (0.0..1.0).contains(v)),
            "scripted values must lie in [0, 1)"
        );
        Self { values, cursor: 0 }
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn unit(&mut self) -> f64 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
