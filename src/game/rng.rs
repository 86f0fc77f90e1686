//! Injected randomness for fruit placement
//!
//! The engine never reaches for a global generator. It is handed a
//! [`RangeRng`] at construction, so games replay exactly under a fixed seed
//! or a scripted closure.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Picks an integer in an inclusive range
pub trait RangeRng {
    /// Returns a value in `[lower, upper]`. Callers guarantee `lower <= upper`.
    fn pick(&mut self, lower: usize, upper: usize) -> usize;
}

impl<F> RangeRng for F
where
    F: FnMut(usize, usize) -> usize,
{
    fn pick(&mut self, lower: usize, upper: usize) -> usize {
        self(lower, upper)
    }
}

/// Adapter that turns any `rand` generator into a [`RangeRng`]
#[derive(Debug, Clone)]
pub struct RandRange<R>(pub R);

impl<R: Rng> RangeRng for RandRange<R> {
    fn pick(&mut self, lower: usize, upper: usize) -> usize {
        self.0.gen_range(lower..=upper)
    }
}

impl RandRange<StdRng> {
    /// Deterministic generator for replays and tests
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }
}
