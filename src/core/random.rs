// src/core/random.rs - Injected sources of uniform draws

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of uniformly distributed draws.
///
/// The loop never touches a global generator; every draw (the initial guess
/// and each perturbation delta) goes through one of these.
pub trait RandomSource {
    /// Draw a value in `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

/// Adapter over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// Reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    /// Reversed bounds are swapped and a zero-width window returns its bound.
    /// A non-finite window has no meaningful draw: it is logged and yields 0.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        if low == high {
            return low;
        }
        if !(low.is_finite() && high.is_finite()) {
            tracing::warn!(low, high, "non-finite sampling window, drawing 0");
            return 0.0;
        }
        self.rng.gen_range(low..=high)
    }
}

/// Replays a fixed sequence of draws.
///
/// Each scripted value is clamped into the requested range. Once the script
/// runs out, the midpoint of the range is returned (a zero delta for the
/// symmetric perturbation window).
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<f64>,
    consumed: usize,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = f64>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far, including past the end of the script.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.consumed += 1;
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        match self.draws.pop_front() {
            Some(v) if low <= high => v.clamp(low, high),
            // NaN bound
            Some(_) => 0.0,
            None => low + (high - low) / 2.0,
        }
    }
}
