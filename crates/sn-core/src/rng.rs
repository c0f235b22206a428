//! Traffic-factor randomness.
//!
//! # Determinism strategy
//!
//! Per-block traffic factors come from a Gaussian source that is injected
//! into map construction rather than reached through a global: production
//! code seeds one [`GaussianTraffic`] per run, tests substitute
//! [`FixedTraffic`] (or a scripted model of their own) and get byte-identical
//! networks every time.  The clamp to the legal factor range belongs to the
//! call site that assigns the factor; this module only answers
//! `gaussian(mean, std_dev)`.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};

// ── TrafficModel ──────────────────────────────────────────────────────────────

/// Source of Gaussian noise for per-block traffic factors.
///
/// Implementations must be deterministic for a fixed construction (seeded
/// RNG, scripted sequence) so that map builds can be replayed.
pub trait TrafficModel {
    /// Draw one sample from a normal distribution with the given mean and
    /// standard deviation.
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64;
}

// ── GaussianTraffic ───────────────────────────────────────────────────────────

/// Seeded Gaussian source backed by a `SmallRng`.
pub struct GaussianTraffic(SmallRng);

impl GaussianTraffic {
    /// Seed deterministically; equal seeds produce equal factor sequences.
    pub fn new(seed: u64) -> Self {
        GaussianTraffic(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy, for runs where reproducibility is not needed.
    pub fn from_entropy() -> Self {
        GaussianTraffic(SmallRng::from_entropy())
    }
}

impl TrafficModel for GaussianTraffic {
    fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(normal) => normal.sample(&mut self.0),
            // Degenerate std_dev (negative or non-finite): collapse to the mean.
            Err(_) => mean,
        }
    }
}

// ── FixedTraffic ──────────────────────────────────────────────────────────────

/// A [`TrafficModel`] that ignores the distribution and returns a fixed
/// value.  The deterministic stand-in for tests and replay runs.
pub struct FixedTraffic(pub f64);

impl TrafficModel for FixedTraffic {
    fn gaussian(&mut self, _mean: f64, _std_dev: f64) -> f64 {
        self.0
    }
}
