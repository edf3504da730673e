//! The run's seeded random process.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `RandomProcess`, created from the configured seed
//! and threaded through the tick loop by `&mut`.  Nothing in the simulator
//! touches a thread-local or OS RNG, so the same seed and tick duration
//! always reproduce the same run.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Triangular};

use crate::{CartSizeDistribution, CustomerKind, ScanTime};

/// Seeded source of every stochastic input: inter-arrival gaps, cart sizes,
/// customer kinds and per-item scan durations.
pub struct RandomProcess(SmallRng);

impl RandomProcess {
    pub fn new(seed: u64) -> Self {
        RandomProcess(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    // ── Sampling ──────────────────────────────────────────────────────────

    /// One draw from an exponential distribution with the given mean.
    ///
    /// A non-positive (or non-finite) mean yields `0.0`.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        if !mean.is_finite() || mean <= 0.0 {
            return 0.0;
        }
        match Exp::new(1.0 / mean) {
            Ok(exp) => exp.sample(&mut self.0),
            Err(_)  => 0.0,
        }
    }

    /// Draw a cart size.  Always at least 1.
    pub fn cart_size(&mut self, dist: &CartSizeDistribution) -> u32 {
        let items = match *dist {
            CartSizeDistribution::Triangular { min, max, mode } => {
                if min >= max {
                    min
                } else {
                    let lo = min as f64;
                    let hi = max as f64;
                    let peak = mode.map(|m| m as f64).unwrap_or((lo + hi) / 2.0);
                    match Triangular::new(lo, hi, peak) {
                        Ok(tri) => tri.sample(&mut self.0).round() as u32,
                        Err(_)  => min,
                    }
                }
            }
            CartSizeDistribution::Uniform { min, max } => {
                if min >= max { min } else { self.0.gen_range(min..=max) }
            }
        };
        items.max(1)
    }

    /// Decide the kind of a new shopper.
    pub fn customer_kind(&mut self, observer_probability: f64) -> CustomerKind {
        if self.gen_bool(observer_probability) {
            CustomerKind::Observer
        } else {
            CustomerKind::Regular
        }
    }

    /// Total time to scan `items` items.
    ///
    /// Fixed mode is exact (`items * secs_per_item`); exponential mode sums
    /// one independent draw per item.
    pub fn scan_duration(&mut self, scan: &ScanTime, items: u32) -> f64 {
        match *scan {
            ScanTime::Fixed { secs_per_item } => items as f64 * secs_per_item,
            ScanTime::Exponential { mean_secs_per_item } => {
                (0..items).map(|_| self.exponential(mean_secs_per_item)).sum()
            }
        }
    }
}
