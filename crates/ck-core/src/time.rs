//! Simulation time model.
//!
//! # Design
//!
//! Time advances as a monotonically increasing `Tick` counter.  The mapping
//! to store time (seconds since midnight) is held in `SimClock`:
//!
//!   now_secs = start_secs + tick * tick_duration_secs
//!
//! The tick counter is the canonical step index, so stepping is exact.  Event
//! timestamps produced by stochastic sampling (service completion, next
//! arrival) are `f64` seconds and are compared against `now_secs()`.
//!
//! The default tick duration is 1 s.  A time-varying arrival table usually
//! starts the clock at opening time (e.g. 07:00 = 25 200 s) rather than 0.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and store-time seconds.
///
/// `SimClock` is cheap to copy and holds no heap data.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Store time (seconds since midnight) of tick 0.
    pub start_secs: u64,
    /// How many simulated seconds one tick represents.  Default: 1.
    pub tick_duration_secs: u32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock starting at `start_secs` with the given resolution.
    pub fn new(start_secs: u64, tick_duration_secs: u32) -> Self {
        Self {
            start_secs,
            tick_duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> u64 {
        self.current_tick.0 * self.tick_duration_secs as u64
    }

    /// Current store time in whole seconds.
    #[inline]
    pub fn now(&self) -> u64 {
        self.start_secs + self.elapsed_secs()
    }

    /// Current store time as `f64`, for comparison against sampled timestamps.
    #[inline]
    pub fn now_secs(&self) -> f64 {
        self.now() as f64
    }

    /// Length of one tick in seconds, as `f64`.
    #[inline]
    pub fn step_secs(&self) -> f64 {
        self.tick_duration_secs as f64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.current_tick, format_hms(self.now_secs()))
    }
}

/// Render seconds as `H:MM:SS`, rounding to the nearest second.
///
/// Negative and non-finite inputs render as `0:00:00`.
pub fn format_hms(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 { secs.round() as u64 } else { 0 };
    format!("{}:{:02}:{:02}", total / 3_600, (total % 3_600) / 60, total % 60)
}
