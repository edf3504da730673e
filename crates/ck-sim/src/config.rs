//! `SimConfig` - every knob of a run.

use ck_core::{CartSizeDistribution, ScanTime, SimClock};
use ck_floor::FloorLayout;
use ck_schedule::{ArrivalSchedule, ProvisioningSchedule};

/// Top-level simulation configuration.
///
/// Typically assembled by the application crate (or deserialized from JSON
/// with the `serde` feature) and handed to [`SimBuilder`][crate::SimBuilder],
/// which validates it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and tick duration always produce
    /// identical runs.
    pub seed: u64,

    /// Seconds per tick.  Default: 1.
    pub tick_duration_secs: u32,

    /// Mean seconds between arrivals.  A time-varying table also fixes the
    /// store time at which the clock starts.
    pub arrivals: ArrivalSchedule,

    /// How many lanes should be open.
    pub provisioning: ProvisioningSchedule,

    pub scan_time: ScanTime,
    pub cart_size: CartSizeDistribution,

    /// Probability that a new shopper is an `Observer`.
    pub observer_probability: f64,

    /// Stop generating arrivals once this many customers have been created.
    pub customer_limit: Option<u64>,

    /// Stop generating arrivals at this store time (seconds since midnight).
    pub time_limit_secs: Option<f64>,

    /// Total lanes built at start.  `None` sizes the pool to the largest
    /// provisioning target.
    pub cashier_capacity: Option<usize>,

    pub layout: FloorLayout,

    /// Emit a floor snapshot every N ticks.  `0` disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed:                  42,
            tick_duration_secs:    1,
            arrivals:              ArrivalSchedule::Fixed(30.0),
            provisioning:          ProvisioningSchedule::Fixed(5),
            scan_time:             ScanTime::default(),
            cart_size:             CartSizeDistribution::default(),
            observer_probability:  0.1,
            customer_limit:        Some(1_000),
            time_limit_secs:       None,
            cashier_capacity:      None,
            layout:                FloorLayout::default(),
            output_interval_ticks: 0,
        }
    }
}

impl SimConfig {
    /// Construct a `SimClock` starting at the first arrival bucket.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.arrivals.start_secs(), self.tick_duration_secs)
    }

    /// Number of lanes to build: the configured capacity, or the largest
    /// provisioning target.
    pub fn effective_capacity(&self) -> usize {
        self.cashier_capacity.unwrap_or_else(|| self.provisioning.max_target())
    }

    /// `true` if arrival generation is guaranteed to stop at some point.
    pub fn has_arrival_cutoff(&self) -> bool {
        if self.customer_limit.is_some() || self.time_limit_secs.is_some() {
            return true;
        }
        match &self.arrivals {
            ArrivalSchedule::Fixed(mean) => *mean == 0.0,
            ArrivalSchedule::TimeVarying(table) => {
                table.rows().iter().any(|(_, mean)| *mean == 0.0)
            }
        }
    }
}
