//! Fluent builder for constructing a [`Sim`].

use std::collections::{BTreeMap, VecDeque};

use ck_core::{CashierId, RandomProcess};
use ck_floor::Cashier;
use ck_schedule::ProvisioningSchedule;

use crate::{RunStats, Sim, SimConfig, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`SimConfig`]: schedules, distributions, limits, layout, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                                  |
/// |--------------|------------------------------------------|
/// | `.rng(r)`    | `RandomProcess::new(config.seed)`        |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config).build()?;
/// let summary = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    config: SimConfig,
    rng:    Option<RandomProcess>,
}

impl SimBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self { config, rng: None }
    }

    /// Supply the random stream instead of seeding one from `config.seed`.
    pub fn rng(mut self, rng: RandomProcess) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration, build the lane pool and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        validate(&self.config)?;
        let config = self.config;

        // ── Lane pool ─────────────────────────────────────────────────────
        let capacity = config.effective_capacity();
        let mut cashiers = Vec::with_capacity(capacity);
        for index in 0..capacity {
            let column = config.layout.column_for(index).ok_or_else(|| {
                SimError::Config(format!("floor has no room for lane {}", index + 1))
            })?;
            cashiers.push(Cashier::new(CashierId::from_index(index), column));
        }
        let inactive: VecDeque<CashierId> = cashiers.iter().map(|c| c.id).collect();

        // ── Clock and first arrival ───────────────────────────────────────
        let clock = config.make_clock();
        let mut rng = self.rng.unwrap_or_else(|| RandomProcess::new(config.seed));
        let first_mean = config.arrivals.mean_at(clock.now_secs()).unwrap_or(0.0);
        let next_arrival = clock.now_secs() + rng.exponential(first_mean);

        Ok(Sim {
            clock,
            config,
            rng,
            cashiers,
            active: Vec::new(),
            inactive,
            customers: BTreeMap::new(),
            next_arrival,
            cut_off: false,
            last_bucket: None,
            stats: RunStats::default(),
        })
    }
}

/// Reject configurations that cannot run or could never terminate.
fn validate(config: &SimConfig) -> SimResult<()> {
    let config_err = |msg: String| Err(SimError::Config(msg));

    if config.tick_duration_secs == 0 {
        return config_err(ck_core::CoreError::ZeroTickDuration.to_string());
    }
    let p = config.observer_probability;
    if !(0.0..=1.0).contains(&p) {
        return config_err(format!("observer probability must be within [0, 1], got {p}"));
    }
    config.cart_size.validate().map_err(|e| SimError::Config(e.to_string()))?;
    config.scan_time.validate().map_err(|e| SimError::Config(e.to_string()))?;
    config.arrivals.validate()?;

    if let Some(limit) = config.time_limit_secs {
        if !limit.is_finite() {
            return config_err(format!("time limit must be finite, got {limit}"));
        }
    }
    if !config.has_arrival_cutoff() {
        return config_err(
            "no customer limit, time limit or closing bucket: arrivals would never stop".into(),
        );
    }

    // ── Lanes ─────────────────────────────────────────────────────────────
    let max_lanes = config.layout.max_lanes();
    let capacity = config.effective_capacity();
    if capacity > max_lanes {
        return config_err(format!("{capacity} lanes requested but the floor holds {max_lanes}"));
    }
    match config.provisioning {
        ProvisioningSchedule::Fixed(0) => {
            return config_err("fixed provisioning needs at least one lane".into());
        }
        ProvisioningSchedule::Fixed(n) if n > capacity => {
            return config_err(format!("fixed provisioning of {n} lanes exceeds capacity {capacity}"));
        }
        _ => {}
    }
    let peak = config.provisioning.max_target();
    if peak > max_lanes {
        return config_err(format!("staffing peaks at {peak} lanes but the floor holds {max_lanes}"));
    }
    Ok(())
}
