//! Run statistics and the records handed to observers.

use std::collections::BTreeMap;

use ck_core::{CashierId, CustomerId, CustomerKind, Tick};
use ck_floor::Customer;

// ── Per-customer record ───────────────────────────────────────────────────────

/// Everything worth keeping about one finished visit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerRecord {
    pub id:                  CustomerId,
    pub kind:                CustomerKind,
    pub cart_size:           u32,
    /// Lane the customer paid at.
    pub cashier:             CashierId,
    pub arrival_time:        f64,
    pub queue_arrival_time:  f64,
    pub paying_arrival_time: f64,
    pub attention_time_span: f64,
    pub exit_time:           f64,
    pub waiting_secs:        f64,
    pub queue_changes:       u32,
}

impl CustomerRecord {
    pub fn from_customer(c: &Customer) -> Self {
        Self {
            id:                  c.id,
            kind:                c.kind,
            cart_size:           c.cart_size,
            cashier:             c.chosen_cashier.unwrap_or(CashierId::INVALID),
            arrival_time:        c.arrival_time,
            queue_arrival_time:  c.queue_arrival_time,
            paying_arrival_time: c.paying_arrival_time,
            attention_time_span: c.attention_time_span,
            exit_time:           c.exit_time,
            waiting_secs:        c.waiting_secs(),
            queue_changes:       c.queue_changes,
        }
    }
}

// ── Per-tick summary ──────────────────────────────────────────────────────────

/// Counters for one tick, passed to [`SimObserver::on_tick_end`][crate::SimObserver::on_tick_end].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickSummary {
    pub now_secs:         f64,
    pub open_cashiers:    usize,
    pub active_cashiers:  usize,
    pub active_customers: usize,
    pub arrivals:         usize,
    pub services_started: usize,
    pub departures:       usize,
    pub queue_changes:    usize,
}

// ── Run statistics ────────────────────────────────────────────────────────────

/// Waiting-time aggregate for one hour of store time.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HourStats {
    pub count:     u64,
    pub mean_secs: f64,
}

/// Accumulated over the whole run by the tick loop.
#[derive(Clone, Debug, Default)]
pub struct RunStats {
    pub customers_generated: u64,
    pub customers_served:    u64,
    /// `(store time recorded, seconds waited)`, one per call to the till.
    pub waiting_samples:     Vec<(f64, f64)>,
    /// Busy lanes released more than a tick after their completion time.
    /// Every busy lane is checked each tick, so this stays `0` unless a lane
    /// was skipped; it is kept as a consistency counter, not a workload metric.
    pub forced_releases:     u64,
    /// Lanes built after start because provisioning outgrew the pool.
    pub capacity_growth:     u64,
}

impl RunStats {
    pub fn record_wait(&mut self, now: f64, waited: f64) {
        self.waiting_samples.push((now, waited));
    }

    /// Mean of all waiting samples, `0.0` if nobody has been served yet.
    pub fn mean_waiting_secs(&self) -> f64 {
        if self.waiting_samples.is_empty() {
            return 0.0;
        }
        let total: f64 = self.waiting_samples.iter().map(|(_, w)| w).sum();
        total / self.waiting_samples.len() as f64
    }

    /// Waiting samples grouped by the store hour they were recorded in.
    pub fn waiting_by_hour(&self) -> BTreeMap<u32, HourStats> {
        let mut sums: BTreeMap<u32, (u64, f64)> = BTreeMap::new();
        for &(at, waited) in &self.waiting_samples {
            let hour = (at.max(0.0) / 3_600.0) as u32;
            let entry = sums.entry(hour).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += waited;
        }
        sums.into_iter()
            .map(|(hour, (count, total))| {
                (hour, HourStats { count, mean_secs: total / count as f64 })
            })
            .collect()
    }
}

// ── End-of-run summary ────────────────────────────────────────────────────────

/// Per-lane totals at the end of a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashierSummary {
    pub id:               CashierId,
    pub customers_served: u64,
    pub busy_secs:        f64,
    pub open_secs:        f64,
}

/// Values returned by [`Sim::run`][crate::Sim::run].  Presentation is left to
/// the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimSummary {
    pub customer_count:    u64,
    pub customers_served:  u64,
    pub mean_waiting_secs: f64,
    pub end_secs:          f64,
    pub end_tick:          Tick,
    /// See [`RunStats::forced_releases`].
    pub forced_releases:   u64,
    pub cashiers:          Vec<CashierSummary>,
}
