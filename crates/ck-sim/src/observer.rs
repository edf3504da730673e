//! Simulation observer trait for progress reporting, rendering and data
//! collection.

use ck_core::Tick;

use crate::{CustomerRecord, FloorSnapshot, SimSummary, TickSummary};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} customers on the floor", summary.active_customers);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with that tick's counters.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the position and status of every lane and customer.
    ///
    /// This is the renderer's whole view of the floor.
    fn on_snapshot(&mut self, _tick: Tick, _snapshot: &FloorSnapshot) {}

    /// Called once per customer, on the tick it leaves the store.
    fn on_customer_finished(&mut self, _record: &CustomerRecord) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _summary: &SimSummary) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
