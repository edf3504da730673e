//! The `Sim` struct and its tick loop.

use std::collections::{BTreeMap, VecDeque};

use ck_core::{CashierId, CustomerId, CustomerKind, RandomProcess, SimClock, Tick, format_hms};
use ck_floor::{Cashier, CashierStatus, Customer, CustomerStatus};
use log::{debug, info, warn};

use crate::{
    CashierSummary, CashierView, CustomerRecord, CustomerView, FloorSnapshot, NoopObserver,
    QueueContext, RunStats, SimConfig, SimError, SimObserver, SimResult, SimSummary, TickSummary,
};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The simulation clock and everything it owns.
///
/// `Sim` drives the four-phase tick loop:
///
/// 1. **Provisioning**: reconcile the open-lane count with the staffing
///    table (see `staffing.rs`).
/// 2. **Cashiers**: open activating lanes, release finished customers, call
///    the next ready customer, retire drained lanes.
/// 3. **Arrivals**: spawn at most one customer and send it to a lane.
/// 4. **Customers**: advance every customer one step, jockey, and drop the
///    ones that have left the store.
///
/// Lanes freed in phase 2 are visible to the arrival in phase 3 of the same
/// tick.  Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    /// Run configuration, validated by the builder.
    pub config: SimConfig,

    /// Simulation clock: current tick and store time.
    pub clock: SimClock,

    /// The run's single random stream.
    pub(crate) rng: RandomProcess,

    /// Every lane ever built, indexed by `CashierId::index()`.  Lanes are
    /// never removed, only moved between pools.
    pub(crate) cashiers: Vec<Cashier>,

    /// Lanes activating, serving or draining, in activation order.
    pub(crate) active: Vec<CashierId>,

    /// Idle lanes.  Activation takes from the front; retirement pushes to the
    /// back.
    pub(crate) inactive: VecDeque<CashierId>,

    /// Customers on the floor, keyed (and iterated) by id.
    pub(crate) customers: BTreeMap<CustomerId, Customer>,

    /// Store time after which the next arrival is due.
    pub(crate) next_arrival: f64,

    /// Once set, no more customers are generated.
    pub(crate) cut_off: bool,

    /// Staffing bucket applied by the last reconciliation.
    pub(crate) last_bucket: Option<usize>,

    pub(crate) stats: RunStats,
}

impl Sim {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run until arrivals are cut off and the floor is empty.
    ///
    /// The termination check runs after a tick's processing and before the
    /// clock advances, so `end_secs` is the store time of the last busy tick.
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimSummary> {
        info!("run starts at {} (seed {})", self.clock, self.config.seed);
        loop {
            let tick = self.clock.current_tick;
            observer.on_tick_start(tick);
            let summary = self.process_tick(tick, observer)?;
            observer.on_tick_end(tick, &summary);
            self.maybe_snapshot(tick, observer);

            if self.is_finished() {
                break;
            }
            self.clock.advance();
        }

        let summary = self.summary();
        info!(
            "run ends at {}: {} customers, {} served, mean wait {}",
            self.clock,
            summary.customer_count,
            summary.customers_served,
            format_hms(summary.mean_waiting_secs),
        );
        observer.on_sim_end(&summary);
        Ok(summary)
    }

    /// Run exactly `n` ticks from the current position, ignoring termination.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick without an observer, then advance the clock.
    pub fn tick(&mut self) -> SimResult<TickSummary> {
        self.step(&mut NoopObserver)
    }

    /// `true` once arrivals are cut off and no customer remains.
    pub fn is_finished(&self) -> bool {
        self.cut_off && self.customers.is_empty()
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn cashier(&self, id: CashierId) -> Option<&Cashier> {
        self.cashiers.get(id.index())
    }

    /// Every lane ever built, in id order.
    pub fn cashiers(&self) -> &[Cashier] {
        &self.cashiers
    }

    /// Lanes in the active pool, in activation order.
    pub fn active_cashiers(&self) -> &[CashierId] {
        &self.active
    }

    pub fn inactive_cashiers(&self) -> impl Iterator<Item = CashierId> + '_ {
        self.inactive.iter().copied()
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    /// Customers on the floor, in id order.
    pub fn customers(&self) -> impl Iterator<Item = &Customer> + '_ {
        self.customers.values()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn is_cut_off(&self) -> bool {
        self.cut_off
    }

    /// Store time after which the next arrival is due.
    pub fn next_arrival(&self) -> f64 {
        self.next_arrival
    }

    /// Identity, position and status of every active lane and customer.
    pub fn floor_snapshot(&self) -> FloorSnapshot {
        FloorSnapshot {
            now_secs:  self.clock.now_secs(),
            cashiers:  self
                .active
                .iter()
                .filter_map(|&id| self.cashier(id))
                .map(CashierView::from)
                .collect(),
            customers: self.customers.values().map(CustomerView::from).collect(),
        }
    }

    /// Values reported at the end of a run.
    pub fn summary(&self) -> SimSummary {
        let now = self.clock.now_secs();
        SimSummary {
            customer_count:    self.stats.customers_generated,
            customers_served:  self.stats.customers_served,
            mean_waiting_secs: self.stats.mean_waiting_secs(),
            end_secs:          now,
            end_tick:          self.clock.current_tick,
            forced_releases:   self.stats.forced_releases,
            cashiers:          self
                .cashiers
                .iter()
                .map(|c| CashierSummary {
                    id:               c.id,
                    customers_served: c.customers_served,
                    busy_secs:        c.busy_secs,
                    open_secs:        c.open_secs(now),
                })
                .collect(),
        }
    }

    /// Admit a customer with the given kind and cart, sending it to a lane.
    ///
    /// Arrival generation samples kind and cart and calls this; it is public
    /// so drivers and tests can inject customers directly.
    pub fn admit_customer(&mut self, kind: CustomerKind, cart_size: u32) -> SimResult<CustomerId> {
        let tick = self.clock.current_tick;
        let now = self.clock.now_secs();
        let id = CustomerId(self.stats.customers_generated + 1);
        let layout = &self.config.layout;
        let customer = Customer::new(
            id,
            kind,
            cart_size.max(1),
            now,
            layout.entry_column,
            layout.lane_length,
        );
        self.customers.insert(id, customer);
        self.stats.customers_generated += 1;
        self.assign_lane(id, tick)?;
        Ok(id)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let tick = self.clock.current_tick;
        observer.on_tick_start(tick);
        let summary = self.process_tick(tick, observer)?;
        observer.on_tick_end(tick, &summary);
        self.maybe_snapshot(tick, observer);
        self.clock.advance();
        Ok(summary)
    }

    fn process_tick<O: SimObserver>(&mut self, tick: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.now_secs();
        let mut summary = TickSummary { now_secs: now, ..TickSummary::default() };

        // ── Phase 1: provisioning ─────────────────────────────────────────
        self.reconcile_staffing(tick, now)?;

        // ── Phase 2: cashier transitions ──────────────────────────────────
        self.step_cashiers(tick, now, &mut summary)?;

        // ── Phase 3: arrivals ─────────────────────────────────────────────
        self.generate_arrival(tick, now, &mut summary)?;

        // ── Phase 4: customer transitions ─────────────────────────────────
        self.step_customers(tick, now, &mut summary, observer)?;

        summary.active_cashiers = self.active.len();
        summary.open_cashiers = self.open_lane_count();
        summary.active_customers = self.customers.len();
        Ok(summary)
    }

    fn maybe_snapshot<O: SimObserver>(&self, tick: Tick, observer: &mut O) {
        let interval = self.config.output_interval_ticks;
        if interval > 0 && tick.0.is_multiple_of(interval) {
            observer.on_snapshot(tick, &self.floor_snapshot());
        }
    }

    // ── Phase 2: cashiers ─────────────────────────────────────────────────

    fn step_cashiers(&mut self, tick: Tick, now: f64, summary: &mut TickSummary) -> SimResult<()> {
        // The pool shrinks when a lane retires, so walk a copy.
        let ids = self.active.clone();
        for id in ids {
            let step = self.clock.step_secs();
            let cashier = &mut self.cashiers[id.index()];
            match cashier.status() {
                CashierStatus::Activating => {
                    if tick > cashier.activated_at {
                        cashier.open(now)?;
                        debug!("{id} opens at {}", format_hms(now));
                    }
                }
                CashierStatus::Busy => {
                    if now > cashier.completion_time {
                        // Only a lane that missed a tick can be this late.
                        let late = now - cashier.completion_time;
                        if late > step {
                            warn!(
                                "{id} released {late:.1}s after completion at {}",
                                format_hms(cashier.completion_time),
                            );
                            self.stats.forced_releases += 1;
                        }
                        self.release_customer(id, tick)?;
                        summary.departures += 1;
                    }
                }
                CashierStatus::Available => {
                    if cashier.queue_len() == 0 && !cashier.open_for_entry {
                        cashier.retire(now)?;
                        self.active.retain(|&a| a != id);
                        self.inactive.push_back(id);
                        info!("{id} retires at {}", format_hms(now));
                    } else if self.call_customer(id, tick, now)? {
                        summary.services_started += 1;
                    }
                }
                CashierStatus::Inactive => {
                    return Err(SimError::Invariant {
                        tick,
                        detail: format!("{id} is inactive but in the active pool"),
                    });
                }
            }
        }
        Ok(())
    }

    /// Serve the first queued customer who is ready.  Returns `false` if
    /// nobody is.
    fn call_customer(&mut self, id: CashierId, tick: Tick, now: f64) -> SimResult<bool> {
        let cashier = &self.cashiers[id.index()];
        let next = cashier.queue().iter().copied().find(|c| {
            self.customers.get(c).is_some_and(|c| c.status() == CustomerStatus::Ready)
        });
        let Some(customer_id) = next else {
            return Ok(false);
        };

        let cart_size = self.customer_ref(customer_id, tick)?.cart_size;
        let duration = self.rng.scan_duration(&self.config.scan_time, cart_size);
        self.cashiers[id.index()].begin_service(customer_id, now, duration)?;

        let customer = self.customer_mut(customer_id, tick)?;
        customer.set_status(CustomerStatus::Paying)?;
        customer.paying_arrival_time = now;
        customer.attention_time_span = duration;
        let waited = customer.waiting_secs();
        self.stats.record_wait(now, waited);

        debug!("{id} serves {customer_id} ({cart_size} items, {duration:.1}s)");
        Ok(true)
    }

    fn release_customer(&mut self, id: CashierId, tick: Tick) -> SimResult<()> {
        let customer_id = self.cashiers[id.index()].finish_service()?;
        self.stats.customers_served += 1;

        let exit_length = self.config.layout.exit_length;
        let customer = self.customer_mut(customer_id, tick)?;
        customer.set_status(CustomerStatus::Exiting)?;
        customer.exit_remaining = exit_length;
        debug!("{id} releases {customer_id}");
        Ok(())
    }

    // ── Phase 3: arrivals ─────────────────────────────────────────────────

    fn generate_arrival(&mut self, tick: Tick, now: f64, summary: &mut TickSummary) -> SimResult<()> {
        if self.cut_off {
            return Ok(());
        }
        let limit_reached = self
            .config
            .customer_limit
            .is_some_and(|limit| self.stats.customers_generated >= limit);
        let time_up = self.config.time_limit_secs.is_some_and(|limit| now >= limit);
        if limit_reached || time_up {
            self.cut_off = true;
            info!(
                "arrivals stop at {} after {} customers",
                format_hms(now),
                self.stats.customers_generated,
            );
            return Ok(());
        }

        if now <= self.next_arrival {
            return Ok(());
        }
        let Some(mean) = self.config.arrivals.mean_at(now) else {
            return Ok(());
        };
        if mean == 0.0 {
            self.cut_off = true;
            info!("arrivals close at {}", format_hms(now));
            return Ok(());
        }

        // Due, but nobody is open: the arrival waits for a lane, unless no
        // lane will ever open again.
        if self.open_lane_count() == 0 {
            if self.config.provisioning.is_closed_from(now) {
                self.cut_off = true;
                info!(
                    "arrivals stop at {}: no lane staffed from here on",
                    format_hms(now),
                );
            } else {
                self.next_arrival = now;
            }
            return Ok(());
        }

        let kind = self.rng.customer_kind(self.config.observer_probability);
        let cart_size = self.rng.cart_size(&self.config.cart_size);
        let id = self.admit_customer(kind, cart_size)?;
        self.next_arrival += self.rng.exponential(mean);
        summary.arrivals += 1;

        debug!(
            "{tick}: {id} arrives ({}, {cart_size} items), next at {}",
            kind.as_str(),
            format_hms(self.next_arrival),
        );
        Ok(())
    }

    /// Choose a lane for a spawned customer and start walking to it.
    fn assign_lane(&mut self, id: CustomerId, tick: Tick) -> SimResult<()> {
        let kind = self.customer_ref(id, tick)?.kind;
        let lane = QueueContext::new(&self.cashiers, &self.active, &self.customers)
            .choose_queue(kind)
            .ok_or_else(|| SimError::Invariant {
                tick,
                detail: format!("{id} found no open lane; {}", self.describe_lanes()),
            })?;

        self.cashiers[lane.index()].enqueue(id)?;
        let customer = self.customer_mut(id, tick)?;
        customer.chosen_cashier = Some(lane);
        customer.set_status(CustomerStatus::MovingToQueue)?;
        Ok(())
    }

    // ── Phase 4: customers ────────────────────────────────────────────────

    fn step_customers<O: SimObserver>(
        &mut self,
        tick:     Tick,
        now:      f64,
        summary:  &mut TickSummary,
        observer: &mut O,
    ) -> SimResult<()> {
        let ids: Vec<CustomerId> = self.customers.keys().copied().collect();
        let aisle_depth = self.config.layout.lane_length;

        for id in ids {
            let (status, lane) = {
                let c = self.customer_ref(id, tick)?;
                (c.status(), c.chosen_cashier)
            };
            let column = lane.and_then(|l| self.cashier(l)).map(|c| c.column);

            match status {
                CustomerStatus::Spawned => self.assign_lane(id, tick)?,

                CustomerStatus::MovingToQueue => {
                    let target = self.lane_column(id, column, tick)?;
                    let customer = self.customer_mut(id, tick)?;
                    if customer.walk_to_lane(target) {
                        customer.set_status(CustomerStatus::InQueue)?;
                        customer.queue_arrival_time = now;
                    }
                }

                CustomerStatus::InQueue => {
                    let blocked = self.is_blocked(id);
                    let customer = self.customer_mut(id, tick)?;
                    if customer.advance_in_lane(blocked) {
                        customer.set_status(CustomerStatus::Ready)?;
                    } else if self.try_jockey(id, tick)? {
                        summary.queue_changes += 1;
                    }
                }

                CustomerStatus::ChangingQueue => {
                    let target = self.lane_column(id, column, tick)?;
                    let customer = self.customer_mut(id, tick)?;
                    if customer.change_lane_step(target, aisle_depth) {
                        customer.set_status(CustomerStatus::InQueue)?;
                    }
                }

                // Moved on by the cashier.
                CustomerStatus::Ready | CustomerStatus::Paying => {}

                CustomerStatus::Exiting => {
                    let customer = self.customer_mut(id, tick)?;
                    if customer.walk_out() {
                        customer.set_status(CustomerStatus::Finished)?;
                        customer.exit_time = now;
                        self.finish_customer(id, observer);
                    }
                }

                CustomerStatus::Finished => self.finish_customer(id, observer),
            }
        }
        Ok(())
    }

    fn finish_customer<O: SimObserver>(&mut self, id: CustomerId, observer: &mut O) {
        if let Some(customer) = self.customers.remove(&id) {
            debug!("{id} leaves at {}", format_hms(customer.exit_time));
            observer.on_customer_finished(&CustomerRecord::from_customer(&customer));
        }
    }

    /// `true` if someone of the same lane stands on the cell ahead of `id`.
    fn is_blocked(&self, id: CustomerId) -> bool {
        let Some(me) = self.customers.get(&id) else {
            return false;
        };
        let (Some(lane), Some(ahead)) = (
            me.chosen_cashier.and_then(|l| self.cashier(l)),
            me.depth.checked_sub(1),
        ) else {
            return false;
        };

        let paying = lane.current_customer();
        lane.queue()
            .iter()
            .chain(paying.iter())
            .filter(|&&other| other != id)
            .filter_map(|other| self.customers.get(other))
            .any(|other| {
                other.column == me.column
                    && other.depth == ahead
                    && matches!(
                        other.status(),
                        CustomerStatus::InQueue | CustomerStatus::Ready | CustomerStatus::Paying
                    )
            })
    }

    /// Move `id` to a strictly better neighbouring lane if it is last in a
    /// line of more than one.
    fn try_jockey(&mut self, id: CustomerId, tick: Tick) -> SimResult<bool> {
        let (kind, current) = {
            let c = self.customer_ref(id, tick)?;
            match c.chosen_cashier {
                Some(lane) if c.status() == CustomerStatus::InQueue => (c.kind, lane),
                _ => return Ok(false),
            }
        };
        if !self.cashiers[current.index()].is_last_behind_others(id) {
            return Ok(false);
        }

        let target = QueueContext::new(&self.cashiers, &self.active, &self.customers)
            .search_different_queue(id, kind, current);
        let Some(target) = target else {
            return Ok(false);
        };

        self.cashiers[current.index()].dequeue(id)?;
        self.cashiers[target.index()].enqueue(id)?;
        let customer = self.customer_mut(id, tick)?;
        customer.chosen_cashier = Some(target);
        customer.set_status(CustomerStatus::ChangingQueue)?;
        customer.queue_changes += 1;

        debug!("{id} jockeys from {current} to {target}");
        Ok(true)
    }

    // ── Helpers ───────────────────────────────────────────────────────────

    pub(crate) fn open_lane_count(&self) -> usize {
        self.active
            .iter()
            .filter(|&&id| self.cashiers[id.index()].accepts_customers())
            .count()
    }

    fn customer_ref(&self, id: CustomerId, tick: Tick) -> SimResult<&Customer> {
        self.customers.get(&id).ok_or_else(|| SimError::Invariant {
            tick,
            detail: format!("{id} is not on the floor"),
        })
    }

    fn customer_mut(&mut self, id: CustomerId, tick: Tick) -> SimResult<&mut Customer> {
        self.customers.get_mut(&id).ok_or_else(|| SimError::Invariant {
            tick,
            detail: format!("{id} is not on the floor"),
        })
    }

    fn lane_column(&self, id: CustomerId, column: Option<i32>, tick: Tick) -> SimResult<i32> {
        column.ok_or_else(|| SimError::Invariant {
            tick,
            detail: format!("{id} is walking without a lane"),
        })
    }

    /// One line per active lane, for invariant reports.
    pub(crate) fn describe_lanes(&self) -> String {
        if self.active.is_empty() {
            return "no active lanes".to_owned();
        }
        self.active
            .iter()
            .map(|&id| {
                let c = &self.cashiers[id.index()];
                format!(
                    "{id}[{} open={} queue={}]",
                    c.status(),
                    c.open_for_entry,
                    c.queue_len(),
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}
