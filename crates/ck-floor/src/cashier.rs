//! `Cashier` - one checkout lane and the person working it.

use ck_core::{CashierId, CustomerId, Tick};

use crate::{CashierStatus, FloorError, FloorResult};

/// A checkout lane.
///
/// Created once into the inactive pool and never dropped mid-run; the
/// provisioning reconciler moves it between the active and inactive pools.
///
/// `queue` holds the customers waiting for this lane in service order.  The
/// customer being served is moved out of `queue` into `current_customer`
/// when called, so the two never overlap.
#[derive(Clone, Debug)]
pub struct Cashier {
    pub id: CashierId,
    /// Floor column of this lane.
    pub column: i32,

    status: CashierStatus,

    /// When `false` no new customer may choose or jockey into this lane; it
    /// keeps serving and retires once the queue drains.
    pub open_for_entry: bool,

    queue: Vec<CustomerId>,
    current_customer: Option<CustomerId>,

    /// Store time at which the current service ends.  Meaningful only while
    /// `Busy`.
    pub completion_time: f64,
    /// Store time at which the current service began.
    pub service_start: f64,
    /// Tick on which the lane was last activated.
    pub activated_at: Tick,

    // ── Statistics ────────────────────────────────────────────────────────
    pub customers_served: u64,
    pub busy_secs: f64,
    /// Open time of finished stints; see [`Cashier::open_secs`].
    closed_open_secs: f64,
    opened_at: Option<f64>,
}

impl Cashier {
    /// A new, inactive lane.
    pub fn new(id: CashierId, column: i32) -> Self {
        Self {
            id,
            column,
            status: CashierStatus::Inactive,
            open_for_entry: false,
            queue: Vec::new(),
            current_customer: None,
            completion_time: 0.0,
            service_start: 0.0,
            activated_at: Tick::ZERO,
            customers_served: 0,
            busy_secs: 0.0,
            closed_open_secs: 0.0,
            opened_at: None,
        }
    }

    // ── Status ────────────────────────────────────────────────────────────

    #[inline]
    pub fn status(&self) -> CashierStatus {
        self.status
    }

    /// Move to `next`, rejecting edges outside the cashier table.
    pub fn set_status(&mut self, next: CashierStatus) -> FloorResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(FloorError::IllegalTransition {
                entity: self.id.to_string(),
                from:   self.status.as_str(),
                to:     next.as_str(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// `true` if a customer may choose or jockey into this lane right now.
    ///
    /// A lane that is still `Activating` has committed to open but does not
    /// take customers until it is `Available`.
    #[inline]
    pub fn accepts_customers(&self) -> bool {
        self.open_for_entry
            && matches!(self.status, CashierStatus::Available | CashierStatus::Busy)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Inactive → Activating.  The lane is committed to open for entry.
    pub fn activate(&mut self, tick: Tick) -> FloorResult<()> {
        self.set_status(CashierStatus::Activating)?;
        self.open_for_entry = true;
        self.activated_at = tick;
        Ok(())
    }

    /// Activating → Available.  Starts the open-time stint.
    pub fn open(&mut self, now: f64) -> FloorResult<()> {
        self.set_status(CashierStatus::Available)?;
        self.opened_at = Some(now);
        Ok(())
    }

    /// Available → Inactive.  Only legal once the lane has drained.
    pub fn retire(&mut self, now: f64) -> FloorResult<()> {
        debug_assert!(self.queue.is_empty(), "retiring {} with a queue", self.id);
        self.set_status(CashierStatus::Inactive)?;
        self.open_for_entry = false;
        if let Some(start) = self.opened_at.take() {
            self.closed_open_secs += (now - start).max(0.0);
        }
        Ok(())
    }

    /// Total time this lane has been open, including the current stint.
    pub fn open_secs(&self, now: f64) -> f64 {
        self.closed_open_secs + self.opened_at.map_or(0.0, |start| (now - start).max(0.0))
    }

    // ── Queue ─────────────────────────────────────────────────────────────

    /// Waiting customers, in service order.
    #[inline]
    pub fn queue(&self) -> &[CustomerId] {
        &self.queue
    }

    #[inline]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn current_customer(&self) -> Option<CustomerId> {
        self.current_customer
    }

    /// Append `customer` to the tail of the line.
    pub fn enqueue(&mut self, customer: CustomerId) -> FloorResult<()> {
        if !self.open_for_entry {
            return Err(FloorError::LaneClosed(self.id));
        }
        if self.queue.contains(&customer) || self.current_customer == Some(customer) {
            return Err(FloorError::AlreadyQueued { customer, cashier: self.id });
        }
        self.queue.push(customer);
        Ok(())
    }

    /// Remove `customer` from the line, wherever it stands.
    pub fn dequeue(&mut self, customer: CustomerId) -> FloorResult<()> {
        match self.queue.iter().position(|&c| c == customer) {
            Some(i) => {
                self.queue.remove(i);
                Ok(())
            }
            None => Err(FloorError::NotQueued { customer, cashier: self.id }),
        }
    }

    /// `true` if `customer` is the last of a line of more than one.
    pub fn is_last_behind_others(&self, customer: CustomerId) -> bool {
        self.queue.len() > 1 && self.queue.last() == Some(&customer)
    }

    // ── Service ───────────────────────────────────────────────────────────

    /// Available → Busy: take `customer` out of the line and serve it until
    /// `now + duration`.
    pub fn begin_service(&mut self, customer: CustomerId, now: f64, duration: f64) -> FloorResult<()> {
        if !self.queue.contains(&customer) {
            return Err(FloorError::NotQueued { customer, cashier: self.id });
        }
        self.set_status(CashierStatus::Busy)?;
        self.dequeue(customer)?;
        self.current_customer = Some(customer);
        self.service_start = now;
        self.completion_time = now + duration.max(0.0);
        Ok(())
    }

    /// Busy → Available: hand back the served customer.
    pub fn finish_service(&mut self) -> FloorResult<CustomerId> {
        let customer = self.current_customer.ok_or(FloorError::NotServing(self.id))?;
        self.set_status(CashierStatus::Available)?;
        self.current_customer = None;
        self.customers_served += 1;
        self.busy_secs += self.completion_time - self.service_start;
        Ok(customer)
    }
}
