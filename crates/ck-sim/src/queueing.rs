//! Queue choice and jockeying.
//!
//! Both decisions read the floor through a [`QueueContext`], a borrowed view
//! built by the tick loop right before a decision and dropped before any
//! entity is mutated.
//!
//! # Metrics
//!
//! | Kind       | Load of a lane                          |
//! |------------|-----------------------------------------|
//! | `Regular`  | number of customers in its queue        |
//! | `Observer` | sum of cart sizes of its queued customers |
//!
//! Ties keep the first lane in active-pool order for a new arrival, and keep
//! the current lane for a jockeying customer.

use std::collections::BTreeMap;

use ck_core::{CashierId, CustomerId, CustomerKind};
use ck_floor::{Cashier, Customer};

/// Read-only view of the lanes and customers for one decision.
pub struct QueueContext<'a> {
    /// Arena of every lane built, indexed by `CashierId::index()`.
    pub cashiers: &'a [Cashier],

    /// Lanes in the active pool, in activation order.
    pub active: &'a [CashierId],

    pub customers: &'a BTreeMap<CustomerId, Customer>,
}

impl<'a> QueueContext<'a> {
    #[inline]
    pub fn new(
        cashiers:  &'a [Cashier],
        active:    &'a [CashierId],
        customers: &'a BTreeMap<CustomerId, Customer>,
    ) -> Self {
        Self { cashiers, active, customers }
    }

    #[inline]
    fn cashier(&self, id: CashierId) -> Option<&'a Cashier> {
        self.cashiers.get(id.index())
    }

    /// Load of `lane` as judged by a customer of `kind`, leaving `exclude`
    /// out of the count.
    pub fn lane_load(&self, kind: CustomerKind, lane: &Cashier, exclude: Option<CustomerId>) -> u64 {
        let members = lane.queue().iter().filter(|&&c| Some(c) != exclude);
        match kind {
            CustomerKind::Regular => members.count() as u64,
            CustomerKind::Observer => members
                .filter_map(|c| self.customers.get(c))
                .map(|c| c.cart_size as u64)
                .sum(),
        }
    }

    /// Lanes that accept new customers, in active-pool order.
    fn open_lanes(&self) -> impl Iterator<Item = &'a Cashier> + '_ {
        self.active
            .iter()
            .filter_map(move |&id| self.cashier(id))
            .filter(|c| c.accepts_customers())
    }

    /// Lane a new customer of `kind` should join.
    ///
    /// `None` if no lane accepts customers.
    pub fn choose_queue(&self, kind: CustomerKind) -> Option<CashierId> {
        let mut best: Option<(CashierId, u64)> = None;
        for lane in self.open_lanes() {
            let load = self.lane_load(kind, lane, None);
            if best.is_none_or(|(_, b)| load < b) {
                best = Some((lane.id, load));
            }
        }
        best.map(|(id, _)| id)
    }

    /// The nearest open lane strictly to the left and strictly to the right
    /// of `current`, by floor column.
    pub fn adjacent_open(&self, current: CashierId) -> (Option<CashierId>, Option<CashierId>) {
        let Some(here) = self.cashier(current) else {
            return (None, None);
        };
        let mut left: Option<&Cashier> = None;
        let mut right: Option<&Cashier> = None;
        for lane in self.open_lanes().filter(|c| c.id != current) {
            if lane.column < here.column {
                if left.is_none_or(|l| lane.column > l.column) {
                    left = Some(lane);
                }
            } else if lane.column > here.column
                && right.is_none_or(|r| lane.column < r.column)
            {
                right = Some(lane);
            }
        }
        (left.map(|c| c.id), right.map(|c| c.id))
    }

    /// Lane `customer` should switch to, if a neighbour is strictly better.
    ///
    /// Only the two adjacent open lanes are considered, left first; the
    /// right one replaces it only if strictly better still.  The customer is
    /// left out of its own lane's load.
    pub fn search_different_queue(
        &self,
        customer: CustomerId,
        kind:     CustomerKind,
        current:  CashierId,
    ) -> Option<CashierId> {
        let here = self.cashier(current)?;
        let mut best_load = self.lane_load(kind, here, Some(customer));
        let mut best = None;

        let (left, right) = self.adjacent_open(current);
        for lane in [left, right].into_iter().flatten().filter_map(|id| self.cashier(id)) {
            let load = self.lane_load(kind, lane, Some(customer));
            if load < best_load {
                best_load = load;
                best = Some(lane.id);
            }
        }
        best
    }
}
