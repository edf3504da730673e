//! Plain data row types written by output backends.

use ck_sim::{CashierView, CustomerRecord, CustomerView, TickSummary};

/// One finished visit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomerRow {
    pub customer_id:         u64,
    pub kind:                &'static str,
    pub cart_size:           u32,
    /// Lane the customer paid at.
    pub cashier_id:          u32,
    pub arrival_time:        f64,
    pub queue_arrival_time:  f64,
    pub paying_arrival_time: f64,
    pub attention_time_span: f64,
    pub exit_time:           f64,
    pub waiting_secs:        f64,
    pub queue_changes:       u32,
}

impl From<&CustomerRecord> for CustomerRow {
    fn from(r: &CustomerRecord) -> Self {
        Self {
            customer_id:         r.id.0,
            kind:                r.kind.as_str(),
            cart_size:           r.cart_size,
            cashier_id:          r.cashier.0,
            arrival_time:        r.arrival_time,
            queue_arrival_time:  r.queue_arrival_time,
            paying_arrival_time: r.paying_arrival_time,
            attention_time_span: r.attention_time_span,
            exit_time:           r.exit_time,
            waiting_secs:        r.waiting_secs,
            queue_changes:       r.queue_changes,
        }
    }
}

/// Counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:             u64,
    pub now_secs:         f64,
    pub open_cashiers:    u32,
    pub active_cashiers:  u32,
    pub active_customers: u32,
    pub arrivals:         u32,
    pub services_started: u32,
    pub departures:       u32,
    pub queue_changes:    u32,
}

impl TickSummaryRow {
    pub fn new(tick: u64, s: &TickSummary) -> Self {
        Self {
            tick,
            now_secs:         s.now_secs,
            open_cashiers:    s.open_cashiers as u32,
            active_cashiers:  s.active_cashiers as u32,
            active_customers: s.active_customers as u32,
            arrivals:         s.arrivals as u32,
            services_started: s.services_started as u32,
            departures:       s.departures as u32,
            queue_changes:    s.queue_changes as u32,
        }
    }
}

/// One entity's position and status at a snapshot tick.
///
/// Cashiers and customers share the file; `entity` tells them apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotRow {
    pub tick:      u64,
    pub now_secs:  f64,
    /// `"cashier"` or `"customer"`.
    pub entity:    &'static str,
    pub id:        u64,
    pub status:    &'static str,
    pub column:    i32,
    /// Steps from the head of the lane; `0` for cashiers.
    pub depth:     u32,
    /// Lane the entity belongs to; `u32::MAX` for a customer not yet assigned.
    pub lane:      u32,
    /// Customers waiting (cashier rows) or steps left to the exit (customer rows).
    pub count:     u32,
}

impl SnapshotRow {
    pub fn cashier(tick: u64, now_secs: f64, c: &CashierView) -> Self {
        Self {
            tick,
            now_secs,
            entity: "cashier",
            id:     c.id.0 as u64,
            status: c.status.as_str(),
            column: c.column,
            depth:  0,
            lane:   c.id.0,
            count:  c.queue_len as u32,
        }
    }

    pub fn customer(tick: u64, now_secs: f64, c: &CustomerView) -> Self {
        Self {
            tick,
            now_secs,
            entity: "customer",
            id:     c.id.0,
            status: c.status.as_str(),
            column: c.column,
            depth:  c.depth,
            lane:   c.cashier.map_or(u32::MAX, |id| id.0),
            count:  c.exit_remaining,
        }
    }
}
