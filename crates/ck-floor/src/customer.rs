//! `Customer` - one shopper's visit, from the door to the exit.
//!
//! Movement is a set of phase counters, one step per tick:
//!
//! | Status          | Counter         | Done when                               |
//! |-----------------|-----------------|-----------------------------------------|
//! | `MovingToQueue` | `column`        | `column` equals the lane's column       |
//! | `InQueue`       | `depth`         | `depth == 0` (head of the lane)         |
//! | `ChangingQueue` | `depth`, `column` | back on the aisle and aligned        |
//! | `Exiting`       | `exit_remaining`| counter reaches 0                       |
//!
//! Each mover checks its goal *before* stepping, so a customer reaches the
//! next status on the tick after its last step.

use ck_core::{CashierId, CustomerId, CustomerKind};

use crate::{CustomerStatus, FloorError, FloorResult};

#[derive(Clone, Debug)]
pub struct Customer {
    pub id:        CustomerId,
    pub kind:      CustomerKind,
    /// Items in the cart.  Fixed at arrival.
    pub cart_size: u32,

    status: CustomerStatus,

    /// Lane the customer is walking to, waiting in, or paying at.
    /// `None` only while `Spawned`.
    pub chosen_cashier: Option<CashierId>,

    // ── Phase counters ────────────────────────────────────────────────────
    pub column:         i32,
    pub depth:          u32,
    pub exit_remaining: u32,

    // ── Timestamps (store seconds) ────────────────────────────────────────
    pub arrival_time:        f64,
    pub queue_arrival_time:  f64,
    pub paying_arrival_time: f64,
    pub attention_time_span: f64,
    pub exit_time:           f64,

    /// How many times this customer switched lanes.
    pub queue_changes: u32,
}

impl Customer {
    /// A freshly arrived customer standing on the aisle at `column`.
    pub fn new(
        id:           CustomerId,
        kind:         CustomerKind,
        cart_size:    u32,
        arrival_time: f64,
        column:       i32,
        aisle_depth:  u32,
    ) -> Self {
        Self {
            id,
            kind,
            cart_size,
            status: CustomerStatus::Spawned,
            chosen_cashier: None,
            column,
            depth: aisle_depth,
            exit_remaining: 0,
            arrival_time,
            queue_arrival_time: arrival_time,
            paying_arrival_time: 0.0,
            attention_time_span: 0.0,
            exit_time: 0.0,
            queue_changes: 0,
        }
    }

    #[inline]
    pub fn status(&self) -> CustomerStatus {
        self.status
    }

    /// Move to `next`, rejecting edges outside the customer table.
    pub fn set_status(&mut self, next: CustomerStatus) -> FloorResult<()> {
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

    /// Seconds between joining the line and being called to pay.
    pub fn waiting_secs(&self) -> f64 {
        self.paying_arrival_time - self.queue_arrival_time
    }

    // ── Phase steppers ────────────────────────────────────────────────────

    /// One step along the aisle toward `lane_column`.
    ///
    /// Returns `true` if already aligned (no step taken).
    pub fn walk_to_lane(&mut self, lane_column: i32) -> bool {
        if self.column == lane_column {
            return true;
        }
        self.column += (lane_column - self.column).signum();
        false
    }

    /// One step up the lane unless `blocked` by the customer ahead.
    ///
    /// Returns `true` if already at the head (no step taken).
    pub fn advance_in_lane(&mut self, blocked: bool) -> bool {
        if self.depth == 0 {
            return true;
        }
        if !blocked {
            self.depth -= 1;
        }
        false
    }

    /// One step of a lane change: back out to the aisle, then sideways.
    ///
    /// Returns `true` once on the aisle and aligned with `lane_column`.
    pub fn change_lane_step(&mut self, lane_column: i32, aisle_depth: u32) -> bool {
        if self.depth < aisle_depth {
            self.depth += 1;
            return false;
        }
        self.walk_to_lane(lane_column)
    }

    /// One step toward the exit.
    ///
    /// Returns `true` once the exit has been reached (no step taken).
    pub fn walk_out(&mut self) -> bool {
        if self.exit_remaining == 0 {
            return true;
        }
        self.exit_remaining -= 1;
        false
    }
}
