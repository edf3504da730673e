//! Read-only views of the floor for renderers and output writers.
//!
//! A view carries identity, logical position and status only.  Mapping
//! `(column, depth)` to screen cells is the renderer's business.

use ck_core::{CashierId, CustomerId, CustomerKind};
use ck_floor::{Cashier, CashierStatus, Customer, CustomerStatus};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CashierView {
    pub id:               CashierId,
    pub column:           i32,
    pub status:           CashierStatus,
    pub open_for_entry:   bool,
    pub queue_len:        usize,
    pub current_customer: Option<CustomerId>,
}

impl From<&Cashier> for CashierView {
    fn from(c: &Cashier) -> Self {
        Self {
            id:               c.id,
            column:           c.column,
            status:           c.status(),
            open_for_entry:   c.open_for_entry,
            queue_len:        c.queue_len(),
            current_customer: c.current_customer(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomerView {
    pub id:      CustomerId,
    pub kind:    CustomerKind,
    pub status:  CustomerStatus,
    pub cashier: Option<CashierId>,
    pub column:  i32,
    pub depth:   u32,
    /// Steps left to the exit; `0` unless `Exiting`.
    pub exit_remaining: u32,
}

impl From<&Customer> for CustomerView {
    fn from(c: &Customer) -> Self {
        Self {
            id:             c.id,
            kind:           c.kind,
            status:         c.status(),
            cashier:        c.chosen_cashier,
            column:         c.column,
            depth:          c.depth,
            exit_remaining: c.exit_remaining,
        }
    }
}

/// Every active lane and every customer on the floor, in id order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloorSnapshot {
    pub now_secs:  f64,
    pub cashiers:  Vec<CashierView>,
    pub customers: Vec<CustomerView>,
}
