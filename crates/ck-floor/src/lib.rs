//! `ck-floor` - the entities on the checkout floor.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`status`]   | `CashierStatus`, `CustomerStatus` and their transition tables |
//! | [`cashier`]  | `Cashier` - lane queue, service bookkeeping, statistics    |
//! | [`customer`] | `Customer` - kind, cart, phase counters, timestamps        |
//! | [`layout`]   | `FloorLayout` - lane columns and phase lengths             |
//! | [`error`]    | `FloorError`, `FloorResult<T>`                             |
//!
//! # Ownership model
//!
//! Entities never point at each other.  A customer names its lane by
//! `CashierId`; a lane holds `CustomerId`s.  The simulation owns both arenas
//! and resolves ids, so there are no reference cycles and every mutation
//! happens through the owner.
//!
//! # Logical positions
//!
//! A customer's position is `(column, depth)`.  `column` is the floor column
//! they stand in; `depth` counts steps from the head of a lane (`0`) back to
//! the main aisle (`lane_length`).  A renderer maps these to cells.

pub mod cashier;
pub mod customer;
pub mod error;
pub mod layout;
pub mod status;

#[cfg(test)]
mod tests;

pub use cashier::Cashier;
pub use customer::Customer;
pub use error::{FloorError, FloorResult};
pub use layout::FloorLayout;
pub use status::{CashierStatus, CustomerStatus};
