//! `ck-sim` - tick loop orchestrator for the rust_checkout simulator.
//!
//! # Four-phase tick loop
//!
//! ```text
//! loop:
//!   ① Provisioning - on a new staffing bucket, close lanes from the tail of
//!                    the active pool or open lanes from the inactive pool.
//!   ② Cashiers     - Activating → Available after one tick;
//!                    Busy → release once now > completion;
//!                    Available → call the first Ready customer, or retire
//!                    if closed and drained.
//!   ③ Arrivals     - if now > next_arrival, spawn one customer, choose its
//!                    lane, next_arrival += Exp(mean of the current bucket).
//!   ④ Customers    - one step each: walk to lane, advance in lane (maybe
//!                    jockey), change lane, walk out; finished ones leave.
//!   stop when arrivals are cut off and the floor is empty; else advance.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`config`]   | `SimConfig`                                            |
//! | [`builder`]  | `SimBuilder` - validation and lane pool construction   |
//! | [`sim`]      | `Sim` - the clock, arenas and tick phases ②–④          |
//! | `staffing`   | phase ①, provisioning reconciliation                   |
//! | [`queueing`] | `QueueContext` - queue choice and jockeying            |
//! | [`stats`]    | `RunStats`, `SimSummary`, `CustomerRecord`, `TickSummary` |
//! | [`view`]     | `FloorSnapshot` and per-entity views for renderers     |
//! | [`observer`] | `SimObserver`, `NoopObserver`                          |
//! | [`error`]    | `SimError`, `SimResult<T>`                             |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ck_sim::{NoopObserver, SimBuilder, SimConfig};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! println!("{} customers, mean wait {:.0}s", summary.customer_count, summary.mean_waiting_secs);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod queueing;
pub mod sim;
pub mod stats;
pub mod view;

mod staffing;


pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use queueing::QueueContext;
pub use sim::Sim;
pub use stats::{CashierSummary, CustomerRecord, HourStats, RunStats, SimSummary, TickSummary};
pub use view::{CashierView, CustomerView, FloorSnapshot};
