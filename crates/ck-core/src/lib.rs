//! `ck-core` - foundational types for the `rust_checkout` queueing simulator.
//!
//! This crate is a dependency of every other `ck-*` crate.  It has no `ck-*`
//! dependencies and minimal external ones (`rand`, `rand_distr` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module           | Contents                                              |
//! |------------------|-------------------------------------------------------|
//! | [`ids`]          | `CashierId`, `CustomerId`                             |
//! | [`time`]         | `Tick`, `SimClock`, `format_hms`                      |
//! | [`rng`]          | `RandomProcess` (the run's single seeded stream)      |
//! | [`distribution`] | `CartSizeDistribution`, `ScanTime`, `CustomerKind`    |
//! | [`error`]        | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod distribution;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use distribution::{CartSizeDistribution, CustomerKind, ScanTime};
pub use error::{CoreError, CoreResult};
pub use ids::{CashierId, CustomerId};
pub use rng::RandomProcess;
pub use time::{SimClock, Tick, format_hms};
