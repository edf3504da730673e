//! `ck-schedule` - time-indexed tables that drive a simulated day.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`table`]        | `TimeTable<T>` - a validated step function of store time |
//! | [`arrival`]      | `ArrivalSchedule` - mean inter-arrival time per bucket |
//! | [`provisioning`] | `ProvisioningSchedule` - target open cashiers per bucket |
//! | [`loader`]       | `load_arrivals_reader`, `load_provisioning_reader`, …  |
//! | [`error`]        | `ScheduleError`, `ScheduleResult<T>`                   |
//!
//! # Bucket model (summary)
//!
//! A table is a list of `(start_secs, value)` rows with strictly increasing
//! starts.  At store time `t`:
//!
//! ```text
//! bucket  = last row whose start_secs ≤ t     (None before the first row)
//! value   = rows[bucket].value                (the last row is open-ended)
//! ```

pub mod arrival;
pub mod error;
pub mod loader;
pub mod provisioning;
pub mod table;

#[cfg(test)]
mod tests;

pub use arrival::ArrivalSchedule;
pub use error::{ScheduleError, ScheduleResult};
pub use loader::{
    load_arrivals_csv, load_arrivals_reader, load_provisioning_csv, load_provisioning_reader,
};
pub use provisioning::ProvisioningSchedule;
pub use table::TimeTable;
