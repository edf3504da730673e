//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per bucket, in ascending time order.  `start_secs` is store time
//! in seconds since midnight; `value` is the mean inter-arrival time (arrival
//! tables) or the number of open cashiers (provisioning tables).
//!
//! ```csv
//! start_secs,value
//! 25200,60
//! 36000,25
//! 75600,0
//! ```
//!
//! Rows are validated exactly as [`TimeTable::new`] validates them; an
//! out-of-order file is an error rather than being silently sorted.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{ArrivalSchedule, ProvisioningSchedule, ScheduleError, TimeTable};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TableRecord<T> {
    start_secs: u64,
    value:      T,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a time-varying arrival schedule from a CSV file.
pub fn load_arrivals_csv(path: &Path) -> Result<ArrivalSchedule, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
pub fn load_arrivals_reader<R: Read>(reader: R) -> Result<ArrivalSchedule, ScheduleError> {
    ArrivalSchedule::time_varying(read_rows::<R, f64>(reader)?)
}

/// Load a time-varying provisioning schedule from a CSV file.
pub fn load_provisioning_csv(path: &Path) -> Result<ProvisioningSchedule, ScheduleError> {
    let file = std::fs::File::open(path)
        .map_err(ScheduleError::Io)?;
    load_provisioning_reader(file)
}

/// Like [`load_provisioning_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a table in a
/// binary.
pub fn load_provisioning_reader<R: Read>(reader: R) -> Result<ProvisioningSchedule, ScheduleError> {
    Ok(ProvisioningSchedule::TimeVarying(TimeTable::new(read_rows::<R, usize>(reader)?)?))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn read_rows<R: Read, T>(reader: R) -> Result<Vec<(u64, T)>, ScheduleError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<TableRecord<T>>()
        .map(|result| {
            result
                .map(|row| (row.start_secs, row.value))
                .map_err(|e| ScheduleError::Parse(e.to_string()))
        })
        .collect()
}
