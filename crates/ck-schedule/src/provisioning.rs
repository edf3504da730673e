//! `ProvisioningSchedule` - how many lanes should be open.

use crate::{ScheduleResult, TimeTable};

/// Target number of open cashiers, either for the whole run or per bucket.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", content = "value", rename_all = "snake_case"))]
pub enum ProvisioningSchedule {
    Fixed(usize),
    TimeVarying(TimeTable<usize>),
}

impl ProvisioningSchedule {
    /// Build a time-varying schedule from `(start_secs, cashiers)` rows.
    pub fn time_varying(rows: Vec<(u64, usize)>) -> ScheduleResult<Self> {
        Ok(ProvisioningSchedule::TimeVarying(TimeTable::new(rows)?))
    }

    /// `(bucket, target)` covering store time `t`.
    ///
    /// A fixed schedule is a single bucket `0`.  `None` before the first
    /// bucket of a time-varying schedule.
    pub fn target_at(&self, t: f64) -> Option<(usize, usize)> {
        match self {
            ProvisioningSchedule::Fixed(n)          => Some((0, *n)),
            ProvisioningSchedule::TimeVarying(table) => table.lookup(t).map(|(i, n)| (i, *n)),
        }
    }

    /// `true` if no lane is wanted at `t` or at any later time.
    ///
    /// Before the first bucket of a time-varying schedule the target counts
    /// as zero.
    pub fn is_closed_from(&self, t: f64) -> bool {
        match self {
            ProvisioningSchedule::Fixed(n) => *n == 0,
            ProvisioningSchedule::TimeVarying(table) => {
                let now_closed = table.value_at(t).is_none_or(|n| *n == 0);
                now_closed
                    && table
                        .rows()
                        .iter()
                        .filter(|(start, _)| *start as f64 > t)
                        .all(|(_, n)| *n == 0)
            }
        }
    }

    /// The largest target anywhere in the schedule.
    pub fn max_target(&self) -> usize {
        match self {
            ProvisioningSchedule::Fixed(n) => *n,
            ProvisioningSchedule::TimeVarying(table) => {
                table.rows().iter().map(|(_, n)| *n).max().unwrap_or(0)
            }
        }
    }
}
