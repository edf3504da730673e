//! `ArrivalSchedule` - how often customers walk in.

use crate::{ScheduleError, ScheduleResult, TimeTable};

/// Mean seconds between arrivals, either for the whole run or per bucket.
///
/// A bucket whose mean is exactly `0.0` marks closing time: once arrivals
/// reach it, the simulation stops generating customers for good, even if a
/// later bucket is non-zero.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", content = "value", rename_all = "snake_case"))]
pub enum ArrivalSchedule {
    Fixed(f64),
    TimeVarying(TimeTable<f64>),
}

impl ArrivalSchedule {
    /// Build a time-varying schedule from `(start_secs, mean_secs)` rows.
    pub fn time_varying(rows: Vec<(u64, f64)>) -> ScheduleResult<Self> {
        let table = TimeTable::new(rows)?;
        let schedule = ArrivalSchedule::TimeVarying(table);
        schedule.validate()?;
        Ok(schedule)
    }

    /// Means must be finite and non-negative.
    pub fn validate(&self) -> ScheduleResult<()> {
        let check = |index: usize, mean: f64| {
            if mean.is_finite() && mean >= 0.0 {
                Ok(())
            } else {
                Err(ScheduleError::InvalidValue {
                    index,
                    reason: format!("mean inter-arrival time must be finite and >= 0, got {mean}"),
                })
            }
        };
        match self {
            ArrivalSchedule::Fixed(mean) => check(0, *mean),
            ArrivalSchedule::TimeVarying(table) => table
                .rows()
                .iter()
                .enumerate()
                .try_for_each(|(i, (_, mean))| check(i, *mean)),
        }
    }

    /// Store time at which the day starts: the first bucket for a
    /// time-varying schedule, `0` otherwise.
    pub fn start_secs(&self) -> u64 {
        match self {
            ArrivalSchedule::Fixed(_)           => 0,
            ArrivalSchedule::TimeVarying(table) => table.start_secs(),
        }
    }

    /// Mean inter-arrival time at store time `t`.
    ///
    /// `None` before the first bucket of a time-varying schedule.
    pub fn mean_at(&self, t: f64) -> Option<f64> {
        match self {
            ArrivalSchedule::Fixed(mean)        => Some(*mean),
            ArrivalSchedule::TimeVarying(table) => table.value_at(t).copied(),
        }
    }
}
