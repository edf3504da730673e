//! `TimeTable<T>` - a step function of store time.

use crate::{ScheduleError, ScheduleResult};

/// Rows of `(start_secs, value)`, sorted strictly ascending by start.
///
/// Construction validates the ordering, so lookups are a single
/// `partition_point` binary search.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<(u64, T)>", into = "Vec<(u64, T)>"))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize   = "T: Clone + serde::Serialize",
    deserialize = "T: serde::Deserialize<'de>"
)))]
pub struct TimeTable<T> {
    rows: Vec<(u64, T)>,
}

impl<T> TimeTable<T> {
    /// Build a table, rejecting empty input and non-increasing starts.
    ///
    /// Rows are *not* sorted for the caller: an out-of-order table is almost
    /// always a typo in a staffing sheet and is reported as such.
    pub fn new(rows: Vec<(u64, T)>) -> ScheduleResult<Self> {
        if rows.is_empty() {
            return Err(ScheduleError::Empty);
        }
        for (index, pair) in rows.windows(2).enumerate() {
            if pair[1].0 <= pair[0].0 {
                return Err(ScheduleError::NonMonotonic {
                    index:    index + 1,
                    start:    pair[1].0,
                    previous: pair[0].0,
                });
            }
        }
        Ok(Self { rows })
    }

    /// A table with one row covering all time from `0`.
    pub fn constant(value: T) -> Self {
        Self { rows: vec![(0, value)] }
    }

    pub fn rows(&self) -> &[(u64, T)] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Start time of the first row.
    pub fn start_secs(&self) -> u64 {
        self.rows[0].0
    }

    /// Index of the bucket covering store time `t`, or `None` before the
    /// first row.
    pub fn bucket_at(&self, t: f64) -> Option<usize> {
        let idx = self.rows.partition_point(|(start, _)| (*start as f64) <= t);
        idx.checked_sub(1)
    }

    /// `(bucket, value)` covering store time `t`.
    pub fn lookup(&self, t: f64) -> Option<(usize, &T)> {
        self.bucket_at(t).map(|i| (i, &self.rows[i].1))
    }

    /// Value covering store time `t`.
    pub fn value_at(&self, t: f64) -> Option<&T> {
        self.lookup(t).map(|(_, v)| v)
    }
}

impl<T> TryFrom<Vec<(u64, T)>> for TimeTable<T> {
    type Error = ScheduleError;

    fn try_from(rows: Vec<(u64, T)>) -> ScheduleResult<Self> {
        TimeTable::new(rows)
    }
}

impl<T: Clone> From<TimeTable<T>> for Vec<(u64, T)> {
    fn from(table: TimeTable<T>) -> Self {
        table.rows
    }
}
