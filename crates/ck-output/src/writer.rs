//! The `OutputWriter` trait implemented by backend writers.

use crate::{CustomerRow, OutputResult, SnapshotRow, TickSummaryRow};

/// Trait implemented by output backends.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// when the writer is driven by the observer.
pub trait OutputWriter {
    /// Write one finished customer.
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of snapshot rows.
    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
