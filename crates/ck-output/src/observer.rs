//! `SimOutputObserver<W>` - bridges `SimObserver` to an `OutputWriter`.

use ck_core::Tick;
use ck_sim::{CustomerRecord, FloorSnapshot, SimObserver, SimSummary, TickSummary};

use crate::row::{CustomerRow, SnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes finished customers, tick counters and floor
/// snapshots to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::new(tick.0, summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, snapshot: &FloorSnapshot) {
        let now = snapshot.now_secs;
        let rows: Vec<SnapshotRow> = snapshot
            .cashiers
            .iter()
            .map(|c| SnapshotRow::cashier(tick.0, now, c))
            .chain(snapshot.customers.iter().map(|c| SnapshotRow::customer(tick.0, now, c)))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshot(&rows);
            self.store_err(result);
        }
    }

    fn on_customer_finished(&mut self, record: &CustomerRecord) {
        let result = self.writer.write_customer(&CustomerRow::from(record));
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _summary: &SimSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
