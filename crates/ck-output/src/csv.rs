//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `customers.csv`
//! - `tick_summaries.csv`
//! - `floor_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CustomerRow, OutputResult, SnapshotRow, TickSummaryRow};

pub const CUSTOMER_HEADER: [&str; 11] = [
    "customer_id", "kind", "cart_size", "cashier_id", "arrival_time", "queue_arrival_time",
    "paying_arrival_time", "attention_time_span", "exit_time", "waiting_secs", "queue_changes",
];

pub const TICK_SUMMARY_HEADER: [&str; 9] = [
    "tick", "now_secs", "open_cashiers", "active_cashiers", "active_customers",
    "arrivals", "services_started", "departures", "queue_changes",
];

pub const SNAPSHOT_HEADER: [&str; 9] = [
    "tick", "now_secs", "entity", "id", "status", "column", "depth", "lane", "count",
];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    customers: Writer<File>,
    summaries: Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut customers = Writer::from_path(dir.join("customers.csv"))?;
        customers.write_record(CUSTOMER_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(TICK_SUMMARY_HEADER)?;

        let mut snapshots = Writer::from_path(dir.join("floor_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        Ok(Self {
            customers,
            summaries,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_customer(&mut self, row: &CustomerRow) -> OutputResult<()> {
        self.customers.write_record(&[
            row.customer_id.to_string(),
            row.kind.to_owned(),
            row.cart_size.to_string(),
            row.cashier_id.to_string(),
            row.arrival_time.to_string(),
            row.queue_arrival_time.to_string(),
            row.paying_arrival_time.to_string(),
            row.attention_time_span.to_string(),
            row.exit_time.to_string(),
            row.waiting_secs.to_string(),
            row.queue_changes.to_string(),
        ])?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.now_secs.to_string(),
            row.open_cashiers.to_string(),
            row.active_cashiers.to_string(),
            row.active_customers.to_string(),
            row.arrivals.to_string(),
            row.services_started.to_string(),
            row.departures.to_string(),
            row.queue_changes.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshot(&mut self, rows: &[SnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.now_secs.to_string(),
                row.entity.to_owned(),
                row.id.to_string(),
                row.status.to_owned(),
                row.column.to_string(),
                row.depth.to_string(),
                row.lane.to_string(),
                row.count.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.customers.flush()?;
        self.summaries.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
