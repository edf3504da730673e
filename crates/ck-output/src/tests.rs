//! Integration tests for ck-output.

use tempfile::TempDir;

use crate::csv::CsvWriter;
use crate::row::{CustomerRow, SnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn customer_row(id: u64) -> CustomerRow {
    CustomerRow {
        customer_id:         id,
        kind:                "regular",
        cart_size:           12,
        cashier_id:          2,
        arrival_time:        25_200.0,
        queue_arrival_time:  25_214.0,
        paying_arrival_time: 25_260.0,
        attention_time_span: 36.0,
        exit_time:           25_311.0,
        waiting_secs:        46.0,
        queue_changes:       1,
    }
}

fn summary_row(tick: u64) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        now_secs:         25_200.0 + tick as f64,
        open_cashiers:    3,
        active_cashiers:  4,
        active_customers: 9,
        arrivals:         1,
        services_started: 0,
        departures:       2,
        queue_changes:    0,
    }
}

fn read_rows(dir: &TempDir, file: &str) -> Vec<csv::StringRecord> {
    let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
    rdr.records().map(|r| r.unwrap()).collect()
}

fn read_headers(dir: &TempDir, file: &str) -> Vec<String> {
    let mut rdr = csv::Reader::from_path(dir.path().join(file)).unwrap();
    rdr.headers().unwrap().iter().map(str::to_owned).collect()
}

// ── CSV backend ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::csv::{CUSTOMER_HEADER, SNAPSHOT_HEADER, TICK_SUMMARY_HEADER};

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("customers.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("floor_snapshots.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(read_headers(&dir, "customers.csv"), CUSTOMER_HEADER);
        assert_eq!(read_headers(&dir, "tick_summaries.csv"), TICK_SUMMARY_HEADER);
        assert_eq!(read_headers(&dir, "floor_snapshots.csv"), SNAPSHOT_HEADER);
    }

    #[test]
    fn csv_customer_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_customer(&customer_row(7)).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir, "customers.csv");
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "7");       // customer_id
        assert_eq!(&rows[0][1], "regular"); // kind
        assert_eq!(&rows[0][3], "2");       // cashier_id
        assert_eq!(&rows[0][9], "46");      // waiting_secs
    }

    #[test]
    fn csv_tick_summary_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.write_tick_summary(&summary_row(4)).unwrap();
        w.finish().unwrap();

        let rows = read_rows(&dir, "tick_summaries.csv");
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "25203");
        assert_eq!(&rows[1][7], "2"); // departures
    }

    #[test]
    fn csv_snapshot_rows_keep_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = [
            SnapshotRow { tick: 5, now_secs: 5.0, entity: "cashier", id: 1, status: "busy", column: 14, depth: 0, lane: 1, count: 2 },
            SnapshotRow { tick: 5, now_secs: 5.0, entity: "customer", id: 3, status: "in_queue", column: 14, depth: 1, lane: 1, count: 0 },
        ];
        w.write_snapshot(&rows).unwrap();
        w.finish().unwrap();

        let read = read_rows(&dir, "floor_snapshots.csv");
        assert_eq!(read.len(), 2);
        assert_eq!(&read[0][2], "cashier");
        assert_eq!(&read[1][2], "customer");
        assert_eq!(&read[1][6], "1"); // depth
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshot(&[]).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("no").join("such"));
        assert!(result.is_err());
    }
}

// ── Observer bridge ───────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{OutputError, OutputResult, SimOutputObserver};

    use ck_core::{CartSizeDistribution, Tick};
    use ck_schedule::{ArrivalSchedule, ProvisioningSchedule};
    use ck_sim::{SimBuilder, SimConfig, SimObserver, SimSummary};

    /// Fails every customer write; counts finish calls.
    #[derive(Default)]
    struct FailingWriter {
        customer_calls: usize,
        finished:       usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_customer(&mut self, _row: &CustomerRow) -> OutputResult<()> {
            self.customer_calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("write {}", self.customer_calls))))
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Ok(())
        }

        fn write_snapshot(&mut self, _rows: &[SnapshotRow]) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let config = SimConfig {
            arrivals:       ArrivalSchedule::Fixed(10.0),
            provisioning:   ProvisioningSchedule::Fixed(2),
            customer_limit: Some(3),
            ..SimConfig::default()
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let mut obs = SimOutputObserver::new(FailingWriter::default());
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("customer writes fail");
        assert_eq!(err.to_string(), "I/O error: write 1");
        assert!(obs.take_error().is_none(), "error is taken once");

        let writer = obs.into_writer();
        assert_eq!(writer.customer_calls, 3);
        assert_eq!(writer.finished, 1);
    }

    #[test]
    fn sim_end_flushes_writer() {
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        obs.on_tick_end(Tick(0), &Default::default());
        obs.on_sim_end(&SimSummary {
            customer_count:    0,
            customers_served:  0,
            mean_waiting_secs: 0.0,
            end_secs:          0.0,
            end_tick:          Tick(0),
            forced_releases:   0,
            cashiers:          Vec::new(),
        });
        assert!(obs.take_error().is_none());
        assert_eq!(read_rows(&dir, "tick_summaries.csv").len(), 1);
    }

    #[test]
    fn integration_csv() {
        let config = SimConfig {
            seed:                  7,
            arrivals:              ArrivalSchedule::Fixed(20.0),
            provisioning:          ProvisioningSchedule::Fixed(3),
            cart_size:             CartSizeDistribution::Uniform { min: 1, max: 20 },
            observer_probability:  0.3,
            customer_limit:        Some(40),
            output_interval_ticks: 60,
            ..SimConfig::default()
        };
        let mut sim = SimBuilder::new(config).build().unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        let summary = sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // One row per finished visit, every one paid at a real lane.
        let customers = read_rows(&dir, "customers.csv");
        assert_eq!(customers.len() as u64, summary.customers_served);
        assert_eq!(customers.len(), 40);
        for row in &customers {
            let lane: u32 = row[3].parse().unwrap();
            assert!((1..=3).contains(&lane), "paid at lane {lane}");
            let waited: f64 = row[9].parse().unwrap();
            assert!(waited >= 0.0);
        }

        // One summary row per processed tick, ticks starting at 0.
        let summaries = read_rows(&dir, "tick_summaries.csv");
        assert_eq!(summaries.len() as u64, summary.end_tick.0 + 1);
        let departures: u64 = summaries.iter().map(|r| r[7].parse::<u64>().unwrap()).sum();
        assert_eq!(departures, 40);

        // Snapshots every 60 ticks; the first shows the three lanes opening.
        let snapshots = read_rows(&dir, "floor_snapshots.csv");
        for row in &snapshots {
            let tick: u64 = row[0].parse().unwrap();
            assert_eq!(tick % 60, 0);
        }
        let first: Vec<_> = snapshots.iter().filter(|r| &r[0] == "0").collect();
        assert_eq!(first.len(), 3);
        assert!(first.iter().all(|r| &r[2] == "cashier" && &r[4] == "activating"));
    }
}
