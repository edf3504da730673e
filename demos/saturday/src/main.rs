//! saturday - one simulated Saturday at a nine-lane supermarket.
//!
//! Arrivals and staffing follow hourly tables from opening at 07:00 to the
//! last customer in at 22:00; the run ends when the floor is empty.  Either
//! table can be replaced with a CSV file (`start_secs,value`).

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ck_core::{CartSizeDistribution, ScanTime, format_hms};
use ck_output::{CsvWriter, SimOutputObserver};
use ck_schedule::{
    ArrivalSchedule, ProvisioningSchedule, load_arrivals_csv, load_arrivals_reader,
    load_provisioning_csv, load_provisioning_reader,
};
use ck_sim::{NoopObserver, Sim, SimBuilder, SimConfig, SimSummary};

// ── Constants ─────────────────────────────────────────────────────────────────

const OBSERVER_PROBABILITY:  f64 = 0.1;
const SECS_PER_ITEM:         f64 = 3.0;
const OUTPUT_INTERVAL_TICKS: u64 = 60; // one floor snapshot per simulated minute

// ── Schedule CSVs ─────────────────────────────────────────────────────────────

// Mean seconds between arrivals.  The 0 row closes the doors at 22:00.
const ARRIVALS_CSV: &str = "\
start_secs,value\n\
25200,90\n\
28800,60\n\
32400,40\n\
36000,25\n\
43200,20\n\
50400,30\n\
57600,22\n\
64800,18\n\
72000,35\n\
75600,60\n\
79200,0\n\
";

// Lanes open per bucket.  Lanes still busy at a drop keep serving their line.
const STAFFING_CSV: &str = "\
start_secs,value\n\
25200,2\n\
32400,4\n\
36000,6\n\
43200,7\n\
50400,5\n\
57600,7\n\
64800,9\n\
72000,5\n\
75600,3\n\
79200,2\n\
";

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "saturday", about = "Simulate a Saturday on the checkout floor")]
struct Opt {
    /// Verbosity: -v info, -vv debug, -vvv trace.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop generating customers after this many.
    #[arg(long)]
    customers: Option<u64>,

    /// Arrival table to use instead of the built-in one.
    #[arg(long)]
    arrivals: Option<PathBuf>,

    /// Staffing table to use instead of the built-in one.
    #[arg(long)]
    staffing: Option<PathBuf>,

    /// Directory for `customers.csv`, `tick_summaries.csv` and
    /// `floor_snapshots.csv`.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the end-of-run summary as JSON to this file.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn set_up_logger(verbose: u8) -> Result<(), fern::InitError> {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn arrival_schedule(path: Option<&Path>) -> Result<ArrivalSchedule> {
    match path {
        Some(p) => load_arrivals_csv(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(load_arrivals_reader(Cursor::new(ARRIVALS_CSV))?),
    }
}

fn staffing_schedule(path: Option<&Path>) -> Result<ProvisioningSchedule> {
    match path {
        Some(p) => load_provisioning_csv(p).with_context(|| format!("loading {}", p.display())),
        None => Ok(load_provisioning_reader(Cursor::new(STAFFING_CSV))?),
    }
}

fn run(sim: &mut Sim, output: Option<&Path>) -> Result<SimSummary> {
    let Some(dir) = output else {
        return Ok(sim.run(&mut NoopObserver)?);
    };
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer = CsvWriter::new(dir)?;
    let mut obs = SimOutputObserver::new(writer);
    let summary = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }
    Ok(summary)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let opt = Opt::parse();
    set_up_logger(opt.verbose)?;

    let config = SimConfig {
        seed:                  opt.seed,
        arrivals:              arrival_schedule(opt.arrivals.as_deref())?,
        provisioning:          staffing_schedule(opt.staffing.as_deref())?,
        scan_time:             ScanTime::Exponential { mean_secs_per_item: SECS_PER_ITEM },
        cart_size:             CartSizeDistribution::default(),
        observer_probability:  OBSERVER_PROBABILITY,
        customer_limit:        opt.customers,
        output_interval_ticks: if opt.output.is_some() { OUTPUT_INTERVAL_TICKS } else { 0 },
        ..SimConfig::default()
    };

    let mut sim = SimBuilder::new(config).build()?;
    println!("=== saturday: rust_checkout ===");
    println!(
        "Seed: {}  |  Lanes built: {}  |  Doors open: {}",
        opt.seed,
        sim.cashiers().len(),
        format_hms(sim.clock.now_secs()),
    );
    println!();

    let t0 = Instant::now();
    let summary = run(&mut sim, opt.output.as_deref())?;
    info!("simulation complete in {:.3} s", t0.elapsed().as_secs_f64());

    // ── Report ────────────────────────────────────────────────────────────
    println!("Customers         : {}", summary.customer_count);
    println!("Served            : {}", summary.customers_served);
    println!("Mean wait         : {}", format_hms(summary.mean_waiting_secs));
    println!("Last customer out : {}", format_hms(summary.end_secs));
    if summary.forced_releases > 0 {
        println!("Late releases     : {}", summary.forced_releases);
    }
    if sim.stats().capacity_growth > 0 {
        println!("Lanes added       : {}", sim.stats().capacity_growth);
    }
    println!();

    println!("{:<6} {:>8} {:>10}", "Hour", "Served", "Mean wait");
    println!("{}", "-".repeat(26));
    for (hour, stats) in sim.stats().waiting_by_hour() {
        println!("{:<6} {:>8} {:>10}", format!("{hour:02}:00"), stats.count, format_hms(stats.mean_secs));
    }
    println!();

    println!("{:<12} {:>8} {:>10} {:>10}", "Lane", "Served", "Busy", "Open");
    println!("{}", "-".repeat(43));
    for lane in &summary.cashiers {
        println!(
            "{:<12} {:>8} {:>10} {:>10}",
            lane.id.to_string(),
            lane.customers_served,
            format_hms(lane.busy_secs),
            format_hms(lane.open_secs),
        );
    }

    if let Some(path) = &opt.summary_json {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!();
        println!("Summary written to {}", path.display());
    }
    Ok(())
}
