//! teller — single-teller bank queue on the des discrete-event kernel.
//!
//! Customers arrive at jittered intervals, wait in one line, and give up if
//! service has not started within their patience.  The bank closes at a fixed
//! time; anyone still waiting or arriving later is left unserved.

mod bank;

#[cfg(test)]
mod tests;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use bank::TellerConfig;

/// Runs a single-teller bank simulation.
#[derive(Parser)]
#[command(version, about)]
struct Opt {
    /// JSON file with model parameters; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of customers.
    #[arg(long)]
    customers: Option<u32>,

    /// Write one CSV row per customer to this file.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    set_up_logger(opt.verbose)?;

    let mut config = match &opt.config {
        Some(path) => load_config(path)?,
        None => TellerConfig::default(),
    };
    if let Some(seed) = opt.seed {
        config.seed = seed;
    }
    if let Some(customers) = opt.customers {
        config.customers = customers;
    }

    println!("=== teller — single-teller bank ===");
    println!(
        "Customers: {}  |  Gap: {} ± {}  |  Service: {}  |  Patience: {}  |  Close: {}  |  Seed: {}",
        config.customers,
        config.inter_arrival,
        config.jitter,
        config.service_time,
        config.patience,
        config.closing_time,
        config.seed,
    );
    println!();

    let t0 = Instant::now();
    let outcome = bank::simulate(config)?;
    let elapsed = t0.elapsed();

    if let Some(path) = &opt.csv {
        bank::write_csv(path, &outcome.records)?;
        println!("Wrote {} rows to {}", outcome.records.len(), path.display());
    }

    let s = &outcome.summary;
    println!("Simulation complete in {:.3} ms ({:?})", elapsed.as_secs_f64() * 1e3, s.end);
    println!("  arrived    : {}", outcome.records.len());
    println!("  served     : {}", outcome.served());
    println!("  reneged    : {}", outcome.reneged());
    println!("  unfinished : {}", outcome.unfinished());
    println!("  final clock: {}", s.final_time);
    println!(
        "  events     : {} dispatched, {} cancelled, {} still queued",
        s.dispatched, s.skipped, outcome.pending
    );

    Ok(())
}

fn load_config(path: &Path) -> Result<TellerConfig> {
    let file = File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid config in {}", path.display()))
}

/// Route `log` records to stderr at a level picked by `-v` count.
fn set_up_logger(verbose: u8) -> Result<(), fern::InitError> {
    let level = match verbose {
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        3.. => log::LevelFilter::Trace,
        _ => log::LevelFilter::Warn,
    };
    fern::Dispatch::new()
        .format(|out, message, record| out.finish(format_args!("[{}] {}", record.level(), message)))
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}
