//! Autocorrelation time across a temperature range.
//!
//! One independent chain per temperature, run in parallel, written to CSV.
//
//  Compile & run:  `cargo run --release --bin scan -- -L 3 --t-start 0.5 --t-stop 5`

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use csv::WriterBuilder;
use indicatif::{ProgressBar, ProgressStyle};
use ising::measure::scan_temperatures_with;
use ising::{Dynamics, Observable, SimConfig};
use rand::Rng;
use std::path::PathBuf;
use tracing::{info, Level};

// -----------------------------------------------------------------------------
// Arguments (override the YAML config)
// -----------------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(name = "scan", version, about = "Integrated autocorrelation time versus temperature")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lattice dimension L
    #[arg(short = 'L', long)]
    dim: Option<usize>,

    /// Coupling constant J
    #[arg(short = 'J', long)]
    coupling: Option<f64>,

    #[arg(long)]
    t_start: Option<f64>,

    #[arg(long)]
    t_stop: Option<f64>,

    /// Number of temperature intervals
    #[arg(long)]
    steps: Option<usize>,

    /// Recorded sweeps per temperature
    #[arg(short = 'n', long)]
    sweeps: Option<usize>,

    #[arg(long)]
    warmup: Option<usize>,

    #[arg(long)]
    dynamics: Option<Dynamics>,

    /// encoding or energy
    #[arg(long)]
    observable: Option<Observable>,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(short, long, default_value = "scan_results.csv")]
    output: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<(SimConfig, PathBuf)> {
        let mut cfg = match &self.config {
            Some(path) => SimConfig::load(path).wrap_err("Failed to load configuration")?,
            None => SimConfig::default(),
        };
        let mut scan = cfg.scan.take().unwrap_or_default();

        if let Some(v) = self.dim {
            cfg.dim = v;
        }
        if let Some(v) = self.coupling {
            cfg.coupling = v;
        }
        if let Some(v) = self.warmup {
            cfg.warmup_sweeps = v;
        }
        if let Some(v) = self.dynamics {
            cfg.dynamics = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        if let Some(v) = self.t_start {
            scan.t_start = v;
        }
        if let Some(v) = self.t_stop {
            scan.t_stop = v;
        }
        if let Some(v) = self.steps {
            scan.steps = v;
        }
        if let Some(v) = self.sweeps {
            scan.sweeps = v;
        }
        if let Some(v) = self.observable {
            scan.observable = v;
        }

        cfg.scan = Some(scan);
        Ok((cfg, self.output))
    }
}

// -----------------------------------------------------------------------------
// Main
// -----------------------------------------------------------------------------
fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let (cfg, output) = args.into_config()?;
    cfg.validate()?;
    let seed = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let spec = cfg.scan_spec(seed);
    println!("Running scan with configuration:\n{cfg:#?}");

    // Progress bar counts temperatures.
    let bar = ProgressBar::new(spec.temperatures.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(" {bar:40.cyan/blue} {pos}/{len} [{elapsed_precise}]")
            .wrap_err("bad progress template")?,
    );

    let points = scan_temperatures_with(&spec, |_| bar.inc(1))?;
    bar.finish();

    // ---------------------------------------------------------------------
    // Write CSV
    // ---------------------------------------------------------------------
    let mut wtr = WriterBuilder::new()
        .from_path(&output)
        .wrap_err_with(|| format!("cannot create {}", output.display()))?;
    wtr.write_record(["temperature", "mean_energy", "energy_std", "autocorrelation_time"])?;
    for p in &points {
        wtr.write_record(&[
            p.temperature.to_string(),
            p.mean_energy.to_string(),
            p.energy_std.to_string(),
            p.autocorrelation_time.to_string(),
        ])?;
    }
    wtr.flush()?;

    info!(seed, points = points.len(), "scan finished");
    println!("Scan complete → {}", output.display());
    Ok(())
}
