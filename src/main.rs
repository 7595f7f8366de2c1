//! Command-line driver for the Ising engine.
//!
//! `sample` runs the Markov chain, `exact` enumerates the equilibrium
//! distribution, `compare` does both and reports how far apart they are.
//! Settings come from an optional YAML file (`--config`), overridden by flags.

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{bail, Result, WrapErr};
use csv::WriterBuilder;
use ising::autocorr::AutocorrSummary;
use ising::exact::MAX_EXACT_DIM;
use ising::{Dynamics, ExactDistribution, IsingModel, Observable, Recorder, SimConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn, Level};

#[derive(Parser, Debug)]
#[command(name = "ising", version, about = "2D Ising model: MCMC sampling and exact distributions")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at DEBUG instead of INFO
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Model settings that override the config file.
#[derive(Args, Debug, Clone)]
struct ModelArgs {
    /// Lattice dimension L
    #[arg(short = 'L', long)]
    dim: Option<usize>,

    /// Coupling constant J
    #[arg(short = 'J', long)]
    coupling: Option<f64>,

    /// Temperature T
    #[arg(short = 'T', long)]
    temperature: Option<f64>,

    /// metropolis or heatbath
    #[arg(long)]
    dynamics: Option<Dynamics>,

    /// Warmup sweeps
    #[arg(long)]
    warmup: Option<usize>,

    /// Recorded sweeps
    #[arg(short = 'n', long)]
    sweeps: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,
}

impl ModelArgs {
    fn apply(&self, cfg: &mut SimConfig) {
        if let Some(v) = self.dim {
            cfg.dim = v;
        }
        if let Some(v) = self.coupling {
            cfg.coupling = v;
        }
        if let Some(v) = self.temperature {
            cfg.temperature = v;
        }
        if let Some(v) = self.dynamics {
            cfg.dynamics = v;
        }
        if let Some(v) = self.warmup {
            cfg.warmup_sweeps = v;
        }
        if let Some(v) = self.sweeps {
            cfg.sweeps = v;
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Warm up, then record energy and configuration code per sweep
    Sample {
        #[command(flatten)]
        model: ModelArgs,

        /// Use the color-class parallel sweep
        #[arg(long)]
        colored: bool,

        /// CSV output (default stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Exact equilibrium distribution over all configuration codes
    Exact {
        #[command(flatten)]
        model: ModelArgs,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sample and compare the code histogram with the exact distribution
    Compare {
        #[command(flatten)]
        model: ModelArgs,

        /// How many of the most frequent codes to log
        #[arg(long, default_value_t = 5)]
        top: usize,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = match &cli.config {
        Some(path) => {
            info!("Reading configuration from: {}", path.display());
            SimConfig::load(path).wrap_err("Failed to load configuration")?
        }
        None => SimConfig::default(),
    };

    match cli.command {
        Command::Sample { model, colored, output } => {
            model.apply(&mut cfg);
            cfg.validate()?;
            run_sample(&cfg, colored, output)
        }
        Command::Exact { model, output } => {
            model.apply(&mut cfg);
            cfg.validate()?;
            run_exact(&cfg, output)
        }
        Command::Compare { model, top, output } => {
            model.apply(&mut cfg);
            cfg.validate()?;
            run_compare(&cfg, top, output)
        }
    }
}

fn build_model(cfg: &SimConfig) -> Result<IsingModel> {
    let model = match cfg.seed {
        Some(seed) => IsingModel::with_seed(cfg.dim, cfg.coupling, cfg.temperature, seed)?,
        None => IsingModel::new(cfg.dim, cfg.coupling, cfg.temperature)?,
    };
    Ok(model.with_dynamics(cfg.dynamics))
}

fn open_output(output: &Option<PathBuf>) -> Result<csv::Writer<Box<dyn Write>>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .wrap_err_with(|| format!("cannot create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    Ok(WriterBuilder::new().from_writer(sink))
}

fn run_sample(cfg: &SimConfig, colored: bool, output: Option<PathBuf>) -> Result<()> {
    info!("Configuration:\n{cfg:#?}");
    let mut model = build_model(cfg)?;
    model.warmup(cfg.warmup_sweeps);

    let mut rec = Recorder::default();
    let mut wtr = open_output(&output)?;
    wtr.write_record(["sweep", "energy", "encoding"])?;
    for sweep in 0..cfg.sweeps {
        let sample = if colored { model.colored_sweep() } else { model.run_sweep() };
        wtr.write_record(&[
            sweep.to_string(),
            sample.energy.to_string(),
            sample.encoding.map(|c| c.to_string()).unwrap_or_default(),
        ])?;
        rec.push(sample);
    }
    wtr.flush()?;

    // codes when the lattice is small enough to encode, energies otherwise
    let observable = if rec.encodings.is_empty() { Observable::Energy } else { Observable::Encoding };
    let summary = AutocorrSummary::from_series(&rec.series(observable))?;
    if summary.is_frozen() {
        warn!(?observable, "chain frozen, autocorrelation time undefined");
    }
    info!(
        mean_energy = ising::autocorr::sample_mean(&rec.energies)?,
        observable = ?observable,
        tau_int = summary.tau_int,
        n_eff = summary.n_eff,
        "sampling complete"
    );
    Ok(())
}

fn run_exact(cfg: &SimConfig, output: Option<PathBuf>) -> Result<()> {
    if cfg.dim > MAX_EXACT_DIM {
        bail!("exact enumeration is limited to L <= {MAX_EXACT_DIM}, got L = {}", cfg.dim);
    }
    let exact = ExactDistribution::compute(cfg.dim, cfg.coupling, cfg.temperature)?;
    let mut wtr = open_output(&output)?;
    wtr.write_record(["code", "probability"])?;
    for (code, p) in exact.entries() {
        wtr.write_record(&[code.to_string(), p.to_string()])?;
    }
    wtr.flush()?;
    info!(
        configurations = exact.len(),
        log_partition = exact.log_partition(),
        mean_energy = exact.mean_energy(),
        "enumeration complete"
    );
    Ok(())
}

fn run_compare(cfg: &SimConfig, top: usize, output: Option<PathBuf>) -> Result<()> {
    if cfg.dim > MAX_EXACT_DIM {
        bail!("comparison needs exact enumeration, limited to L <= {MAX_EXACT_DIM}");
    }
    let mut model = build_model(cfg)?;
    let exact = model.theoretical_distribution()?;
    model.warmup(cfg.warmup_sweeps);
    let hist = Recorder::sample(&mut model, cfg.sweeps).histogram();

    let mut wtr = open_output(&output)?;
    wtr.write_record(["code", "simulated", "theoretical"])?;
    for row in hist.compare(&exact) {
        wtr.write_record(&[
            row.code.to_string(),
            row.simulated.to_string(),
            row.theoretical.to_string(),
        ])?;
    }
    wtr.flush()?;

    for (code, count) in hist.dominant(top) {
        info!(
            code,
            simulated = count as f64 / hist.total() as f64,
            theoretical = exact.probability(code).unwrap_or(0.0),
            "frequent code"
        );
    }
    info!(
        total_variation = hist.total_variation_distance(&exact),
        distinct = hist.distinct(),
        "comparison complete"
    );
    Ok(())
}
