//! Underway CO2 crossover checker.
//!
//! Searches cruise data files for high-quality crossovers between cruises of
//! different platforms, one pair at a time, one cruise against a list, or
//! across a whole fleet of cruises.

mod config;
mod ids;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossover::{
    BatchOptions, CancelToken, Crossover, CrossoverChecker, CrossoverError, CrossoverResult,
    DatasetId, ExtentIndex, TracingProgress,
};
use dsg_reader::DsgTrackLoader;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use config::ServiceConfig;

static PROGRESS: TracingProgress = TracingProgress;

#[derive(Parser, Debug)]
#[command(name = "crossover-checker")]
#[command(about = "Finds high-quality crossovers between underway CO2 cruises")]
struct Args {
    /// Configuration file path (environment variables are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Root directory of the DSG files
    #[arg(long, global = true, env = "CROSSOVER_DSG_DIR")]
    dsg_dir: Option<PathBuf>,

    /// Worker threads for parallel searches
    #[arg(short, long, global = true)]
    workers: Option<usize>,

    /// Write the crossovers to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a single pair of cruises
    Pair { first: String, second: String },

    /// Check one cruise against a list of others
    Many {
        primary: String,

        /// File with candidate dataset IDs, one per line
        #[arg(long, conflicts_with = "candidates")]
        candidates_file: Option<PathBuf>,

        candidates: Vec<String>,
    },

    /// Check every cruise in a list against all the others
    Fleet { ids_file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut config = match &args.config {
        Some(path) => ServiceConfig::from_yaml_file(path)?,
        None => ServiceConfig::from_env()?,
    };
    if let Some(dsg_dir) = &args.dsg_dir {
        config.dsg_dir = dsg_dir.clone();
    }
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    config.validate()?;

    info!(
        dsg_dir = %config.dsg_dir.display(),
        workers = config.workers,
        max_distance_km = config.crossover.max_crossover_dist_km,
        "Starting crossover checker"
    );

    let cancel = CancelToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            signal_token.cancel();
        }
    });

    let output = args.output.clone();
    let command = args.command;
    let crossovers =
        tokio::task::spawn_blocking(move || run(command, &config, cancel)).await??;

    write_output(&crossovers, output.as_deref())?;
    info!(count = crossovers.len(), "Crossover check complete");
    Ok(())
}

fn init_tracing(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .context("Invalid log level")?;

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .with_writer(std::io::stderr);

    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

/// Run a subcommand to completion on a bounded rayon pool.
fn run(command: Command, config: &ServiceConfig, cancel: CancelToken) -> Result<Vec<Crossover>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("crossover-{i}"))
        .build()
        .context("Failed to build worker pool")?;
    let parallel = config.workers > 1;

    let checker = CrossoverChecker::new(
        DsgTrackLoader::new(&config.dsg_dir),
        config.crossover.clone(),
    );
    let options = BatchOptions::new(&PROGRESS, cancel);

    let result: CrossoverResult<Vec<Crossover>> = match command {
        Command::Pair { first, second } => checker
            .check_pair(&[first.as_str(), second.as_str()])
            .map(|found| found.into_iter().collect()),

        Command::Many {
            primary,
            candidates_file,
            candidates,
        } => {
            let candidates = match candidates_file {
                Some(path) => ids::read_id_file(&path)?,
                None => candidates,
            };
            anyhow::ensure!(!candidates.is_empty(), "No candidate dataset IDs given");
            if parallel {
                pool.install(|| checker.crossovers_for_parallel(&primary, &candidates, &options))
            } else {
                checker.crossovers_for(&primary, &candidates, &options)
            }
        }

        Command::Fleet { ids_file } => {
            let dataset_ids = parse_fleet_ids(&ids_file)?;
            info!(cruises = dataset_ids.len(), "Building cruise extents");
            let (index, _skipped) = ExtentIndex::build(checker.loader(), dataset_ids, &options);
            pool.install(|| checker.fleet_crossovers(&index, parallel, &options))
        }
    };

    result.map_err(|err| {
        if matches!(err, CrossoverError::Cancelled) {
            error!("Crossover check cancelled");
        }
        anyhow::Error::new(err)
    })
}

/// Dataset IDs from a fleet list; invalid entries are logged and skipped.
fn parse_fleet_ids(path: &Path) -> Result<Vec<DatasetId>> {
    let mut dataset_ids = Vec::new();
    for raw in ids::read_id_file(path)? {
        match DatasetId::parse(&raw) {
            Ok(id) => dataset_ids.push(id),
            Err(err) => warn!(dataset = %raw, error = %err, "Skipping invalid dataset ID"),
        }
    }
    Ok(dataset_ids)
}

fn write_output(crossovers: &[Crossover], output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(crossovers)?;
    match output {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write output: {}", path.display()))?,
        None => println!("{json}"),
    }
    Ok(())
}
