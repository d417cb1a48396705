mod args;
mod commands;
pub mod defaults;
mod printing;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use args::{SeriesArgs, WindowsArgs};
use commands::{inspect, series, windows};

/// Homwin: windowed homozygosity of simulated diploid genomes
///
/// Reads ms-format output from a population-genetics simulator and reports,
/// for one individual, how many bases of each chromosome window are homozygous.
#[derive(Parser, Debug)]
#[command(name = "homwin")]
#[command(author, version, about = "Windowed homozygosity from ms-format simulator output", long_about = None)]
struct Cli {
    /// Number of threads to use for parallel processing
    ///
    /// If not specified, defaults to the number of logical CPUs.
    #[arg(short = 't', long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute homozygosity windows for one individual.
    ///
    /// Writes a tab-separated table with columns CHROM START END N HOM.
    Windows(Box<WindowsArgs>),

    /// List the generations recorded in an ms file.
    Generations {
        /// ms-format simulator output
        input: PathBuf,

        /// Output format (pretty, json)
        #[arg(short, long, default_value = defaults::GENERATIONS_FORMAT)]
        format: String,
    },

    /// Turn window tables into plot series.
    ///
    /// Drops windows covering less than a third of their span and reports
    /// each remaining window's midpoint and homozygous fraction.
    Series(SeriesArgs),
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(defaults::LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    match cli.command {
        Commands::Windows(args) => {
            windows::run_windows(&args)?;
        }
        Commands::Generations { input, format } => {
            inspect::show_generations(&input, &format)?;
        }
        Commands::Series(args) => {
            series::run_series(&args)?;
        }
    }

    Ok(())
}
