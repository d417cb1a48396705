use crate::defaults;
use crate::utils::{parse_bp, parse_window_bp};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct WindowsArgs {
    /// ms-format simulator output
    pub input: PathBuf,

    /// Chromosome name written to the CHROM column
    #[arg(short, long)]
    pub chrom: String,

    /// Chromosome length in bases (k/m suffixes allowed, e.g. 150m)
    #[arg(short = 'L', long, value_parser = parse_bp)]
    pub chrom_length: u64,

    /// Generation to analyze
    #[arg(short, long)]
    pub generation: u64,

    /// Diploid individual within the generation (0-based)
    #[arg(short, long, default_value_t = defaults::INDIVIDUAL)]
    pub individual: usize,

    /// Window size in bases
    ///
    /// Defaults to 5m, or the value in --config.
    #[arg(short, long, value_parser = parse_window_bp)]
    pub window: Option<u64>,

    /// Move windows along the chromosome in chunks of this many bases
    ///
    /// Must divide the window size. Defaults to 200k, or the value in --config.
    #[arg(short, long, value_parser = parse_window_bp)]
    pub step: Option<u64>,

    /// JSON file with `window_size` and `step`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SeriesArgs {
    /// Window tables written by `homwin windows`
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Comma separated labels, one per input file (default: file names)
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
