use anyhow::{Context, Result};
use homwin_analysis::{HomWindows, WindowAggregator, WindowConfig, WindowWriter};
use homwin_ms::MsParser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::info;

use crate::args::WindowsArgs;
use crate::printing::describe_config;

pub fn run_windows(args: &WindowsArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let aggregator = WindowAggregator::new(config).context("Invalid window configuration")?;
    info!(
        input = %args.input.display(),
        generation = args.generation,
        individual = args.individual,
        chrom = %args.chrom,
        chrom_length = args.chrom_length,
        "{}",
        describe_config(&config)
    );

    let dataset = MsParser::new()
        .parse_path(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    let datum = dataset.get(args.generation).with_context(|| {
        format!(
            "Generation {} not found in {} (available: {:?})",
            args.generation,
            args.input.display(),
            dataset.generations()
        )
    })?;

    let windows = aggregator
        .windows(datum, args.individual, args.chrom_length)
        .with_context(|| {
            format!(
                "Cannot analyze individual {} of generation {}",
                args.individual, args.generation
            )
        })?;

    let written = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_table(BufWriter::new(file), &args.chrom, windows)?
        }
        None => write_table(io::stdout().lock(), &args.chrom, windows)?,
    };

    match &args.output {
        Some(path) => info!(windows = written, "✓ Windows written to {}", path.display()),
        None => info!(windows = written, "✓ Windows written"),
    }

    Ok(())
}

/// Start from `--config` (or the defaults) and apply `--window` / `--step`.
fn resolve_config(args: &WindowsArgs) -> Result<WindowConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<WindowConfig>(&text)
                .with_context(|| format!("Invalid window configuration in {}", path.display()))?
        }
        None => WindowConfig::default(),
    };

    if let Some(window_size) = args.window {
        config.window_size = window_size;
    }
    if let Some(step) = args.step {
        config.step = step;
    }

    Ok(config)
}

fn write_table<W: Write>(writer: W, chrom: &str, windows: HomWindows<'_>) -> Result<usize> {
    let mut table = WindowWriter::new(writer, chrom).context("Failed to write header")?;
    let written = table.write_all(windows).context("Failed to write windows")?;
    table
        .into_inner()
        .context("Failed to write windows")?
        .flush()?;
    Ok(written)
}
