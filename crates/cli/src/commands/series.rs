use anyhow::{Context, Result};
use csv::WriterBuilder;
use homwin_analysis::{SeriesPoint, SeriesSummary, read_window_file};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn};

use crate::args::SeriesArgs;

pub fn run_series(args: &SeriesArgs) -> Result<()> {
    let labels = series_labels(&args.files, args.labels.as_deref())?;

    let series: Vec<Vec<SeriesPoint>> = args
        .files
        .par_iter()
        .map(|path| {
            read_window_file(path)
                .with_context(|| format!("Failed to read window table {}", path.display()))
        })
        .collect::<Result<_>>()?;

    for (label, points) in labels.iter().zip(&series) {
        info!(label = %label, points = points.len(), "loaded series");
    }

    match SeriesSummary::from_points(series.iter().flatten()) {
        Some(summary) => info!(
            points = summary.points,
            min_midpoint = summary.min_midpoint,
            max_midpoint = summary.max_midpoint,
            min_homozygosity = summary.min_homozygosity,
            "series bounds"
        ),
        None => warn!("no window passed the coverage filter"),
    }

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            write_series(BufWriter::new(file), &labels, &series)?;
            info!("✓ Series written to {}", path.display());
        }
        None => write_series(io::stdout().lock(), &labels, &series)?,
    }

    Ok(())
}

const SERIES_HEADER: [&str; 4] = ["LABEL", "CHROM", "MID", "HOM_FRACTION"];

#[derive(Debug, Serialize)]
struct SeriesRow<'a> {
    label: &'a str,
    chrom: &'a str,
    mid: u64,
    hom_fraction: String,
}

/// Write the combined table, one row per point, labelled by its file.
fn write_series<W: Write>(writer: W, labels: &[String], series: &[Vec<SeriesPoint>]) -> Result<()> {
    let mut table = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    table
        .write_record(SERIES_HEADER)
        .context("Failed to write header")?;

    for (label, points) in labels.iter().zip(series) {
        for p in points {
            table
                .serialize(SeriesRow {
                    label: label.as_str(),
                    chrom: &p.chrom,
                    mid: p.midpoint,
                    hom_fraction: format!("{:.6}", p.homozygosity),
                })
                .context("Failed to write series")?;
        }
    }

    table.flush().context("Failed to write series")?;
    Ok(())
}

/// One label per file: the given list, or each file's name.
fn series_labels(files: &[PathBuf], labels: Option<&str>) -> Result<Vec<String>> {
    match labels {
        Some(list) => {
            let labels: Vec<String> = list.split(',').map(str::to_string).collect();
            if labels.len() != files.len() {
                anyhow::bail!("Number of labels does not match the number of input files.");
            }
            Ok(labels)
        }
        None => Ok(files
            .iter()
            .map(|path| {
                path.file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string())
            })
            .collect()),
    }
}
