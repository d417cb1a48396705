//! Reading window files back as plot series.
//!
//! A window file is turned into one point per window: the window midpoint
//! against the homozygous fraction `HOM / N`. Windows covering less than a
//! third of their span are dropped as insufficiently covered.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct WindowRow {
    #[serde(rename = "CHROM")]
    chrom: String,
    #[serde(rename = "START")]
    start: u64,
    #[serde(rename = "END")]
    end: u64,
    #[serde(rename = "N")]
    covered_bases: u64,
    #[serde(rename = "HOM")]
    homozygous: u64,
}

impl WindowRow {
    fn is_covered(&self) -> bool {
        self.covered_bases > 0 && 3 * self.covered_bases >= self.end.saturating_sub(self.start)
    }

    fn midpoint(&self) -> u64 {
        (self.start + self.end) / 2
    }

    fn homozygosity(&self) -> f64 {
        self.homozygous as f64 / self.covered_bases as f64
    }
}

/// One plotted window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub chrom: String,
    /// Window midpoint, rounded down
    pub midpoint: u64,
    /// `HOM / N`
    pub homozygosity: f64,
}

/// Axis bounds over one or more series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub points: usize,
    pub min_midpoint: u64,
    pub max_midpoint: u64,
    pub min_homozygosity: f64,
}

impl SeriesSummary {
    /// Bounds of `points`, or `None` if there are none.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a SeriesPoint>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self {
                    points: 1,
                    min_midpoint: p.midpoint,
                    max_midpoint: p.midpoint,
                    min_homozygosity: p.homozygosity.min(1.0),
                },
                Some(s) => Self {
                    points: s.points + 1,
                    min_midpoint: s.min_midpoint.min(p.midpoint),
                    max_midpoint: s.max_midpoint.max(p.midpoint),
                    min_homozygosity: s.min_homozygosity.min(p.homozygosity),
                },
            })
        })
    }
}

/// Parse a window table, skipping its header line.
pub fn read_window_series<R: Read>(reader: R) -> Result<Vec<SeriesPoint>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut points = Vec::new();
    for row in reader.deserialize::<WindowRow>() {
        let row = row?;
        if !row.is_covered() {
            continue;
        }
        points.push(SeriesPoint {
            midpoint: row.midpoint(),
            homozygosity: row.homozygosity(),
            chrom: row.chrom,
        });
    }
    Ok(points)
}

pub fn read_window_file(path: impl AsRef<Path>) -> Result<Vec<SeriesPoint>, csv::Error> {
    let file = File::open(path.as_ref())?;
    read_window_series(file)
}
