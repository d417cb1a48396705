use anyhow::{Context, Result};
use homwin_ms::{Datum, MsParser};
use serde::Serialize;
use std::path::Path;

use crate::printing::print_generations;

/// What `generations` reports for each block.
#[derive(Debug, Serialize)]
pub struct GenerationSummary {
    pub generation: u64,
    pub diploid_count: usize,
    pub site_count: Option<usize>,
    pub positions: usize,
    pub haplotypes: usize,
    /// Every declared individual can be paired for analysis
    pub consistent: bool,
}

impl GenerationSummary {
    pub fn from_datum(datum: &Datum) -> Self {
        let consistent = datum.check_haplotype_count().is_ok()
            && (0..datum.diploid_count()).all(|i| datum.haplotype_pair(i).is_ok());
        Self {
            generation: datum.generation(),
            diploid_count: datum.diploid_count(),
            site_count: datum.site_count(),
            positions: datum.positions().len(),
            haplotypes: datum.haplotypes().len(),
            consistent,
        }
    }
}

pub fn show_generations(input: &Path, format: &str) -> Result<()> {
    let dataset = MsParser::new()
        .parse_path(input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;

    let summaries: Vec<GenerationSummary> =
        dataset.iter().map(GenerationSummary::from_datum).collect();

    match format {
        "pretty" => print_generations(input, &summaries),
        "json" => println!("{}", serde_json::to_string_pretty(&summaries)?),
        _ => anyhow::bail!("Unknown format '{format}'. Use: pretty or json"),
    }

    Ok(())
}
