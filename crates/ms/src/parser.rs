use crate::dataset::SimulationDataset;
use crate::datum::Datum;
use crate::errors::ParseError;
use crate::labels::{DefaultLabels, LABEL_SENTINEL, default_labels};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

const MARKER_PREFIX: &str = "#OUT:";
const REPLICATE_PREFIX: &str = "//";
const SEGSITES_PREFIX: &str = "segsites:";
const POSITIONS_PREFIX: &str = "positions:";

/// Line-oriented reader for ms-format output.
///
/// Each `#OUT: <label> <?> <diploid_count>` marker opens a new [`Datum`];
/// the following `segsites:`, `positions:` and haplotype lines fill it in.
/// A label equal to [`LABEL_SENTINEL`] is replaced by the next value drawn
/// from the parser's label sequence.
///
/// # Examples
///
/// ```
/// use homwin_ms::MsParser;
///
/// let text = "\
/// #OUT: 20:100 x 1
/// segsites: 2
/// positions: 0.25 0.75
/// 01
/// 11
/// ";
///
/// let dataset = MsParser::new().parse_str(text).unwrap();
/// let datum = dataset.get(20).unwrap();
/// assert_eq!(datum.positions(), &[0.25, 0.75]);
/// assert_eq!(datum.haplotypes(), &["01", "11"]);
/// ```
#[derive(Debug, Clone)]
pub struct MsParser<L = DefaultLabels> {
    labels: L,
}

impl MsParser {
    /// Parser substituting sentinel labels with 20, 40, 60, 80, 100 (cycling).
    pub fn new() -> Self {
        Self {
            labels: default_labels(),
        }
    }
}

impl Default for MsParser {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: Iterator<Item = u64>> MsParser<L> {
    /// Parser drawing sentinel replacements from `labels`.
    pub fn with_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = u64, IntoIter = L>,
    {
        Self {
            labels: labels.into_iter(),
        }
    }

    /// Read an entire stream into a dataset.
    pub fn parse<R: BufRead>(mut self, reader: R) -> Result<SimulationDataset, ParseError> {
        let mut state = ParseState::default();
        let mut line_count = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            line_count = idx + 1;
            self.parse_line(&mut state, &line, line_count)?;
        }

        let dataset = state.finish();
        info!(
            lines = line_count,
            generations = dataset.len(),
            "parsed ms stream"
        );
        Ok(dataset)
    }

    pub fn parse_str(self, text: &str) -> Result<SimulationDataset, ParseError> {
        self.parse(text.as_bytes())
    }

    pub fn parse_path(self, path: impl AsRef<Path>) -> Result<SimulationDataset, ParseError> {
        let file = File::open(path.as_ref())?;
        self.parse(BufReader::new(file))
    }

    fn parse_line(
        &mut self,
        state: &mut ParseState,
        line: &str,
        line_no: usize,
    ) -> Result<(), ParseError> {
        if line.starts_with(REPLICATE_PREFIX) {
            return Ok(());
        }

        if line.starts_with(MARKER_PREFIX) {
            let datum = self.parse_marker(line, line_no)?;
            state.open(datum);
            return Ok(());
        }

        if line.starts_with(SEGSITES_PREFIX) {
            let datum = state.current(line_no, "segsites")?;
            datum.set_site_count(parse_segsites(line, line_no)?);
            return Ok(());
        }

        if line.starts_with(POSITIONS_PREFIX) {
            let datum = state.current(line_no, "positions")?;
            let positions = parse_positions(line, line_no)?;
            if let Some(declared) = datum.site_count()
                && declared != positions.len()
            {
                return Err(ParseError::PositionCount {
                    line: line_no,
                    declared,
                    found: positions.len(),
                });
            }
            datum.set_positions(positions);
            return Ok(());
        }

        let haplotype = line.trim_end();
        if haplotype.is_empty() {
            return Ok(());
        }
        if let Some(datum) = state.open.as_mut()
            && datum.has_positions()
        {
            datum.push_haplotype(haplotype.to_string());
        }

        Ok(())
    }

    fn parse_marker(&mut self, line: &str, line_no: usize) -> Result<Datum, ParseError> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let malformed = |reason: String| ParseError::Marker {
            line: line_no,
            reason,
        };

        let label = fields
            .get(1)
            .ok_or_else(|| malformed("missing generation label".to_string()))?;
        let generation = if *label == LABEL_SENTINEL {
            self.labels.next().ok_or(ParseError::LabelsExhausted {
                line: line_no,
                sentinel: LABEL_SENTINEL,
            })?
        } else {
            label
                .parse::<u64>()
                .map_err(|_| malformed(format!("non-numeric generation label `{label}`")))?
        };

        let count = fields
            .get(3)
            .ok_or_else(|| malformed("missing diploid count".to_string()))?;
        let diploid_count = count
            .parse::<usize>()
            .map_err(|_| malformed(format!("non-numeric diploid count `{count}`")))?;

        Ok(Datum::new(generation, diploid_count))
    }
}

/// Parser state between lines: the finished generations plus the open one.
#[derive(Debug, Default)]
struct ParseState {
    dataset: SimulationDataset,
    open: Option<Datum>,
}

impl ParseState {
    fn open(&mut self, datum: Datum) {
        debug!(
            generation = datum.generation(),
            diploid_count = datum.diploid_count(),
            "opened generation block"
        );
        self.seal_open();
        self.open = Some(datum);
    }

    fn current(&mut self, line_no: usize, directive: &'static str) -> Result<&mut Datum, ParseError> {
        self.open.as_mut().ok_or(ParseError::NoOpenGeneration {
            line: line_no,
            directive,
        })
    }

    fn seal_open(&mut self) {
        if let Some(datum) = self.open.take() {
            debug!(
                generation = datum.generation(),
                sites = datum.positions().len(),
                haplotypes = datum.haplotypes().len(),
                "sealed generation block"
            );
            self.dataset.seal(datum);
        }
    }

    fn finish(mut self) -> SimulationDataset {
        self.seal_open();
        self.dataset
    }
}

fn parse_segsites(line: &str, line_no: usize) -> Result<usize, ParseError> {
    let value = line
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| ParseError::SegSites {
            line: line_no,
            reason: "missing site count".to_string(),
        })?;
    value.parse().map_err(|_| ParseError::SegSites {
        line: line_no,
        reason: format!("non-numeric site count `{value}`"),
    })
}

fn parse_positions(line: &str, line_no: usize) -> Result<Vec<f64>, ParseError> {
    let invalid = |reason: String| ParseError::Positions {
        line: line_no,
        reason,
    };

    let mut positions: Vec<f64> = Vec::new();
    for field in line.split_whitespace().skip(1) {
        let p = field
            .parse::<f64>()
            .map_err(|_| invalid(format!("non-numeric position `{field}`")))?;
        if !(0.0..1.0).contains(&p) {
            return Err(invalid(format!("position `{field}` outside [0, 1)")));
        }
        if let Some(&previous) = positions.last()
            && p < previous
        {
            return Err(invalid(format!(
                "position `{field}` is smaller than the previous position {previous}"
            )));
        }
        positions.push(p);
    }
    Ok(positions)
}
