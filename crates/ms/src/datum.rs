use crate::errors::ConsistencyError;
use serde::Serialize;

/// One generation's worth of parsed ms output.
///
/// A `Datum` is opened by a `#OUT:` marker and sealed when the next marker
/// appears or the stream ends. Once sealed it is only reachable through
/// shared references from the owning [`SimulationDataset`](crate::SimulationDataset),
/// so it never changes again.
///
/// Haplotypes are stored in file order; individual `i` owns haplotypes
/// `2i` and `2i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Datum {
    /// Generation label, after sentinel substitution
    generation: u64,
    /// Number of diploid individuals declared by the marker
    diploid_count: usize,
    /// Declared number of segregating sites (`None` until `segsites:` is read)
    site_count: Option<usize>,
    /// Fractional positions in `[0, 1)`, ascending (`None` until `positions:` is read)
    positions: Option<Vec<f64>>,
    /// Haplotype strings over `{0, 1}`
    haplotypes: Vec<String>,
}

impl Datum {
    /// Open an empty record for `generation`.
    pub fn new(generation: u64, diploid_count: usize) -> Self {
        Self {
            generation,
            diploid_count,
            site_count: None,
            positions: None,
            haplotypes: Vec::new(),
        }
    }

    /// Build a complete record directly, as if it had been parsed.
    ///
    /// `site_count` is taken from the number of positions.
    pub fn from_parts(
        generation: u64,
        diploid_count: usize,
        positions: Vec<f64>,
        haplotypes: Vec<String>,
    ) -> Self {
        Self {
            generation,
            diploid_count,
            site_count: Some(positions.len()),
            positions: Some(positions),
            haplotypes,
        }
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of diploid individuals the generation marker promised.
    #[inline]
    pub fn diploid_count(&self) -> usize {
        self.diploid_count
    }

    #[inline]
    pub fn site_count(&self) -> Option<usize> {
        self.site_count
    }

    /// Segregating-site positions, or an empty slice if none were read.
    #[inline]
    pub fn positions(&self) -> &[f64] {
        self.positions.as_deref().unwrap_or(&[])
    }

    #[inline]
    pub fn haplotypes(&self) -> &[String] {
        &self.haplotypes
    }

    /// Whether a `positions:` line has been read for this generation.
    #[inline]
    pub fn has_positions(&self) -> bool {
        self.positions.is_some()
    }

    /// Number of complete individuals present in the haplotype rows.
    pub fn individual_count(&self) -> usize {
        self.haplotypes.len() / 2
    }

    /// Check that the haplotype rows match the declared diploid count.
    pub fn check_haplotype_count(&self) -> Result<(), ConsistencyError> {
        let expected = 2 * self.diploid_count;
        if self.haplotypes.len() != expected {
            return Err(ConsistencyError::HaplotypeCount {
                generation: self.generation,
                declared: self.diploid_count,
                expected,
                found: self.haplotypes.len(),
            });
        }
        Ok(())
    }

    /// Borrow the two haplotypes of individual `individual` as byte strings.
    ///
    /// Fails if the block's haplotype count disagrees with its diploid
    /// count, if the individual does not exist, or if either haplotype is
    /// not exactly one character per position.
    pub fn haplotype_pair(&self, individual: usize) -> Result<(&[u8], &[u8]), ConsistencyError> {
        self.check_haplotype_count()?;

        if individual >= self.diploid_count {
            return Err(ConsistencyError::NoSuchIndividual {
                generation: self.generation,
                individual,
                count: self.diploid_count,
            });
        }

        let expected = self.positions().len();
        let first = 2 * individual;
        let pair = [first, first + 1].map(|idx| {
            let hap = self.haplotypes[idx].as_bytes();
            if hap.len() == expected {
                Ok(hap)
            } else {
                Err(ConsistencyError::HaplotypeLength {
                    generation: self.generation,
                    haplotype: idx,
                    expected,
                    found: hap.len(),
                })
            }
        });
        let [h0, h1] = pair;
        Ok((h0?, h1?))
    }

    pub(crate) fn set_site_count(&mut self, count: usize) {
        self.site_count = Some(count);
    }

    pub(crate) fn set_positions(&mut self, positions: Vec<f64>) {
        self.positions = Some(positions);
    }

    pub(crate) fn push_haplotype(&mut self, haplotype: String) {
        self.haplotypes.push(haplotype);
    }
}
