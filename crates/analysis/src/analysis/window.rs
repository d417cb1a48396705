use serde::Serialize;

/// One window of the chromosome tiling.
///
/// `end` is exclusive. `covered_bases` is `end - start`, which is shorter
/// than the configured window only for the last window of a chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Window {
    pub start: u64,
    pub end: u64,
    pub covered_bases: u64,
    /// Covered bases minus heterozygous sites
    pub homozygous: u64,
    pub heterozygous: u64,
}

impl Window {
    pub fn new(start: u64, end: u64, heterozygous: u64) -> Self {
        let covered_bases = end - start;
        Self {
            start,
            end,
            covered_bases,
            homozygous: covered_bases.saturating_sub(heterozygous),
            heterozygous,
        }
    }
}
