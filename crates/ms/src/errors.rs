use thiserror::Error;

/// Errors raised while reading an ms-format stream.
///
/// Line numbers are 1-based and refer to the line that triggered the error.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A `#OUT:` generation marker is missing a field or has a non-numeric one.
    #[error("line {line}: malformed generation marker: {reason}")]
    Marker { line: usize, reason: String },

    /// A `segsites:` line without a valid count.
    #[error("line {line}: malformed segsites field: {reason}")]
    SegSites { line: usize, reason: String },

    /// A `positions:` value that is non-numeric, outside `[0, 1)`, or smaller
    /// than the one before it.
    #[error("line {line}: malformed positions field: {reason}")]
    Positions { line: usize, reason: String },

    /// The number of positions disagrees with the declared segsites count.
    #[error("line {line}: {found} positions listed but segsites declared {declared}")]
    PositionCount {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// A per-generation directive appeared before any `#OUT:` marker.
    #[error("line {line}: `{directive}` appears before any generation marker")]
    NoOpenGeneration { line: usize, directive: &'static str },

    /// The injected label sequence ran out while resolving a sentinel label.
    #[error("line {line}: no generation label left for sentinel `{sentinel}`")]
    LabelsExhausted { line: usize, sentinel: &'static str },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a generation's haplotypes cannot be paired into
/// the individual requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    /// The block declared a diploid count that its haplotype rows do not match.
    #[error(
        "generation {generation}: declared {declared} diploid individuals \
         ({expected} haplotypes) but found {found} haplotype lines"
    )]
    HaplotypeCount {
        generation: u64,
        declared: usize,
        expected: usize,
        found: usize,
    },

    /// A haplotype string is not as long as the list of positions.
    #[error(
        "generation {generation}: haplotype {haplotype} has {found} sites, expected {expected}"
    )]
    HaplotypeLength {
        generation: u64,
        haplotype: usize,
        expected: usize,
        found: usize,
    },

    /// The requested individual is outside the block.
    #[error("generation {generation}: individual {individual} out of range (diploid count = {count})")]
    NoSuchIndividual {
        generation: u64,
        individual: usize,
        count: usize,
    },
}
