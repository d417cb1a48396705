//! Generation-label substitution.
//!
//! One simulator writes the literal token `20:100` in place of the
//! generation number for its sampled blocks. Those blocks are sampled at
//! generations 20, 40, 60, 80 and 100, in that order, so each sentinel is
//! replaced by the next value of a label sequence. The parser takes the
//! sequence as an iterator so other sampling schemes can be substituted.

/// Label-field token that triggers substitution.
pub const LABEL_SENTINEL: &str = "20:100";

/// Generations sampled by the simulator that emits [`LABEL_SENTINEL`].
pub const DEFAULT_LABEL_CYCLE: [u64; 5] = [20, 40, 60, 80, 100];

/// Iterator type of [`default_labels`].
pub type DefaultLabels = std::iter::Cycle<std::array::IntoIter<u64, 5>>;

/// The default substitution sequence: [`DEFAULT_LABEL_CYCLE`] repeated forever.
pub fn default_labels() -> DefaultLabels {
    DEFAULT_LABEL_CYCLE.into_iter().cycle()
}
