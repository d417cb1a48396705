//! Shared default values for the command-line interface.

/// Diploid individual analyzed when `--individual` is not given.
pub const INDIVIDUAL: usize = 0;

/// Largest accepted window or step, in bases.
pub const MAX_WINDOW_BP: u64 = homwin_analysis::MAX_WINDOW_SIZE;

/// Output format of the `generations` command.
pub const GENERATIONS_FORMAT: &str = "pretty";

/// Filter used when `RUST_LOG` is not set.
pub const LOG_FILTER: &str = "info";
