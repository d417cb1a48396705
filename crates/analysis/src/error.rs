use homwin_ms::ConsistencyError;
use thiserror::Error;

/// Invalid window geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("step must be a positive number of bases")]
    ZeroStep,
    #[error("window ({window_size}) exceeds the maximum of {max} bases")]
    WindowTooLarge { window_size: u64, max: u64 },
    #[error("step ({step}) > window ({window_size}) doesn't make sense")]
    StepExceedsWindow { window_size: u64, step: u64 },
    #[error("step ({step}) must divide window ({window_size}) with no remainder")]
    NotMultiple { window_size: u64, step: u64 },
    #[error("chromosome length must be a positive number of bases")]
    EmptyChromosome,
}

/// Reasons an aggregation refuses to start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Consistency(#[from] ConsistencyError),
}
