//! Window geometry.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Default window length in bases (5 Mbp).
pub const DEFAULT_WINDOW_SIZE: u64 = 5_000_000;
/// Default chunk length in bases (200 kbp).
pub const DEFAULT_STEP: u64 = 200_000;
/// Largest accepted window (100 Mbp).
pub const MAX_WINDOW_SIZE: u64 = 100_000_000;

/// Window and chunk sizes for one aggregation run.
///
/// Each window is divided into `window_size / step` chunks of `step` bases.
/// Can be deserialized from a file to reproduce a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window length in bases
    pub window_size: u64,
    /// Chunk length in bases; must divide `window_size`
    pub step: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            step: DEFAULT_STEP,
        }
    }
}

impl WindowConfig {
    /// Create a validated configuration.
    pub fn new(window_size: u64, step: u64) -> Result<Self, ConfigError> {
        let config = Self { window_size, step };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self { window_size, step } = *self;
        if step == 0 {
            return Err(ConfigError::ZeroStep);
        }
        if window_size > MAX_WINDOW_SIZE {
            return Err(ConfigError::WindowTooLarge {
                window_size,
                max: MAX_WINDOW_SIZE,
            });
        }
        if step > window_size {
            return Err(ConfigError::StepExceedsWindow { window_size, step });
        }
        if window_size % step != 0 {
            return Err(ConfigError::NotMultiple { window_size, step });
        }
        Ok(())
    }

    /// Number of chunks per window.
    pub fn chunk_count(&self) -> usize {
        (self.window_size / self.step) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_geometry() {
        let config = WindowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_count(), 25);
    }

    #[test]
    fn test_step_must_divide_window() {
        assert_eq!(
            WindowConfig::new(500_000, 300_000),
            Err(ConfigError::NotMultiple {
                window_size: 500_000,
                step: 300_000
            })
        );
    }

    #[test]
    fn test_step_larger_than_window() {
        assert!(matches!(
            WindowConfig::new(100, 200),
            Err(ConfigError::StepExceedsWindow { .. })
        ));
    }

    #[test]
    fn test_zero_step() {
        assert_eq!(WindowConfig::new(100, 0), Err(ConfigError::ZeroStep));
        assert_eq!(WindowConfig::new(0, 0), Err(ConfigError::ZeroStep));
    }

    #[test]
    fn test_window_size_capped() {
        assert!(WindowConfig::new(MAX_WINDOW_SIZE, 1_000_000).is_ok());
        assert_eq!(
            WindowConfig::new(u64::MAX / 2, 1),
            Err(ConfigError::WindowTooLarge {
                window_size: u64::MAX / 2,
                max: MAX_WINDOW_SIZE
            })
        );
    }

    #[test]
    fn test_window_equal_to_step() {
        let config = WindowConfig::new(1000, 1000).unwrap();
        assert_eq!(config.chunk_count(), 1);
    }
}
