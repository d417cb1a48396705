//! # Analysis Crate
//!
//! Windowed homozygosity statistics for one diploid individual of an
//! ms-format simulation, plus the tab-separated window format that carries
//! them to downstream tools.

pub mod analysis;
pub mod config;
pub mod error;

pub use analysis::homozygosity::{HomWindows, WindowAggregator};
pub use analysis::series::{SeriesPoint, SeriesSummary, read_window_file, read_window_series};
pub use analysis::window::Window;
pub use analysis::writer::WindowWriter;
pub use config::{MAX_WINDOW_SIZE, WindowConfig};
pub use error::{AggregateError, ConfigError};
