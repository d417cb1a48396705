//! Homozygosity analysis for Homwin
//!
//! - Windowed heterozygote counting over a ring of chunk counters
//! - Window records and their tab-separated format
//! - Reading window files back as plot series

pub mod homozygosity;
pub mod series;
pub mod window;
pub mod writer;

pub use homozygosity::{HomWindows, ScanState, Site, WindowAggregator};
pub use series::{SeriesPoint, SeriesSummary, read_window_file, read_window_series};
pub use window::Window;
pub use writer::{WINDOW_HEADER, WindowWriter};
