//! # ms-format parsing
//!
//! The `homwin-ms` crate reads the text output of a population-genetics
//! simulator in "ms" format and turns it into per-generation records.
//! Each generation block is stored as a [`Datum`] inside a
//! [`SimulationDataset`], keyed by its generation label.

pub mod dataset;
pub mod datum;
pub mod errors;
pub mod labels;
pub mod parser;
pub mod prelude;

pub use dataset::SimulationDataset;
pub use datum::Datum;
pub use errors::{ConsistencyError, ParseError};
pub use labels::{DEFAULT_LABEL_CYCLE, LABEL_SENTINEL};
pub use parser::MsParser;
