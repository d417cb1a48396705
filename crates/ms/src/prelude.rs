//! Commonly used imports for convenience.
//!
//! ```
//! use homwin_ms::prelude::*;
//!
//! let dataset = MsParser::new().parse_str("#OUT: 40 40 1\nsegsites: 0\n").unwrap();
//! assert!(dataset.get(40).is_some());
//! ```

pub use crate::dataset::SimulationDataset;
pub use crate::datum::Datum;
pub use crate::errors::{self, ConsistencyError, ParseError};
pub use crate::parser::MsParser;
