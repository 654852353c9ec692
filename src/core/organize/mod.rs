//! Photo organization module.
//!
//! Sorts media into a `YYYY/MM` folder tree named after the capture time,
//! skipping files whose content is already in the tree.

mod executor;
mod namer;
mod sorter;
mod types;

pub use executor::TransferExecutor;
pub use namer::{DestinationNamer, MAX_CANDIDATES};
pub use sorter::{Planned, Sorter};
pub use types::*;
