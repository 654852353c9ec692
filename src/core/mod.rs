//! # Core Module
//!
//! The sorting engine, independent of the command line.
//!
//! ## Modules
//! - `scanner` - Lists files under the source directory
//! - `gateway` - Talks to the external metadata tool
//! - `metadata` - Tag records and the JSON staging file
//! - `timestamp` - Picks and validates the capture time
//! - `hasher` - Content fingerprints for duplicate detection
//! - `organize` - Destination naming and the sort run
//! - `editor` - Batch metadata fixes

pub mod editor;
pub mod gateway;
pub mod hasher;
pub mod metadata;
pub mod organize;
pub mod scanner;
pub mod timestamp;

// Re-export commonly used types
pub use gateway::{ExifTool, ExifToolConfig, MetadataGateway, WriteMode};
pub use hasher::{Fingerprint, FingerprintStrategy};
pub use metadata::MetadataRecord;
pub use organize::{FileOutcome, OperationMode, SortConfig, SortReport, Sorter};
pub use timestamp::{MediaKind, SkipReason, TimestampResolver};
