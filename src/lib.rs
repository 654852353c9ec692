//! # Photo Sorter
//!
//! Files photos and videos into a `YYYY/MM` tree named after their capture
//! time, and repairs the metadata that decides that time.
//!
//! ## Core Philosophy
//! - **Never lose a file** - copy by default, delete only proven duplicates
//! - **Content decides** - same name is not same photo; fingerprints are compared
//! - **Log every decision** - one line per file, dry run prints the same lines
//!
//! ## Architecture
//! - `core` - sorting engine and metadata editors
//! - `error` - typed errors
//! - `cli` - argument parsing and console output for the binaries

pub mod cli;
pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use error::{Result, SorterError};

/// Initialize tracing for the binaries.
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when verbose.
/// Calling it twice is harmless.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
