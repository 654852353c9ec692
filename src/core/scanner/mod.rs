//! # Scanner Module
//!
//! Lists every regular file under a source directory.
//!
//! The listing is collected up front and sorted, so the sorter works from a
//! fixed snapshot: files it moves into a destination nested in the source
//! are not visited again.
//!
//! ## Example
//! ```rust,ignore
//! use photo_sorter::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let listing = scanner.scan(Path::new("/Users/me/inbox"))?;
//! ```

mod walker;

pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use std::path::{Path, PathBuf};

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Files found, in path order
    pub files: Vec<PathBuf>,
    /// Entries that could not be read (non-fatal)
    pub errors: Vec<ScanError>,
}

/// Fail with [`ScanError::DirectoryNotFound`] unless `path` is a directory
pub fn require_directory(role: &'static str, path: &Path) -> Result<(), ScanError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(ScanError::DirectoryNotFound {
            role,
            path: path.to_path_buf(),
        })
    }
}
