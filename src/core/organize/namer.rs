//! Destination directory and file names.

use crate::core::timestamp::ResolvedTimestamp;
use crate::error::TransferError;
use std::fs;
use std::path::{Path, PathBuf};

/// Highest counter tried before giving up on a timestamp (three digits)
pub const MAX_CANDIDATES: u32 = 1000;

/// Builds `root/YYYY/MM/YYYYMMDD_HHMMSS[_NNN].ext` paths
#[derive(Debug, Clone)]
pub struct DestinationNamer {
    root: PathBuf,
}

impl DestinationNamer {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `root/YYYY/MM`
    pub fn directory(&self, ts: &ResolvedTimestamp) -> PathBuf {
        self.root
            .join(format!("{:04}", ts.year()))
            .join(format!("{:02}", ts.month()))
    }

    /// Create the directory for `ts` (and parents). Succeeds if it exists.
    pub fn ensure_directory(&self, ts: &ResolvedTimestamp) -> Result<PathBuf, TransferError> {
        let dir = self.directory(ts);
        fs::create_dir_all(&dir).map_err(|source| TransferError::CreateDirectory {
            path: dir.clone(),
            source,
        })?;
        Ok(dir)
    }

    /// Leaf name for counter `index`; counter 0 has no suffix
    pub fn file_name(ts: &ResolvedTimestamp, ext: &str, index: u32) -> String {
        if index == 0 {
            format!("{}.{}", ts.stamp(), ext)
        } else {
            format!("{}_{:03}.{}", ts.stamp(), index, ext)
        }
    }

    /// Candidate paths in the order they are tried
    pub fn candidates<'a>(
        &'a self,
        ts: &'a ResolvedTimestamp,
        ext: &'a str,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        let dir = self.directory(ts);
        (0..MAX_CANDIDATES).map(move |i| dir.join(Self::file_name(ts, ext, i)))
    }
}
