//! # Hasher Module
//!
//! Content fingerprints used to decide whether two files are duplicates.
//!
//! ## Strategies
//! - **Stripped** (default) - hash the bytes left after the metadata tool
//!   removes every tag, so a re-tagged copy of a photo still matches
//! - **Raw** - hash the whole file as stored
//!
//! Fingerprints are 128-bit XXH3 digests. They are compared for equality
//! and never persisted.

use crate::core::gateway::MetadataGateway;
use crate::error::FingerprintError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use xxhash_rust::xxh3::{xxh3_128, Xxh3};

/// Read buffer for raw hashing
const CHUNK_SIZE: usize = 64 * 1024;

/// Digest of file content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(u128);

impl Fingerprint {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        Self(xxh3_128(bytes))
    }

    pub fn to_hex(&self) -> String {
        format!("{:032x}", self.0)
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Which bytes go into a fingerprint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintStrategy {
    /// Content with all metadata removed
    #[default]
    Stripped,
    /// The whole file, metadata included
    Raw,
}

impl fmt::Display for FingerprintStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FingerprintStrategy::Stripped => write!(f, "metadata-stripped"),
            FingerprintStrategy::Raw => write!(f, "raw"),
        }
    }
}

/// Computes fingerprints with a fixed strategy
pub struct ContentFingerprinter<G> {
    gateway: G,
    strategy: FingerprintStrategy,
}

impl<G: MetadataGateway> ContentFingerprinter<G> {
    pub fn new(gateway: G, strategy: FingerprintStrategy) -> Self {
        Self { gateway, strategy }
    }

    pub fn strategy(&self) -> FingerprintStrategy {
        self.strategy
    }

    /// Fingerprint a file. Never modifies it.
    pub fn fingerprint(&self, path: &Path) -> Result<Fingerprint, FingerprintError> {
        let fingerprint = match self.strategy {
            FingerprintStrategy::Stripped => {
                let bytes = self
                    .gateway
                    .strip(path)
                    .map_err(|source| FingerprintError::Stripped {
                        path: path.to_path_buf(),
                        source,
                    })?;
                Fingerprint::of_bytes(&bytes)
            }
            FingerprintStrategy::Raw => hash_file(path)?,
        };

        tracing::trace!("{} {} ({})", fingerprint, path.display(), self.strategy);
        Ok(fingerprint)
    }
}

/// Stream a file through XXH3 without loading it whole
pub fn hash_file(path: &Path) -> Result<Fingerprint, FingerprintError> {
    let io_error = |source: std::io::Error| FingerprintError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_error)?;
    let mut hasher = Xxh3::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let n = file.read(&mut buffer).map_err(io_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(Fingerprint(hasher.digest128()))
}
