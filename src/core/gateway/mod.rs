//! # Gateway Module
//!
//! Read and write access to embedded metadata through an external tool.
//!
//! ## Backends
//! - [`ExifTool`] - runs the `exiftool` program
//! - [`InMemoryGateway`] - canned records, for tests
//!
//! ## Example
//! ```rust,ignore
//! use photo_sorter::core::gateway::{ExifTool, ExifToolConfig, MetadataGateway};
//!
//! let tool = ExifTool::new(ExifToolConfig::default());
//! let record = tool.read(Path::new("IMG_0001.jpg"))?;
//! ```

mod exiftool;
mod memory;

pub use exiftool::{ExifTool, ExifToolConfig};
pub use memory::{InMemoryGateway, RecordedWrite};

use crate::core::metadata::{MetadataRecord, StagedRecord};
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How a staged record is applied to a file
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Merge the staged tags into the existing ones
    Merge,
    /// Drop every existing tag, then write the staged ones
    ReplaceAll,
}

/// Trait for metadata backends
///
/// Implement this trait to plug in another tool (or a fake for testing).
pub trait MetadataGateway {
    /// Read all tags of a file, group-qualified
    fn read(&self, path: &Path) -> Result<MetadataRecord, GatewayError>;

    /// Rewrite the file's metadata in place from a staged record
    fn write(&self, path: &Path, staged: &StagedRecord, mode: WriteMode)
        -> Result<(), GatewayError>;

    /// File content with all metadata removed. Never modifies the file.
    fn strip(&self, path: &Path) -> Result<Vec<u8>, GatewayError>;
}

impl<G: MetadataGateway + ?Sized> MetadataGateway for &G {
    fn read(&self, path: &Path) -> Result<MetadataRecord, GatewayError> {
        (**self).read(path)
    }

    fn write(
        &self,
        path: &Path,
        staged: &StagedRecord,
        mode: WriteMode,
    ) -> Result<(), GatewayError> {
        (**self).write(path, staged, mode)
    }

    fn strip(&self, path: &Path) -> Result<Vec<u8>, GatewayError> {
        (**self).strip(path)
    }
}
