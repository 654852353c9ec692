//! Sibling JSON file used to hand an edited record to the tool.

use super::MetadataRecord;
use crate::error::GatewayError;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};

/// An edited record that has been written next to its media file.
///
/// The staging file is left in place after the write so the proposed
/// metadata can be inspected later.
#[derive(Debug, Clone)]
pub struct StagedRecord {
    pub path: PathBuf,
    pub record: MetadataRecord,
}

impl StagedRecord {
    /// Staging location for a media file: same directory and stem, `.json`
    pub fn path_for(media: &Path) -> PathBuf {
        media.with_extension("json")
    }

    /// Serialize `record` as a one-element array (the shape exiftool reads
    /// back with `-json=`), 4-space indented with sorted keys.
    pub fn write(media: &Path, record: MetadataRecord) -> Result<Self, GatewayError> {
        let path = Self::path_for(media);
        let bytes = render(&record).map_err(|e| GatewayError::Staging {
            path: path.clone(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;

        fs::write(&path, bytes).map_err(|source| GatewayError::Staging {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("Staged metadata for {} at {}", media.display(), path.display());
        Ok(Self { path, record })
    }
}

fn render(record: &MetadataRecord) -> serde_json::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    [record].serialize(&mut serializer)?;
    Ok(buffer)
}
