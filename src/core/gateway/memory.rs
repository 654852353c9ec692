//! In-memory gateway for testing.

use super::{MetadataGateway, WriteMode};
use crate::core::metadata::{MetadataRecord, StagedRecord};
use crate::error::GatewayError;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A write the gateway accepted
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedWrite {
    pub path: PathBuf,
    pub record: MetadataRecord,
    pub mode: WriteMode,
}

/// In-memory metadata gateway
///
/// Records are registered per path; unknown paths fail to read like a
/// file the real tool cannot parse. `strip` returns the file bytes minus
/// any registered metadata payload, so two files that only differ in that
/// payload fingerprint the same.
#[derive(Default)]
pub struct InMemoryGateway {
    records: RwLock<HashMap<PathBuf, MetadataRecord>>,
    payloads: RwLock<HashMap<PathBuf, Vec<u8>>>,
    failing_writes: RwLock<HashSet<PathBuf>>,
    writes: RwLock<Vec<RecordedWrite>>,
    reads: RwLock<Vec<PathBuf>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the record returned for `path`
    pub fn insert(&self, path: impl Into<PathBuf>, record: MetadataRecord) {
        if let Ok(mut records) = self.records.write() {
            records.insert(path.into(), record);
        }
    }

    /// Bytes at the start of the file treated as embedded metadata by `strip`
    pub fn insert_payload(&self, path: impl Into<PathBuf>, payload: Vec<u8>) {
        if let Ok(mut payloads) = self.payloads.write() {
            payloads.insert(path.into(), payload);
        }
    }

    /// Make every write to `path` fail
    pub fn fail_writes_for(&self, path: impl Into<PathBuf>) {
        if let Ok(mut failing) = self.failing_writes.write() {
            failing.insert(path.into());
        }
    }

    /// Current record for `path`, after any writes
    pub fn record(&self, path: &Path) -> Option<MetadataRecord> {
        self.records.read().ok()?.get(path).cloned()
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.read().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.read().map(|r| r.clone()).unwrap_or_default()
    }

    fn poisoned(path: &Path) -> GatewayError {
        GatewayError::Read {
            path: path.to_path_buf(),
            reason: "in-memory gateway lock poisoned".to_string(),
        }
    }
}

impl MetadataGateway for InMemoryGateway {
    fn read(&self, path: &Path) -> Result<MetadataRecord, GatewayError> {
        if let Ok(mut reads) = self.reads.write() {
            reads.push(path.to_path_buf());
        }

        let records = self.records.read().map_err(|_| Self::poisoned(path))?;
        records.get(path).cloned().ok_or_else(|| GatewayError::Read {
            path: path.to_path_buf(),
            reason: "File format error".to_string(),
        })
    }

    fn write(
        &self,
        path: &Path,
        staged: &StagedRecord,
        mode: WriteMode,
    ) -> Result<(), GatewayError> {
        let failing = self.failing_writes.read().map_err(|_| Self::poisoned(path))?;
        if failing.contains(path) {
            return Err(GatewayError::Write {
                path: path.to_path_buf(),
                reason: "simulated write failure".to_string(),
            });
        }

        let mut records = self.records.write().map_err(|_| Self::poisoned(path))?;
        let merged = match mode {
            WriteMode::ReplaceAll => staged.record.clone(),
            WriteMode::Merge => {
                let existing = records.get(path).cloned().unwrap_or_default();
                existing
                    .iter()
                    .chain(staged.record.iter())
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect()
            }
        };
        records.insert(path.to_path_buf(), merged);

        if let Ok(mut writes) = self.writes.write() {
            writes.push(RecordedWrite {
                path: path.to_path_buf(),
                record: staged.record.clone(),
                mode,
            });
        }
        Ok(())
    }

    fn strip(&self, path: &Path) -> Result<Vec<u8>, GatewayError> {
        let bytes = fs::read(path).map_err(|e| GatewayError::Strip {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let payloads = self.payloads.read().map_err(|_| Self::poisoned(path))?;
        match payloads.get(path) {
            Some(payload) if bytes.starts_with(payload) => Ok(bytes[payload.len()..].to_vec()),
            _ => Ok(bytes),
        }
    }
}
