//! Types for the organize module.

use crate::core::hasher::FingerprintStrategy;
use crate::core::scanner::ScanConfig;
use crate::core::timestamp::{SkipReason, DEFAULT_DATE_TAGS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Operation mode
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationMode {
    /// Copy files to destination (keep originals)
    #[default]
    Copy,
    /// Move files to destination
    Move,
}

/// Configuration for a sort run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    pub operation: OperationMode,
    /// Log decisions without touching the filesystem
    pub dry_run: bool,
    /// Date tags in priority order
    pub date_tags: Vec<String>,
    pub fingerprint: FingerprintStrategy,
    /// How the source tree is walked
    pub scan: ScanConfig,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            operation: OperationMode::Copy,
            dry_run: false,
            date_tags: DEFAULT_DATE_TAGS.iter().map(|t| t.to_string()).collect(),
            fingerprint: FingerprintStrategy::default(),
            scan: ScanConfig::default(),
        }
    }
}

/// What happened to one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOutcome {
    /// Copied or moved (or would have been, in a dry run)
    Transferred { source: PathBuf, destination: PathBuf },
    /// Same content already sorted under `existing`
    Duplicate {
        source: PathBuf,
        existing: PathBuf,
        source_removed: bool,
    },
    Skipped { path: PathBuf, reason: SkipReason },
    /// Directory creation, copy, move or delete failed
    Failed { path: PathBuf, reason: String },
}

/// Per-file outcomes of a sort run, in processing order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortReport {
    pub outcomes: Vec<FileOutcome>,
    pub duration_ms: u64,
}

impl SortReport {
    pub fn transferred(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Transferred { .. }))
    }

    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Duplicate { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    fn count<F: Fn(&FileOutcome) -> bool>(&self, predicate: F) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}
