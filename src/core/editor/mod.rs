//! # Editor Module
//!
//! Batch rewrites of embedded metadata.
//!
//! ## Flow (per file)
//! 1. Read the record through the gateway
//! 2. Let the editor decide: leave the file alone, or propose a new record
//! 3. Stage the proposal as `<stem>.json` next to the file
//! 4. Ask the gateway to apply it
//!
//! A failure on one file is logged and recorded; the batch carries on.
//!
//! ## Editors
//! - [`AddMissingDates`] - fill in a fixed capture date on undated files
//! - [`FixBrokenFields`] - drop broken tags and backfill dates from `ModifyDate`

mod add_dates;
mod fix_fields;

pub use add_dates::{AddMissingDates, DEFAULT_TIMESTAMP};
pub use fix_fields::FixBrokenFields;

use crate::core::gateway::{MetadataGateway, WriteMode};
use crate::core::metadata::{MetadataRecord, StagedRecord};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// What an editor wants done with one record
#[derive(Debug, Clone, PartialEq)]
pub enum EditDecision {
    /// Leave the file untouched
    Keep { reason: String },
    /// Write this record back
    Rewrite(MetadataRecord),
}

/// A rule chain applied to one metadata record
pub trait MetadataEditor {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// How the proposed record is applied
    fn write_mode(&self) -> WriteMode;

    fn edit(&self, record: MetadataRecord) -> EditDecision;
}

/// Result for one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOutcome {
    Written { path: PathBuf, staged: PathBuf },
    Skipped { path: PathBuf, reason: String },
    Failed { path: PathBuf, reason: String },
}

/// Per-file outcomes of an editor run, in argument order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditReport {
    pub outcomes: Vec<EditOutcome>,
    pub duration_ms: u64,
}

impl EditReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EditOutcome::Written { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EditOutcome::Skipped { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, EditOutcome::Failed { .. }))
            .count()
    }
}

/// Apply `editor` to one file
pub fn edit_file<G, E>(gateway: &G, editor: &E, path: &Path) -> EditOutcome
where
    G: MetadataGateway + ?Sized,
    E: MetadataEditor + ?Sized,
{
    let record = match gateway.read(path) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("{}", e);
            return EditOutcome::Skipped {
                path: path.to_path_buf(),
                reason: e.to_string(),
            };
        }
    };

    let proposed = match editor.edit(record) {
        EditDecision::Keep { reason } => {
            tracing::info!("SKIP: {} {}", reason, path.display());
            return EditOutcome::Skipped {
                path: path.to_path_buf(),
                reason,
            };
        }
        EditDecision::Rewrite(record) => record,
    };

    tracing::info!("{}: {}", editor.name(), path.display());
    let staged = match StagedRecord::write(path, proposed) {
        Ok(staged) => staged,
        Err(e) => return failed(path, e.to_string()),
    };

    match gateway.write(path, &staged, editor.write_mode()) {
        Ok(()) => EditOutcome::Written {
            path: path.to_path_buf(),
            staged: staged.path,
        },
        Err(e) => failed(path, e.to_string()),
    }
}

/// Apply `editor` to every file in order
pub fn run_batch<G, E, P>(gateway: &G, editor: &E, paths: &[P]) -> EditReport
where
    G: MetadataGateway + ?Sized,
    E: MetadataEditor + ?Sized,
    P: AsRef<Path>,
{
    let start = Instant::now();
    let outcomes = paths
        .iter()
        .map(|path| edit_file(gateway, editor, path.as_ref()))
        .collect();

    EditReport {
        outcomes,
        duration_ms: start.elapsed().as_millis() as u64,
    }
}

fn failed(path: &Path, reason: String) -> EditOutcome {
    tracing::error!("{}", reason);
    EditOutcome::Failed {
        path: path.to_path_buf(),
        reason,
    }
}
