//! The sort run: resolve, name, detect duplicates, transfer.

use super::executor::TransferExecutor;
use super::namer::DestinationNamer;
use super::types::*;
use crate::core::gateway::MetadataGateway;
use crate::core::hasher::{ContentFingerprinter, Fingerprint};
use crate::core::scanner::{require_directory, WalkDirScanner};
use crate::core::timestamp::{MediaKind, ResolvedTimestamp, SkipReason, TimestampResolver};
use crate::error::{GatewayError, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// State of one candidate destination name
#[derive(Debug, Clone, PartialEq, Eq)]
enum Candidate {
    NotExists,
    ExistsDifferentContent,
    ExistsSameContent,
    /// The candidate is the source file itself (destination nested in source)
    IsSource,
}

/// Destinations claimed during a dry run, mapped to the source standing in
/// for the file that would be there
pub type Planned = HashMap<PathBuf, PathBuf>;

/// Sorts media files into `root/YYYY/MM`
pub struct Sorter<'a, G: MetadataGateway + ?Sized> {
    gateway: &'a G,
    fingerprinter: ContentFingerprinter<&'a G>,
    resolver: TimestampResolver,
    namer: DestinationNamer,
    config: SortConfig,
}

impl<'a, G: MetadataGateway + ?Sized> Sorter<'a, G> {
    pub fn new(gateway: &'a G, destination: impl Into<PathBuf>, config: SortConfig) -> Self {
        Self {
            gateway,
            fingerprinter: ContentFingerprinter::new(gateway, config.fingerprint),
            resolver: TimestampResolver::new(config.date_tags.clone()),
            namer: DestinationNamer::new(destination),
            config,
        }
    }

    /// Replace the timestamp resolver (e.g. to pin the accepted years)
    pub fn with_resolver(mut self, resolver: TimestampResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Sort every file under `source`.
    ///
    /// Per-file problems are logged and reported as outcomes. A fingerprint
    /// failure aborts the run: without it duplicates cannot be told apart.
    pub fn run(&self, source: &Path) -> Result<SortReport> {
        let start = Instant::now();

        require_directory("destination", self.namer.root())?;

        let listing = WalkDirScanner::new(self.config.scan.clone()).scan(source)?;
        if self.config.dry_run {
            tracing::info!("DRY RUN - no files will be copied, moved or deleted");
        }

        let mut planned = Planned::new();
        let mut outcomes = Vec::with_capacity(listing.files.len());
        for path in &listing.files {
            outcomes.push(self.sort_file(path, &mut planned)?);
        }

        Ok(SortReport {
            outcomes,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Decide and act on a single file.
    ///
    /// A dry run makes the same naming and duplicate decisions as a real
    /// run, but it never creates the `YYYY/MM` directory. A file whose
    /// directory cannot be created is `Failed` in a real run and still
    /// reported as `Transferred` in a dry run.
    pub fn sort_file(&self, path: &Path, planned: &mut Planned) -> Result<FileOutcome> {
        let Some(kind) = MediaKind::from_path(path) else {
            return Ok(skip(path, SkipReason::UnknownType));
        };

        let record = match self.gateway.read(path) {
            Ok(record) => record,
            Err(e) => return Ok(skip(path, SkipReason::MetadataUnavailable(read_reason(e)))),
        };

        let ts = match self.resolver.resolve(&record) {
            Ok(ts) => ts,
            Err(reason) => return Ok(skip(path, reason)),
        };

        if !self.config.dry_run {
            if let Err(e) = self.namer.ensure_directory(&ts) {
                return Ok(failed(path, e.to_string()));
            }
        }

        let Some((destination, state)) = self.find_destination(path, &ts, kind, planned)? else {
            return Ok(skip(path, SkipReason::NoFreeName));
        };

        match state {
            Candidate::ExistsSameContent => return Ok(self.handle_duplicate(path, destination)),
            Candidate::IsSource => return Ok(skip(path, SkipReason::AlreadySorted)),
            Candidate::NotExists | Candidate::ExistsDifferentContent => {}
        }

        tracing::info!("{} -> {}", path.display(), destination.display());
        if self.config.dry_run {
            planned.insert(destination.clone(), path.to_path_buf());
        } else if let Err(e) =
            TransferExecutor::transfer(path, &destination, self.config.operation)
        {
            return Ok(failed(path, e.to_string()));
        }

        Ok(FileOutcome::Transferred {
            source: path.to_path_buf(),
            destination,
        })
    }

    /// Walk candidate names until one is free or holds the same content
    fn find_destination(
        &self,
        path: &Path,
        ts: &ResolvedTimestamp,
        kind: MediaKind,
        planned: &Planned,
    ) -> Result<Option<(PathBuf, Candidate)>> {
        let mut source_fingerprint: Option<Fingerprint> = None;

        for candidate in self.namer.candidates(ts, kind.extension()) {
            match self.classify(path, &candidate, planned, &mut source_fingerprint)? {
                Candidate::ExistsDifferentContent => {
                    tracing::debug!(
                        "{} taken by different content, trying next name",
                        candidate.display()
                    );
                }
                state => return Ok(Some((candidate, state))),
            }
        }

        Ok(None)
    }

    /// Classify one candidate. The source is fingerprinted at most once,
    /// and only when the name is already taken.
    fn classify(
        &self,
        path: &Path,
        candidate: &Path,
        planned: &Planned,
        source_fingerprint: &mut Option<Fingerprint>,
    ) -> Result<Candidate> {
        let occupant = match planned.get(candidate) {
            Some(stand_in) => stand_in.as_path(),
            None if candidate.exists() => candidate,
            None => return Ok(Candidate::NotExists),
        };

        // never fingerprint a file against itself: in move mode the
        // "duplicate" would be deleted
        if is_same_file(path, occupant) {
            return Ok(Candidate::IsSource);
        }

        let source_fp = match *source_fingerprint {
            Some(fp) => fp,
            None => *source_fingerprint.insert(self.fingerprinter.fingerprint(path)?),
        };

        if source_fp == self.fingerprinter.fingerprint(occupant)? {
            Ok(Candidate::ExistsSameContent)
        } else {
            Ok(Candidate::ExistsDifferentContent)
        }
    }

    fn handle_duplicate(&self, path: &Path, existing: PathBuf) -> FileOutcome {
        tracing::info!("SKIP: duplicate {} {}", path.display(), existing.display());

        let mut source_removed = false;
        if self.config.operation == OperationMode::Move && !self.config.dry_run {
            match TransferExecutor::remove(path) {
                Ok(()) => source_removed = true,
                Err(e) => tracing::error!("{}", e),
            }
        }

        FileOutcome::Duplicate {
            source: path.to_path_buf(),
            existing,
            source_removed,
        }
    }
}

fn skip(path: &Path, reason: SkipReason) -> FileOutcome {
    tracing::info!("SKIP: {} {}", reason, path.display());
    FileOutcome::Skipped {
        path: path.to_path_buf(),
        reason,
    }
}

fn failed(path: &Path, reason: String) -> FileOutcome {
    tracing::error!("{}", reason);
    FileOutcome::Failed {
        path: path.to_path_buf(),
        reason,
    }
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn read_reason(error: GatewayError) -> String {
    match error {
        GatewayError::Read { reason, .. } => reason,
        other => other.to_string(),
    }
}
