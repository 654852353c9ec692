//! Gateway backed by the `exiftool` command line program.

use super::{MetadataGateway, WriteMode};
use crate::core::metadata::{display_value, MetadataRecord, StagedRecord};
use crate::error::GatewayError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Where to find the tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExifToolConfig {
    /// Program name or path
    pub program: PathBuf,
    /// Directories searched for `program` before the system PATH
    pub search_paths: Vec<PathBuf>,
}

impl Default for ExifToolConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("exiftool"),
            search_paths: Vec::new(),
        }
    }
}

impl ExifToolConfig {
    /// Resolve the program to run.
    ///
    /// An explicit path is used as-is. A bare name is looked up in
    /// `search_paths` first and otherwise left to the OS PATH lookup.
    pub fn resolve(&self) -> PathBuf {
        if self.program.components().count() > 1 {
            return self.program.clone();
        }

        self.search_paths
            .iter()
            .flat_map(|dir| candidates(dir, &self.program))
            .find(|candidate| candidate.is_file())
            .unwrap_or_else(|| self.program.clone())
    }
}

fn candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let mut found = vec![dir.join(program)];
    if cfg!(windows) && program.extension().is_none() {
        found.push(dir.join(program).with_extension("exe"));
    }
    found
}

/// ExifTool-backed metadata gateway
pub struct ExifTool {
    program: PathBuf,
}

impl ExifTool {
    pub fn new(config: ExifToolConfig) -> Self {
        let program = config.resolve();
        tracing::debug!("Using exiftool at {}", program.display());
        Self { program }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run `exiftool -ver`, mapping a missing binary to a friendly error
    pub fn version(&self) -> Result<String, GatewayError> {
        let output = Command::new(&self.program)
            .arg("-ver")
            .output()
            .map_err(|source| self.spawn_error(source))?;

        if !output.status.success() {
            return Err(GatewayError::ToolNotFound {
                program: self.program.clone(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    fn run(&self, args: &[OsString]) -> Result<Output, GatewayError> {
        tracing::trace!("{} {:?}", self.program.display(), args);
        Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| self.spawn_error(source))
    }

    fn spawn_error(&self, source: std::io::Error) -> GatewayError {
        if source.kind() == std::io::ErrorKind::NotFound {
            GatewayError::ToolNotFound {
                program: self.program.clone(),
            }
        } else {
            GatewayError::Spawn {
                program: self.program.clone(),
                source,
            }
        }
    }
}

fn failure_reason(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("exiftool exited with {}", output.status)
    } else {
        stderr
    }
}

/// Parse `exiftool -j` output, which is an array with one object per file
pub(crate) fn parse_json_output(path: &Path, stdout: &[u8]) -> Result<MetadataRecord, GatewayError> {
    let records: Vec<MetadataRecord> =
        serde_json::from_slice(stdout).map_err(|e| GatewayError::Read {
            path: path.to_path_buf(),
            reason: format!("JSON parse error: {e}"),
        })?;

    records
        .into_iter()
        .next()
        .filter(|record| !record.is_empty())
        .ok_or_else(|| GatewayError::Read {
            path: path.to_path_buf(),
            reason: "No metadata found".to_string(),
        })
}

/// Tag exiftool uses to report a file it could not process
const ERROR_TAG: &str = "ExifTool:Error";

/// Interpret the reply to a `-j -G` read.
///
/// exiftool still prints a JSON object for a file it cannot read, holding
/// only `SourceFile` and `ExifTool:Error`, and exits non-zero. Both count as
/// a read failure.
pub(crate) fn parse_read_reply(
    path: &Path,
    success: bool,
    stdout: &[u8],
    stderr: &[u8],
) -> Result<MetadataRecord, GatewayError> {
    let read_error = |reason: String| GatewayError::Read {
        path: path.to_path_buf(),
        reason,
    };

    let parsed = (!stdout.is_empty()).then(|| parse_json_output(path, stdout));
    match parsed {
        Some(Ok(record)) => {
            if let Some(error) = record.get(ERROR_TAG) {
                return Err(read_error(display_value(error)));
            }
            if success {
                Ok(record)
            } else {
                Err(read_error(stderr_reason(stderr)))
            }
        }
        Some(Err(e)) if success => Err(e),
        _ => Err(read_error(stderr_reason(stderr))),
    }
}

fn stderr_reason(stderr: &[u8]) -> String {
    let stderr = String::from_utf8_lossy(stderr).trim().to_string();
    if stderr.is_empty() {
        "exiftool reported a failure".to_string()
    } else {
        stderr
    }
}

/// Arguments for applying a staged record
pub(crate) fn write_args(path: &Path, staged: &Path, mode: WriteMode) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();
    match mode {
        WriteMode::Merge => {
            let mut arg = OsString::from("-json+=");
            arg.push(staged);
            args.push(arg);
        }
        WriteMode::ReplaceAll => {
            args.push("-all=".into());
            let mut arg = OsString::from("-json=");
            arg.push(staged);
            args.push(arg);
        }
    }
    args.push("-overwrite_original".into());
    args.push(path.into());
    args
}

impl MetadataGateway for ExifTool {
    fn read(&self, path: &Path) -> Result<MetadataRecord, GatewayError> {
        let output = self.run(&["-j".into(), "-G".into(), path.into()])?;
        parse_read_reply(
            path,
            output.status.success(),
            &output.stdout,
            &output.stderr,
        )
    }

    fn write(
        &self,
        path: &Path,
        staged: &StagedRecord,
        mode: WriteMode,
    ) -> Result<(), GatewayError> {
        let output = self.run(&write_args(path, &staged.path, mode))?;
        if !output.status.success() {
            return Err(GatewayError::Write {
                path: path.to_path_buf(),
                reason: failure_reason(&output),
            });
        }
        Ok(())
    }

    fn strip(&self, path: &Path) -> Result<Vec<u8>, GatewayError> {
        let output = self.run(&[
            "-all=".into(),
            "-o".into(),
            "-".into(),
            "-b".into(),
            path.into(),
        ])?;
        if !output.status.success() {
            return Err(GatewayError::Strip {
                path: path.to_path_buf(),
                reason: failure_reason(&output),
            });
        }
        Ok(output.stdout)
    }
}
