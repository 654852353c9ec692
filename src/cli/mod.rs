//! # CLI Module
//!
//! Argument parsing and console output shared by the three binaries.
//!
//! ## Usage
//! ```bash
//! # Copy into a dated tree
//! sorter ~/inbox ~/Pictures/sorted
//!
//! # Move, and see what would happen first
//! sorter ~/inbox ~/Pictures/sorted --move --dryrun
//!
//! # Metadata fixes
//! exifdate scans/*.jpg --timestamp "2005:06:01 12:00:00"
//! exiffix broken/*.jpg
//! ```

pub mod edit;
pub mod sort;

use crate::core::gateway::{ExifTool, ExifToolConfig};
use crate::error::Result;
use clap::Args;
use console::{style, Term};
use std::path::PathBuf;
use std::process::ExitCode;

/// Where to find exiftool
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// exiftool program name or path
    #[arg(long = "exiftool", value_name = "PATH", default_value = "exiftool")]
    pub program: PathBuf,

    /// Directory searched for exiftool before PATH (repeatable)
    #[arg(long = "tool-dir", value_name = "DIR")]
    pub tool_dirs: Vec<PathBuf>,
}

impl ToolArgs {
    pub fn config(&self) -> ExifToolConfig {
        ExifToolConfig {
            program: self.program.clone(),
            search_paths: self.tool_dirs.clone(),
        }
    }

    /// Resolve exiftool and make sure it runs
    pub fn connect(&self) -> Result<ExifTool> {
        let tool = ExifTool::new(self.config());
        let version = tool.version()?;
        tracing::debug!("exiftool {} at {}", version, tool.program().display());
        Ok(tool)
    }
}

fn print_banner(term: &Term, title: &str) {
    term.write_line(&format!(
        "{} {}",
        style(title).bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn print_count(term: &Term, count: usize, label: &str) {
    term.write_line(&format!("  {} {}", style(count).cyan(), label))
        .ok();
}

/// Print a run error in red and map it to a failing exit code
fn finish<T>(result: Result<T>) -> ExitCode {
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            Term::stderr()
                .write_line(&format!("{} {}", style("error:").red().bold(), e))
                .ok();
            ExitCode::FAILURE
        }
    }
}
