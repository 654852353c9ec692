//! The `exifdate` and `exiffix` commands.

use super::{finish, print_banner, print_count, ToolArgs};
use crate::core::editor::{
    run_batch, AddMissingDates, EditReport, FixBrokenFields, MetadataEditor, DEFAULT_TIMESTAMP,
};
use crate::error::Result;
use clap::Parser;
use console::{style, Term};
use std::path::PathBuf;
use std::process::ExitCode;

/// Set a fixed capture date on files that have no date tags at all
#[derive(Parser, Debug)]
#[command(name = "exifdate")]
#[command(author, version, about, long_about = None)]
pub struct AddDatesArgs {
    /// Files to update
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Date written to DateTimeOriginal, CreateDate and ModifyDate
    #[arg(long, value_name = "TS", default_value = DEFAULT_TIMESTAMP)]
    pub timestamp: String,

    /// Debug output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// Remove broken tags and restore capture dates from ModifyDate
#[derive(Parser, Debug)]
#[command(name = "exiffix")]
#[command(author, version, about, long_about = None)]
pub struct FixFieldsArgs {
    /// Files to repair
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Debug output
    #[arg(short, long)]
    pub verbose: bool,

    #[command(flatten)]
    pub tool: ToolArgs,
}

/// Run the exifdate binary
pub fn run_add_dates() -> ExitCode {
    let args = AddDatesArgs::parse();
    crate::init_tracing(args.verbose);
    finish(
        AddMissingDates::new(args.timestamp.as_str())
            .and_then(|editor| execute(&editor, &args.files, &args.tool)),
    )
}

/// Run the exiffix binary
pub fn run_fix_fields() -> ExitCode {
    let args = FixFieldsArgs::parse();
    crate::init_tracing(args.verbose);
    finish(execute(&FixBrokenFields::new(), &args.files, &args.tool))
}

/// Apply `editor` to every file. Per-file problems end up in the report.
pub fn execute<E: MetadataEditor>(
    editor: &E,
    files: &[PathBuf],
    tool: &ToolArgs,
) -> Result<EditReport> {
    let tool = tool.connect()?;

    let term = Term::stderr();
    print_banner(&term, "Photo Sorter metadata editor");

    let report = run_batch(&tool, editor, files);

    term.write_line("").ok();
    print_count(&term, report.written(), "updated");
    print_count(&term, report.skipped(), "skipped");
    if report.failed() > 0 {
        term.write_line(&format!(
            "  {} failed",
            style(report.failed()).red().bold()
        ))
        .ok();
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exifdate_defaults_the_timestamp() {
        let args = AddDatesArgs::try_parse_from(["exifdate", "a.jpg", "b.jpg"]).unwrap();
        assert_eq!(args.files.len(), 2);
        assert_eq!(args.timestamp, DEFAULT_TIMESTAMP);
    }

    #[test]
    fn exifdate_accepts_a_custom_timestamp() {
        let args = AddDatesArgs::try_parse_from([
            "exifdate",
            "--timestamp",
            "2005:06:01 12:00:00",
            "a.jpg",
        ])
        .unwrap();
        assert!(AddMissingDates::new(args.timestamp).is_ok());
    }

    #[test]
    fn editors_need_at_least_one_file() {
        assert!(AddDatesArgs::try_parse_from(["exifdate"]).is_err());
        assert!(FixFieldsArgs::try_parse_from(["exiffix"]).is_err());
    }

    #[test]
    fn missing_tool_is_reported() {
        let args = FixFieldsArgs::try_parse_from([
            "exiffix",
            "--exiftool",
            "/nonexistent/exiftool",
            "a.jpg",
        ])
        .unwrap();

        let error = execute(&FixBrokenFields::new(), &args.files, &args.tool).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/exiftool"));
    }
}
