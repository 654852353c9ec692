//! The `sorter` command.

use super::{finish, print_banner, print_count, ToolArgs};
use crate::core::hasher::FingerprintStrategy;
use crate::core::organize::{OperationMode, SortConfig, SortReport, Sorter};
use crate::core::scanner::{require_directory, ScanConfig};
use crate::core::timestamp::MODIFY_DATE_TAG;
use crate::error::Result;
use clap::Parser;
use console::{style, Term};
use std::path::PathBuf;
use std::process::ExitCode;

/// Sort photos and videos into DESTDIR/YYYY/MM by capture date
#[derive(Parser, Debug)]
#[command(name = "sorter")]
#[command(author, version, about, long_about = None)]
pub struct SortArgs {
    /// Directory with the files to sort
    #[arg(value_name = "SRCDIR")]
    pub source: PathBuf,

    /// Root of the dated tree
    #[arg(value_name = "DESTDIR")]
    pub destination: PathBuf,

    /// Move instead of copy; sources already in the tree are deleted
    #[arg(long = "move")]
    pub move_files: bool,

    /// Print decisions without copying, moving, deleting or creating anything
    #[arg(long = "dryrun")]
    pub dry_run: bool,

    /// Debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Fall back to EXIF:ModifyDate when no capture date is present
    #[arg(long)]
    pub modify_date_fallback: bool,

    /// Compare whole files instead of metadata-stripped content
    #[arg(long)]
    pub raw_hash: bool,

    /// Follow symbolic links while walking SRCDIR
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Do not descend more than N levels below SRCDIR
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    #[command(flatten)]
    pub tool: ToolArgs,
}

impl SortArgs {
    pub fn config(&self) -> SortConfig {
        let mut config = SortConfig {
            operation: if self.move_files {
                OperationMode::Move
            } else {
                OperationMode::Copy
            },
            dry_run: self.dry_run,
            scan: ScanConfig {
                follow_symlinks: self.follow_symlinks,
                max_depth: self.max_depth,
            },
            ..SortConfig::default()
        };

        if self.modify_date_fallback {
            config.date_tags.push(MODIFY_DATE_TAG.to_string());
        }
        if self.raw_hash {
            config.fingerprint = FingerprintStrategy::Raw;
        }
        config
    }
}

/// Run the sorter binary
pub fn run() -> ExitCode {
    let args = SortArgs::parse();
    crate::init_tracing(args.verbose);
    finish(execute(&args))
}

pub fn execute(args: &SortArgs) -> Result<SortReport> {
    require_directory("source", &args.source)?;
    require_directory("destination", &args.destination)?;

    let config = args.config();
    tracing::debug!("Effective configuration: {:?}", config);
    let tool = args.tool.connect()?;

    let term = Term::stderr();
    print_banner(&term, "Photo Sorter");

    let report = Sorter::new(&tool, &args.destination, config).run(&args.source)?;
    print_summary(&term, &report, args);
    Ok(report)
}

fn print_summary(term: &Term, report: &SortReport, args: &SortArgs) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Sort complete in {:.1}s",
        style("✓").green().bold(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    let verb = if args.move_files { "moved" } else { "copied" };
    print_count(term, report.transferred(), verb);
    print_count(term, report.duplicates(), "duplicates");
    print_count(term, report.skipped(), "skipped");
    if report.failed() > 0 {
        term.write_line(&format!(
            "  {} failed",
            style(report.failed()).red().bold()
        ))
        .ok();
    }

    if args.dry_run {
        term.write_line("").ok();
        term.write_line(&format!(
            "{}",
            style("Dry run: no files were copied, moved or deleted.").dim()
        ))
        .ok();
    }
}
