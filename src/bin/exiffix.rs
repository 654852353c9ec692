//! # exiffix
//!
//! Rewrites metadata that exiftool flags as broken.

use std::process::ExitCode;

fn main() -> ExitCode {
    photo_sorter::cli::edit::run_fix_fields()
}
