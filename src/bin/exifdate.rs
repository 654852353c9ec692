//! # exifdate
//!
//! Adds a fixed capture date to files that carry no date at all.
//!
//! ```bash
//! exifdate scans/*.jpg --timestamp "2005:06:01 12:00:00"
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    photo_sorter::cli::edit::run_add_dates()
}
