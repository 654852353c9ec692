//! # sorter
//!
//! Sorts photos and videos into a dated folder tree.
//!
//! ## Usage
//! ```bash
//! sorter ~/inbox ~/Pictures/sorted
//! sorter ~/inbox ~/Pictures/sorted --move --dryrun --verbose
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    photo_sorter::cli::sort::run()
}
