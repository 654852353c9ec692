//! Give undated files a fixed capture date.

use super::{EditDecision, MetadataEditor};
use crate::core::gateway::WriteMode;
use crate::core::metadata::{display_value, MetadataRecord};
use crate::core::timestamp::parse_exif_datetime;
use crate::error::SorterError;

/// Date written when the operator does not pass one
pub const DEFAULT_TIMESTAMP: &str = "2017:09:10 16:48:46";

/// Any tag with one of these names means the file already has a date
const GUARD_NAMES: [&str; 3] = ["DateTimeOriginal", "CreateDate", "ModifyDate"];

const TARGET_TAGS: [&str; 3] = ["EXIF:DateTimeOriginal", "EXIF:CreateDate", "EXIF:ModifyDate"];

/// Sets the three EXIF date tags on files that have none of them
#[derive(Debug, Clone)]
pub struct AddMissingDates {
    timestamp: String,
}

impl Default for AddMissingDates {
    fn default() -> Self {
        Self {
            timestamp: DEFAULT_TIMESTAMP.to_string(),
        }
    }
}

impl AddMissingDates {
    /// Use `timestamp` instead of the default; it must be `YYYY:MM:DD HH:MM:SS`
    pub fn new(timestamp: impl Into<String>) -> Result<Self, SorterError> {
        let timestamp = timestamp.into();
        if parse_exif_datetime(&timestamp).is_none() {
            return Err(SorterError::Config(format!(
                "timestamp '{timestamp}' is not in YYYY:MM:DD HH:MM:SS format"
            )));
        }
        Ok(Self { timestamp })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl MetadataEditor for AddMissingDates {
    fn name(&self) -> &'static str {
        "Adding dates"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::Merge
    }

    fn edit(&self, mut record: MetadataRecord) -> EditDecision {
        for name in GUARD_NAMES {
            if let Some((tag, value)) = record.find_by_name(name) {
                return EditDecision::Keep {
                    reason: format!("{}: {}", tag, display_value(value)),
                };
            }
        }

        for tag in TARGET_TAGS {
            record.set(tag, self.timestamp.as_str());
        }
        EditDecision::Rewrite(record)
    }
}
