//! Repair records that trip up the tool on rewrite.

use super::{EditDecision, MetadataEditor};
use crate::core::gateway::WriteMode;
use crate::core::metadata::MetadataRecord;

const ORIGINAL_DATE_TAG: &str = "EXIF:DateTimeOriginal";
const WARNING_TAG: &str = "ExifTool:Warning";

/// Bare names of tags that get a copy of `ModifyDate` when missing,
/// with the tag written in that case
const BACKFILL: [(&str, &str); 2] = [
    ("DateTimeOriginal", "EXIF:DateTimeOriginal"),
    ("CreateDate", "EXIF:CreateDate"),
];

/// Drops broken tags and backfills capture dates from `ModifyDate`.
///
/// Files that already carry `EXIF:DateTimeOriginal` are left alone. The
/// cleaned record replaces all existing metadata.
#[derive(Debug, Clone, Default)]
pub struct FixBrokenFields;

impl FixBrokenFields {
    pub fn new() -> Self {
        Self
    }
}

impl MetadataEditor for FixBrokenFields {
    fn name(&self) -> &'static str {
        "Fixing"
    }

    fn write_mode(&self) -> WriteMode {
        WriteMode::ReplaceAll
    }

    fn edit(&self, mut record: MetadataRecord) -> EditDecision {
        if record.contains(ORIGINAL_DATE_TAG) {
            return EditDecision::Keep {
                reason: format!("{ORIGINAL_DATE_TAG} present"),
            };
        }

        let missing: Vec<&str> = BACKFILL
            .iter()
            .filter(|(name, _)| !record.contains_name(name))
            .map(|(_, tag)| *tag)
            .collect();

        let modify_date = record.find_by_name("ModifyDate").map(|(_, v)| v.clone());
        if !missing.is_empty() && modify_date.is_none() {
            return EditDecision::Keep {
                reason: "ModifyDate missing".to_string(),
            };
        }

        record.remove(WARNING_TAG);
        record.remove_by_name_if("ISO", |v| v.as_str() == Some(""));
        record.remove_by_name_if("UserComment", |_| true);
        record.remove_by_name_if("Comment", |_| true);

        if let Some(value) = modify_date {
            for tag in missing {
                record.insert(tag, value.clone());
            }
        }
        EditDecision::Rewrite(record)
    }
}
