//! # Timestamp Module
//!
//! Picks the capture date of a media file from its metadata.
//!
//! ## Rules
//! - Only `jpg`, `mp4`, `3gp` and `mov` files are considered (any case)
//! - Tag priority is configurable; the first tag present wins
//! - Values must use the EXIF layout `YYYY:MM:DD HH:MM:SS`
//! - Years before 1990 or after the current year are rejected

use crate::core::metadata::{display_value, MetadataRecord};
use chrono::{Datelike, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// EXIF date-time layout
pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Layout of the timestamp part of destination file names
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Earliest accepted capture year
pub const MIN_YEAR: i32 = 1990;

/// Default tag priority
pub const DEFAULT_DATE_TAGS: &[&str] = &["EXIF:DateTimeOriginal", "QuickTime:CreateDate"];

/// Optional last-resort tag
pub const MODIFY_DATE_TAG: &str = "EXIF:ModifyDate";

/// Media types the sorter handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Jpeg,
    Mp4,
    ThreeGp,
    QuickTime,
}

impl MediaKind {
    /// Detect kind from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" => Some(MediaKind::Jpeg),
            "mp4" => Some(MediaKind::Mp4),
            "3gp" => Some(MediaKind::ThreeGp),
            "mov" => Some(MediaKind::QuickTime),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Extension used for destination names
    pub fn extension(&self) -> &'static str {
        match self {
            MediaKind::Jpeg => "jpg",
            MediaKind::Mp4 => "mp4",
            MediaKind::ThreeGp => "3gp",
            MediaKind::QuickTime => "mov",
        }
    }
}

/// Why a file was left alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Extension is not one of the sorted media types
    UnknownType,
    /// The metadata tool could not read the file
    MetadataUnavailable(String),
    /// None of the date tags is present
    DateMissing,
    /// A date tag is present but not in EXIF layout
    TimestampError(String),
    /// The date parsed but its year is out of range
    WrongDate(String),
    /// Every candidate name is taken by different content
    NoFreeName,
    /// The file already sits at its own destination name
    AlreadySorted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UnknownType => write!(f, "unknown type"),
            SkipReason::MetadataUnavailable(reason) => write!(f, "metadata error ({reason})"),
            SkipReason::DateMissing => write!(f, "date missing"),
            SkipReason::TimestampError(raw) => write!(f, "timestamp error ({raw})"),
            SkipReason::WrongDate(stamp) => write!(f, "wrong date ({stamp})"),
            SkipReason::NoFreeName => write!(f, "no free destination name"),
            SkipReason::AlreadySorted => write!(f, "already sorted"),
        }
    }
}

/// A capture time taken from one metadata tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ResolvedTimestamp(NaiveDateTime);

impl ResolvedTimestamp {
    pub fn new(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn datetime(&self) -> NaiveDateTime {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// `YYYYMMDD_HHMMSS`
    pub fn stamp(&self) -> String {
        self.0.format(STAMP_FORMAT).to_string()
    }
}

/// Chooses and validates the capture timestamp of a record
#[derive(Debug, Clone)]
pub struct TimestampResolver {
    tags: Vec<String>,
    min_year: i32,
    max_year: i32,
}

impl Default for TimestampResolver {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_TAGS.iter().map(|t| t.to_string()).collect())
    }
}

impl TimestampResolver {
    /// Resolver accepting years from 1990 up to the current local year
    pub fn new(tags: Vec<String>) -> Self {
        Self {
            tags,
            min_year: MIN_YEAR,
            max_year: Local::now().year(),
        }
    }

    /// Override the accepted year range (inclusive)
    pub fn with_year_range(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = min_year;
        self.max_year = max_year;
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn resolve(&self, record: &MetadataRecord) -> Result<ResolvedTimestamp, SkipReason> {
        let value = self
            .tags
            .iter()
            .find_map(|tag| record.get(tag))
            .ok_or(SkipReason::DateMissing)?;

        let raw = display_value(value);
        let datetime = NaiveDateTime::parse_from_str(&raw, EXIF_DATETIME_FORMAT)
            .map_err(|_| SkipReason::TimestampError(raw.clone()))?;

        let resolved = ResolvedTimestamp(datetime);
        if resolved.year() < self.min_year || resolved.year() > self.max_year {
            return Err(SkipReason::WrongDate(resolved.stamp()));
        }
        Ok(resolved)
    }
}

/// Check an operator-supplied timestamp literal
pub fn parse_exif_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, EXIF_DATETIME_FORMAT).ok()
}
