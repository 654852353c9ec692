//! # Metadata Module
//!
//! The metadata record exchanged with the external tool.
//!
//! ## Tag Names
//! Tags are group-qualified the way `exiftool -G` prints them
//! (`EXIF:DateTimeOriginal`, `QuickTime:CreateDate`). Lookups can be exact
//! or by bare tag name across all groups.
//!
//! ## Staging
//! Edits reach the tool through a sibling `<stem>.json` file, see
//! [`StagedRecord`].

mod staging;

pub use staging::StagedRecord;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Tag that exiftool adds to every JSON object it emits
pub const SOURCE_FILE_TAG: &str = "SourceFile";

/// Ordered mapping of tag name to value for one file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataRecord {
    tags: BTreeMap<String, Value>,
}

impl MetadataRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from `(tag, string value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let tags = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect();
        Self { tags }
    }

    /// Get a tag by its exact (qualified) name
    pub fn get(&self, tag: &str) -> Option<&Value> {
        self.tags.get(tag)
    }

    /// Get a tag value as a string, if it is one
    pub fn get_str(&self, tag: &str) -> Option<&str> {
        self.tags.get(tag).and_then(Value::as_str)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.contains_key(tag)
    }

    /// Find the first tag whose bare name matches, in any group.
    ///
    /// `"ModifyDate"` matches `EXIF:ModifyDate`, `XMP:ModifyDate` and an
    /// ungrouped `ModifyDate`.
    pub fn find_by_name(&self, name: &str) -> Option<(&str, &Value)> {
        self.tags
            .iter()
            .find(|(tag, _)| bare_name(tag) == name)
            .map(|(tag, value)| (tag.as_str(), value))
    }

    /// Check whether a tag with this bare name exists in any group
    pub fn contains_name(&self, name: &str) -> bool {
        self.find_by_name(name).is_some()
    }

    /// Set a tag to a string value, replacing any existing value
    pub fn set(&mut self, tag: impl Into<String>, value: impl Into<String>) {
        self.tags.insert(tag.into(), Value::String(value.into()));
    }

    /// Set a tag to any JSON value
    pub fn insert(&mut self, tag: impl Into<String>, value: Value) {
        self.tags.insert(tag.into(), value);
    }

    pub fn remove(&mut self, tag: &str) -> Option<Value> {
        self.tags.remove(tag)
    }

    /// Remove every tag with this bare name whose value matches `predicate`.
    ///
    /// Returns the removed tag names.
    pub fn remove_by_name_if<F>(&mut self, name: &str, mut predicate: F) -> Vec<String>
    where
        F: FnMut(&Value) -> bool,
    {
        let doomed: Vec<String> = self
            .tags
            .iter()
            .filter(|(tag, value)| bare_name(tag) == name && predicate(value))
            .map(|(tag, _)| tag.clone())
            .collect();

        for tag in &doomed {
            self.tags.remove(tag);
        }
        doomed
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Iterate tags in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.tags.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for MetadataRecord {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            tags: iter.into_iter().collect(),
        }
    }
}

/// Strip the group prefix from a tag name (`EXIF:ISO` -> `ISO`)
pub fn bare_name(tag: &str) -> &str {
    tag.rsplit_once(':').map_or(tag, |(_, name)| name)
}

/// Render a value for log lines without JSON quoting
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
