//! Directory walking implementation using walkdir.

use super::{require_directory, ScanResult};
use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
}

impl WalkDirScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Recursively list the files under `root`
    pub fn scan(&self, root: &Path) -> Result<ScanResult, ScanError> {
        require_directory("source", root)?;

        let mut walker = WalkDir::new(root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name();

        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        let mut result = ScanResult::default();
        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    if entry.file_type().is_file() {
                        result.files.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    let source = e
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("filesystem loop"));

                    tracing::warn!("Failed to read {}: {}", path.display(), source);
                    result.errors.push(ScanError::ReadDirectory { path, source });
                }
            }
        }

        tracing::debug!(
            "Found {} files under {}",
            result.files.len(),
            root.display()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let scanner = WalkDirScanner::new(ScanConfig::default());

        let result = scanner.scan(temp_dir.path()).unwrap();

        assert!(result.files.is_empty());
        assert!(result.errors.is_empty());
    }

    #[test]
    fn scan_lists_every_file_type() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "photo.jpg");
        touch(temp_dir.path(), "notes.txt");
        touch(temp_dir.path(), ".hidden.mov");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 3);
    }

    #[test]
    fn scan_traverses_nested_directories_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("b_subdir");
        fs::create_dir(&subdir).unwrap();

        let root_file = touch(temp_dir.path(), "a_root.jpg");
        let nested = touch(&subdir, "nested.jpg");
        let last = touch(temp_dir.path(), "c_last.jpg");

        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files, vec![root_file, nested, last]);
    }

    #[test]
    fn max_depth_limits_recursion() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("deep");
        fs::create_dir(&subdir).unwrap();
        touch(temp_dir.path(), "top.jpg");
        touch(&subdir, "deep.jpg");

        let scanner = WalkDirScanner::new(ScanConfig {
            max_depth: Some(1),
            ..Default::default()
        });
        let result = scanner.scan(temp_dir.path()).unwrap();

        assert_eq!(result.files.len(), 1);
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let scanner = WalkDirScanner::new(ScanConfig::default());
        let result = scanner.scan(Path::new("/nonexistent/path/12345"));

        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }
}
