//! Filesystem side of a sort decision: copy, move or delete.

use super::types::OperationMode;
use crate::error::TransferError;
use std::fs;
use std::path::Path;

/// Executes transfer decisions
pub struct TransferExecutor;

impl TransferExecutor {
    /// Copy or move `source` to `dest`. The parent of `dest` must exist.
    pub fn transfer(
        source: &Path,
        dest: &Path,
        operation: OperationMode,
    ) -> Result<(), TransferError> {
        let copy_error = |source_err: std::io::Error| TransferError::Copy {
            from: source.to_path_buf(),
            to: dest.to_path_buf(),
            source: source_err,
        };

        match operation {
            OperationMode::Copy => fs::copy(source, dest).map(|_| ()).map_err(copy_error),
            OperationMode::Move => {
                if fs::rename(source, dest).is_ok() {
                    return Ok(());
                }

                // rename fails across filesystems, fall back to copy+delete
                // with size verification before deleting source
                let source_size = fs::metadata(source).map_err(copy_error)?.len();
                fs::copy(source, dest).map_err(copy_error)?;

                let dest_size = fs::metadata(dest).map_err(copy_error)?.len();
                if dest_size != source_size {
                    // Copy was incomplete, don't delete source
                    let _ = fs::remove_file(dest);
                    return Err(TransferError::SizeMismatch {
                        path: dest.to_path_buf(),
                        expected: source_size,
                        actual: dest_size,
                    });
                }

                Self::remove(source)
            }
        }
    }

    /// Delete a source file that is already sorted
    pub fn remove(path: &Path) -> Result<(), TransferError> {
        fs::remove_file(path).map_err(|source| TransferError::Remove {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_execute_copy() {
        let temp_src = TempDir::new().unwrap();
        let temp_dest = TempDir::new().unwrap();
        let src_file = create_file(&temp_src, "test.jpg", b"test content");
        let dest = temp_dest.path().join("20240115_120000.jpg");

        TransferExecutor::transfer(&src_file, &dest, OperationMode::Copy).unwrap();

        assert!(src_file.exists()); // Original still exists
        assert_eq!(fs::read(&dest).unwrap(), b"test content");
    }

    #[test]
    fn test_execute_move() {
        let temp_src = TempDir::new().unwrap();
        let temp_dest = TempDir::new().unwrap();
        let src_file = create_file(&temp_src, "test.jpg", b"test content");
        let dest = temp_dest.path().join("20240115_120000.jpg");

        TransferExecutor::transfer(&src_file, &dest, OperationMode::Move).unwrap();

        assert!(!src_file.exists()); // Original moved
        assert_eq!(fs::read(&dest).unwrap(), b"test content");
    }

    #[test]
    fn test_execute_missing_source() {
        let temp_dest = TempDir::new().unwrap();
        let dest = temp_dest.path().join("file.jpg");

        let result = TransferExecutor::transfer(
            Path::new("/nonexistent/file.jpg"),
            &dest,
            OperationMode::Copy,
        );

        assert!(matches!(result, Err(TransferError::Copy { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_remove() {
        let temp = TempDir::new().unwrap();
        let path = create_file(&temp, "dup.jpg", b"x");

        TransferExecutor::remove(&path).unwrap();
        assert!(!path.exists());
        assert!(TransferExecutor::remove(&path).is_err());
    }
}
