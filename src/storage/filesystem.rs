//! File system operations
//!
//! Preparation of the storage root at startup.

use log::info;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

fn root_error(path: &Path, reason: impl ToString) -> StorageError {
    StorageError::Root {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Make sure the storage root exists, is a readable directory, and return
/// its canonical absolute form.
pub fn prepare_root(path: &Path) -> Result<PathBuf, StorageError> {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.is_dir() => {
            info!("Store directory exists: {}", path.display());
        }
        Ok(_) => return Err(root_error(path, "exists but is not a directory")),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            std::fs::create_dir_all(path).map_err(|e| root_error(path, e))?;
            info!("Created store directory: {}", path.display());
        }
        Err(e) => return Err(root_error(path, e)),
    }

    let entries = std::fs::read_dir(path).map_err(|e| root_error(path, e))?;
    info!(
        "Store directory is accessible, contains {} items",
        entries.count()
    );

    path.canonicalize().map_err(|e| root_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_missing_root_with_ancestors() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("a").join("b").join("store");

        let prepared = prepare_root(&root).unwrap();

        assert!(prepared.is_absolute());
        assert!(prepared.is_dir());
    }

    #[test]
    fn accepts_existing_root() {
        let dir = tempdir().unwrap();
        let prepared = prepare_root(dir.path()).unwrap();
        assert_eq!(prepared, dir.path().canonicalize().unwrap());
    }

    #[test]
    fn rejects_root_that_is_a_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("store");
        std::fs::write(&file, b"not a directory").unwrap();

        assert!(matches!(
            prepare_root(&file),
            Err(StorageError::Root { .. })
        ));
    }
}
