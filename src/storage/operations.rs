//! Storage operations
//!
//! Upload, download, list and create-folder against a single storage root.
//! Every operation validates its input through the path resolver before it
//! touches the filesystem.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use futures_util::Stream;
use log::{info, warn};
use std::fmt::Display;
use std::fs::Metadata;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File};

use crate::error::{PathError, StorageError};
use crate::storage::filesystem::prepare_root;
use crate::storage::results::{CreateFolderResult, DownloadResult, FileEntry, UploadResult};
use crate::storage::validation::{
    clean_relative, download_name, join_relative, resolve, validate_segment,
};
use crate::transfer::copy_body_to_file;

/// Handle on the storage root, shared by every request handler.
#[derive(Debug, Clone)]
pub struct Storage {
    root: Arc<PathBuf>,
    buffer_size: usize,
}

impl Storage {
    /// Prepare `root` and return a handle bound to its canonical path.
    pub fn open(root: impl AsRef<Path>, buffer_size: usize) -> Result<Self, StorageError> {
        let root = prepare_root(root.as_ref())?;
        Ok(Self {
            root: Arc::new(root),
            buffer_size,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    /// Streams `body` into `filename` inside the directory `dir`.
    ///
    /// Missing directories are created. An existing file is truncated and
    /// replaced.
    pub async fn upload<S, E>(
        &self,
        dir: &str,
        filename: &str,
        body: S,
    ) -> Result<UploadResult, StorageError>
    where
        S: Stream<Item = Result<Bytes, E>>,
        E: Display,
    {
        let file_name = validate_segment("filename", filename)?;
        let relative_dir = clean_relative(dir)?;
        let target_dir = resolve(&self.root, &relative_dir)?;

        fs::create_dir_all(&target_dir)
            .await
            .map_err(|source| StorageError::CreateDirectory {
                path: relative_dir.clone(),
                source,
            })?;

        let relative_path = join_relative(&relative_dir, &file_name);
        let file_path = target_dir.join(&file_name);

        let file = File::create(&file_path)
            .await
            .map_err(|source| StorageError::CreateFile {
                path: relative_path.clone(),
                source,
            })?;

        let bytes_written = copy_body_to_file(body, file, self.buffer_size)
            .await
            .map_err(|source| StorageError::Transfer {
                path: relative_path.clone(),
                source,
            })?;

        info!("Stored {relative_path} ({bytes_written} bytes)");

        Ok(UploadResult {
            file_name,
            relative_path,
            bytes_written,
        })
    }

    /// Opens the file at `path` for streaming back to the client.
    pub async fn open_download(&self, path: &str) -> Result<DownloadResult, StorageError> {
        let relative_path = clean_relative(path)?;
        if relative_path.is_empty() {
            return Err(PathError::Missing("filename").into());
        }
        let file_path = resolve(&self.root, &relative_path)?;

        let file = File::open(&file_path).await.map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StorageError::NotFound(relative_path.clone())
            } else {
                StorageError::OpenFile {
                    path: relative_path.clone(),
                    source,
                }
            }
        })?;

        let metadata = file
            .metadata()
            .await
            .map_err(|source| StorageError::StatFile {
                path: relative_path.clone(),
                source,
            })?;

        if !metadata.is_file() {
            return Err(StorageError::NotFound(relative_path));
        }

        info!("Serving {relative_path} ({} bytes)", metadata.len());

        Ok(DownloadResult {
            file,
            file_name: download_name(&relative_path),
            size: metadata.len(),
        })
    }

    /// Lists the direct children of `dir`.
    ///
    /// Entries whose metadata cannot be read are logged and left out.
    pub async fn list(&self, dir: &str) -> Result<Vec<FileEntry>, StorageError> {
        let relative_dir = clean_relative(dir)?;
        let target_dir = resolve(&self.root, &relative_dir)?;

        let read_dir_error = |source: std::io::Error| StorageError::ReadDirectory {
            path: relative_dir.clone(),
            source,
        };

        let mut entries = fs::read_dir(&target_dir).await.map_err(read_dir_error)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let name = entry.file_name().to_string_lossy().to_string();
            let metadata = entry.metadata().await;

            if let Some(file) = file_entry(&relative_dir, name, metadata) {
                files.push(file);
            }
        }

        info!("Listed /{relative_dir} - {} entries", files.len());

        Ok(files)
    }

    /// Creates folder `name` inside `parent`, along with any missing ancestors.
    pub async fn create_folder(
        &self,
        parent: &str,
        name: &str,
    ) -> Result<CreateFolderResult, StorageError> {
        let name = validate_segment("folder name", name)?;
        let relative_parent = clean_relative(parent)?;
        let parent_dir = resolve(&self.root, &relative_parent)?;

        let relative_path = join_relative(&relative_parent, &name);
        let target_dir = parent_dir.join(&name);

        fs::create_dir_all(&target_dir)
            .await
            .map_err(|source| StorageError::CreateFolder {
                path: relative_path.clone(),
                source,
            })?;

        info!("Created folder {relative_path}");

        Ok(CreateFolderResult {
            name,
            relative_path,
        })
    }
}

/// Builds the listing record for one directory entry, or `None` when its
/// metadata could not be read.
fn file_entry(
    relative_dir: &str,
    name: String,
    metadata: std::io::Result<Metadata>,
) -> Option<FileEntry> {
    let metadata = match metadata {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!("Skipping {name} in /{relative_dir}: {e}");
            return None;
        }
    };

    let mod_time = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_default();

    Some(FileEntry {
        path: join_relative(relative_dir, &name),
        name,
        is_folder: metadata.is_dir(),
        size: metadata.len(),
        mod_time,
    })
}
