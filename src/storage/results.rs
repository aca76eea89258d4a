//! Storage result types
//!
//! Defines result structures returned by storage operations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::fs::File;

/// One direct child of a listed directory
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub name: String,
    pub is_folder: bool,
    pub size: u64,
    pub mod_time: DateTime<Utc>,
    /// Root-relative path accepted back as the `path` of later requests
    pub path: String,
}

/// Result of a file upload
#[derive(Debug, Clone)]
pub struct UploadResult {
    pub file_name: String,
    pub relative_path: String,
    pub bytes_written: u64,
}

/// An opened file ready to be streamed to the client
#[derive(Debug)]
pub struct DownloadResult {
    pub file: File,
    /// Base name only, never the directory part of the request path
    pub file_name: String,
    pub size: u64,
}

/// Result of a folder creation
#[derive(Debug, Clone)]
pub struct CreateFolderResult {
    pub name: String,
    pub relative_path: String,
}
