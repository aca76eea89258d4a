//! Error types
//!
//! Defines domain-specific error types for each module of the file store.

use std::io;
use thiserror::Error;

/// Path resolver errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("path contains a parent directory segment: {0}")]
    Traversal(String),

    #[error("{field} must be a single path segment: {value}")]
    NotASegment { field: &'static str, value: String },

    #[error("invalid {0}")]
    InvalidName(&'static str),

    #[error("path contains a NUL byte")]
    NulByte,

    #[error("path escapes the storage root: {0}")]
    OutsideRoot(String),
}

/// Streaming copy errors
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to read request body: {0}")]
    BodyRead(String),

    #[error("failed to write file: {0}")]
    Write(#[source] io::Error),

    #[error("failed to flush file: {0}")]
    Flush(#[source] io::Error),
}

/// Storage module errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid path: {0}")]
    InvalidPath(#[from] PathError),

    #[error("file not found: {0}")]
    NotFound(String),

    #[error("storage root {path} is unusable: {reason}")]
    Root { path: String, reason: String },

    #[error("could not create directory {path}: {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not create folder {path}: {source}")]
    CreateFolder {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not create file {path}: {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not open file {path}: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not stat file {path}: {source}")]
    StatFile {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not read directory {path}: {source}")]
    ReadDirectory {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("transfer to {path} failed: {source}")]
    Transfer {
        path: String,
        #[source]
        source: TransferError,
    },
}

/// Errors surfaced to HTTP clients
///
/// Internal variants carry only a generic message; the cause is logged
/// where the conversion happens.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}
