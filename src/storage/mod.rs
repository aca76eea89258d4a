//! File system storage management
//!
//! Path resolution against the storage root and the four storage operations.

pub mod filesystem;
pub mod operations;
pub mod results;
pub mod validation;

pub use operations::Storage;
pub use results::{CreateFolderResult, DownloadResult, FileEntry, UploadResult};
pub use validation::{clean_relative, resolve, validate_segment};
