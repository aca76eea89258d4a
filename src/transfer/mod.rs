//! Transfer module
//!
//! Bounded-buffer streaming between request/response bodies and files.

pub mod file_ops;

pub use file_ops::{copy_body_to_file, file_body_stream};
