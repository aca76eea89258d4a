//! Error handling
//!
//! Defines error types for each layer of the file store and their mapping
//! onto HTTP responses.

pub mod handlers;
pub mod types;

pub use types::*;
