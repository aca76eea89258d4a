//! Server core functionality
//!
//! The HTTP server, its routes and the wiring between them and storage.

pub mod core;
pub mod routes;

pub use self::core::Server;
pub use routes::configure_app;
