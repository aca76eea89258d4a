pub mod config;
pub mod error;
pub mod server;
pub mod storage;
pub mod transfer;

pub use config::ServerConfig;
pub use server::{Server, configure_app};
pub use storage::Storage;
