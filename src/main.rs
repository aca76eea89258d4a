//! Web File Store - Entry Point
//!
//! Serves upload, download, listing and folder creation over HTTP for a
//! single storage root.

use env_logger::Env;
use log::{error, info};
use std::io;

use web_file_store::{Server, ServerConfig};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Launching file store server...");

    let config = ServerConfig::load().map_err(|e| {
        error!("Failed to load configuration: {e}");
        io::Error::other(e)
    })?;

    let server = Server::new(config).map_err(|e| {
        error!("Failed to prepare storage: {e}");
        io::Error::other(e)
    })?;

    server.run().await
}
