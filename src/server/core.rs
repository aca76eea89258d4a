use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use log::info;

use crate::config::ServerConfig;
use crate::error::StorageError;
use crate::server::routes::configure_app;
use crate::storage::Storage;

pub struct Server {
    config: ServerConfig,
    storage: Storage,
}

impl Server {
    /// Prepares the storage root; nothing is bound until [`Server::run`].
    pub fn new(config: ServerConfig) -> Result<Self, StorageError> {
        let storage = Storage::open(config.storage_root_path(), config.buffer_size)?;
        info!("Storage root: {}", storage.root().display());

        Ok(Self { config, storage })
    }

    pub async fn run(self) -> std::io::Result<()> {
        let bind_addr = self.config.socket_addr();
        info!("Starting file store on http://{bind_addr}/");

        let storage = web::Data::new(self.storage);
        let mut server = HttpServer::new(move || {
            App::new()
                .wrap(Logger::default())
                .app_data(storage.clone())
                .configure(configure_app)
        });

        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        server.bind(bind_addr)?.run().await
    }
}
