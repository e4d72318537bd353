//! Startup orchestration.
//!
//! # Responsibilities
//! - Open the configured record store
//! - Bind the listener and build the server
//!
//! # Design Decisions
//! - Store opens before the listener binds
//! - Any failure here is fatal to the process

use crate::config::{ServerConfig, StoreBackend, StoreConfig};
use crate::http::HttpServer;
use crate::net::{Listener, ListenerError};
use crate::store::{JsonFileStore, MemoryStore, RecordStore, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("failed to open player store: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Listener(#[from] ListenerError),
}

/// Open the record store selected by `config`.
pub fn open_store(config: &StoreConfig) -> Result<Box<dyn RecordStore>, StoreError> {
    match config.backend {
        StoreBackend::Json => Ok(Box::new(JsonFileStore::open(&config.path)?)),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory player store; records are lost on exit");
            Ok(Box::new(MemoryStore::new()))
        }
    }
}

/// Open the store, bind the listener and assemble the server.
pub async fn bootstrap(config: ServerConfig) -> Result<(HttpServer, Listener), StartupError> {
    let store = open_store(&config.store)?;
    let listener = Listener::bind(&config.listener).await?;
    Ok((HttpServer::new(config, store), listener))
}
