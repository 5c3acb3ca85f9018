use std::sync::Arc;
use thiserror::Error;

use crate::config::Config;
use crate::db::{SqliteStore, StoreError, TranscriptionStore};
use crate::files::{DiskFileStore, FileStore};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<dyn TranscriptionStore>,
    pub uploads: Arc<dyn FileStore>,
    pub assets: Arc<dyn FileStore>,
}

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to prepare database: {0}")]
    Store(#[from] StoreError),

    #[error("failed to prepare upload directory: {0}")]
    UploadDir(#[from] std::io::Error),
}

impl th_app::ContextProvider<Config> for AppContext {
    type Error = ContextError;

    async fn new(config: Config) -> Result<Self, Self::Error> {
        let store = SqliteStore::new(&config.database_path);
        store.create_schema()?;
        tracing::info!(
            "database tables are ready in {}",
            store.path().display()
        );

        let uploads = DiskFileStore::create(&config.upload_dir)?;
        let assets = DiskFileStore::new(&config.static_dir);

        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            uploads: Arc::new(uploads),
            assets: Arc::new(assets),
        })
    }
}
