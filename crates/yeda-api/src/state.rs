use std::sync::Arc;

use yeda_store::{MemStorage, PgStorage, Storage};

use crate::ApiConfig;

/// Shared application state handed to every request handler.
///
/// Handlers see only the [`Storage`] contract; which backend sits behind it
/// is decided once, at startup.
#[derive(Clone)]
pub struct ApiState {
    pub storage: Arc<dyn Storage>,
}

impl ApiState {
    /// Build state from configuration, selecting the storage backend.
    ///
    /// A configured `DATABASE_URL` selects Postgres (creating the database
    /// and running migrations if needed); otherwise the seeded in-memory
    /// store is used.
    pub async fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let storage: Arc<dyn Storage> = match config.database_url.as_deref() {
            Some(url) => {
                let pool = yeda_store::create_pool(url, 10).await?;
                yeda_store::ensure_db_and_migrate(url, &pool).await?;
                tracing::info!("storage backend: postgres");
                Arc::new(PgStorage::new(pool))
            }
            None => {
                tracing::info!("DATABASE_URL not set, storage backend: in-memory (seeded)");
                Arc::new(MemStorage::seeded()?)
            }
        };

        Ok(Self { storage })
    }

    /// Build state over an explicit storage backend. Used by tests.
    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}
