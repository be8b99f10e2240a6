//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    database,
    domain::{
        products::{CatalogProductsService, ProductsService, store::PgCatalogStore},
        snapshots::{FetchError, HttpSnapshotFetcher},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build snapshot fetcher")]
    Fetcher(#[source] FetchError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(products: Arc<dyn ProductsService>) -> Self {
        Self { products }
    }

    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or building the HTTP client
    /// fails.
    pub async fn from_database_url(url: &str, fetch_timeout: Duration) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let fetcher = HttpSnapshotFetcher::new(fetch_timeout).map_err(AppInitError::Fetcher)?;

        Ok(Self::new(Arc::new(CatalogProductsService::new(
            Arc::new(PgCatalogStore::new(pool)),
            Arc::new(fetcher),
        ))))
    }
}
