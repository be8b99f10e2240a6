//! Products service.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use reqwest::Url;
use tracing::info;

use crate::domain::{
    products::{
        data::{IngestReport, ProductsPage},
        errors::ProductsServiceError,
        merge::merge,
        query,
        search::SearchParams,
        store::CatalogStore,
    },
    snapshots::{SnapshotFetcher, parse_snapshot},
};

/// Products service backed by a [`CatalogStore`].
#[derive(Clone)]
pub struct CatalogProductsService {
    store: Arc<dyn CatalogStore>,
    fetcher: Arc<dyn SnapshotFetcher>,
}

impl CatalogProductsService {
    #[must_use]
    pub fn new(store: Arc<dyn CatalogStore>, fetcher: Arc<dyn SnapshotFetcher>) -> Self {
        Self { store, fetcher }
    }
}

impl Debug for CatalogProductsService {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CatalogProductsService")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ProductsService for CatalogProductsService {
    async fn ingest_snapshot(
        &self,
        snapshot: Vec<u8>,
        batch_ts: i64,
    ) -> Result<IngestReport, ProductsServiceError> {
        let updates = parse_snapshot(snapshot.as_slice(), batch_ts)?;

        Ok(merge(self.store.as_ref(), updates).await?)
    }

    async fn fetch_snapshot(&self, url: Url) -> Result<IngestReport, ProductsServiceError> {
        info!(%url, "fetching snapshot");

        let snapshot = self.fetcher.fetch(url).await?;

        self.ingest_snapshot(snapshot, Timestamp::now().as_second())
            .await
    }

    async fn list_products(
        &self,
        params: SearchParams,
        page_token: String,
        page_size: u32,
    ) -> Result<ProductsPage, ProductsServiceError> {
        Ok(query::page(self.store.as_ref(), params, &page_token, page_size).await?)
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Aggregates a CSV snapshot stamped with `batch_ts` and merges it into the catalog.
    async fn ingest_snapshot(
        &self,
        snapshot: Vec<u8>,
        batch_ts: i64,
    ) -> Result<IngestReport, ProductsServiceError>;

    /// Downloads the snapshot at `url` and ingests it stamped with the download time.
    async fn fetch_snapshot(&self, url: Url) -> Result<IngestReport, ProductsServiceError>;

    /// Returns the page of products following `page_token`.
    async fn list_products(
        &self,
        params: SearchParams,
        page_token: String,
        page_size: u32,
    ) -> Result<ProductsPage, ProductsServiceError>;
}
