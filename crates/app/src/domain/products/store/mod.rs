//! Catalog Store
//!
//! Persistence seam for the catalog: one bulk upsert keyed by product name and one
//! filtered, sorted and limited fetch.

use async_trait::async_trait;
use mockall::automock;
use thiserror::Error;

use crate::domain::products::{
    data::ProductUpdate,
    query::seek::{SeekFilter, SortSpec},
    records::ProductRecord,
};

mod memory;
mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage error")]
    Sql(#[from] sqlx::Error),
}

#[automock]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Insert or fully replace every update, matched by name, as a single bulk operation.
    async fn bulk_upsert(&self, updates: Vec<ProductUpdate>) -> Result<(), StoreError>;

    /// Fetch at most `limit` rows admitted by `filter`, ordered by `sort`.
    async fn find_page(
        &self,
        filter: SeekFilter,
        sort: SortSpec,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, StoreError>;
}
