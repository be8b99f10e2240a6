//! In-memory catalog store.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;

use crate::domain::products::{
    data::ProductUpdate,
    query::seek::{SeekFilter, SortSpec},
    records::{ProductId, ProductRecord},
    store::{CatalogStore, StoreError},
};

#[derive(Debug, Default)]
struct Catalog {
    /// Rows in insertion (and therefore id) order.
    rows: Vec<ProductRecord>,
    by_name: FxHashMap<String, usize>,
    last_id: i64,
}

/// Catalog store holding every row in process memory.
///
/// Ids start at 1 and increase by one per inserted name. A bulk upsert holds the write lock for
/// the whole batch, so readers observe either none or all of it.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    catalog: RwLock<Catalog>,
}

impl MemoryCatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored row in id order.
    pub async fn snapshot(&self) -> Vec<ProductRecord> {
        self.catalog.read().await.rows.clone()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn bulk_upsert(&self, updates: Vec<ProductUpdate>) -> Result<(), StoreError> {
        let mut catalog = self.catalog.write().await;

        for update in updates {
            let existing = catalog.by_name.get(&update.name).copied();

            if let Some(row) = existing.and_then(|index| catalog.rows.get_mut(index)) {
                row.price = update.price;
                row.price_changes_counter = update.price_changes_counter;
                row.last_update_ts = update.last_update_ts;

                continue;
            }

            catalog.last_id += 1;

            let index = catalog.rows.len();
            let id = ProductId::from_i64(catalog.last_id);

            catalog.by_name.insert(update.name.clone(), index);
            catalog.rows.push(ProductRecord {
                id,
                name: update.name,
                price: update.price,
                price_changes_counter: update.price_changes_counter,
                last_update_ts: update.last_update_ts,
            });
        }

        Ok(())
    }

    async fn find_page(
        &self,
        filter: SeekFilter,
        sort: SortSpec,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let catalog = self.catalog.read().await;

        let mut matching: Vec<&ProductRecord> = catalog
            .rows
            .iter()
            .filter(|row| filter.admits(row))
            .collect();

        matching.sort_by(|left, right| sort.compare(left, right));

        Ok(matching
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
