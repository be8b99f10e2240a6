//! Merge Writer

use tracing::{debug, info};

use crate::domain::products::{
    data::{IngestReport, ProductUpdate},
    store::{CatalogStore, StoreError},
};

/// Apply an aggregated batch to the catalog as one bulk upsert keyed by name.
///
/// Updates are submitted in name order so that concurrent batches touching the same names take
/// row locks in the same order. A name repeated in `updates` keeps its last entry, so every
/// store sees each name at most once. An empty batch is acknowledged without a store call.
///
/// # Errors
///
/// Returns the store's error unchanged; nothing is retried.
pub async fn merge(
    store: &dyn CatalogStore,
    mut updates: Vec<ProductUpdate>,
) -> Result<IngestReport, StoreError> {
    if updates.is_empty() {
        debug!("empty batch, nothing to merge");

        return Ok(IngestReport::default());
    }

    // Reversed then stably sorted, the first entry of each name run is the caller's last.
    updates.reverse();
    updates.sort_by(|left, right| left.name.cmp(&right.name));
    updates.dedup_by(|later, kept| later.name == kept.name);

    let products = updates.len();

    store.bulk_upsert(updates).await?;

    info!(products, "batch merged into catalog");

    Ok(IngestReport { products })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::products::store::{MemoryCatalogStore, MockCatalogStore};

    use super::*;

    fn update(name: &str, price: u32, counter: u32) -> ProductUpdate {
        ProductUpdate {
            name: name.to_owned(),
            price,
            price_changes_counter: counter,
            last_update_ts: 1_700_000_000,
        }
    }

    #[tokio::test]
    async fn empty_batch_skips_the_store() -> TestResult {
        let mut store = MockCatalogStore::new();

        store.expect_bulk_upsert().never();

        let report = merge(&store, vec![]).await?;

        assert_eq!(report, IngestReport { products: 0 });

        Ok(())
    }

    #[tokio::test]
    async fn submits_one_bulk_operation_in_name_order() -> TestResult {
        let mut store = MockCatalogStore::new();

        store
            .expect_bulk_upsert()
            .once()
            .withf(|updates| {
                let names: Vec<&str> = updates.iter().map(|u| u.name.as_str()).collect();
                names == ["apple", "banana", "cherry"]
            })
            .return_once(|_| Ok(()));

        let report = merge(
            &store,
            vec![
                update("cherry", 3, 0),
                update("apple", 1, 0),
                update("banana", 2, 1),
            ],
        )
        .await?;

        assert_eq!(report.products, 3);

        Ok(())
    }

    #[tokio::test]
    async fn repeated_names_keep_their_last_entry() -> TestResult {
        let mut store = MockCatalogStore::new();

        store
            .expect_bulk_upsert()
            .once()
            .withf(|updates| *updates == [update("A", 30, 1), update("B", 5, 0)])
            .return_once(|_| Ok(()));

        let report = merge(
            &store,
            vec![
                update("A", 10, 0),
                update("B", 5, 0),
                update("A", 20, 0),
                update("A", 30, 1),
            ],
        )
        .await?;

        assert_eq!(report.products, 2);

        Ok(())
    }

    #[tokio::test]
    async fn replaying_a_batch_is_idempotent() -> TestResult {
        let store = MemoryCatalogStore::new();
        let batch = vec![update("A", 20, 2), update("B", 5, 0)];

        merge(&store, batch.clone()).await?;
        let once = store.snapshot().await;

        merge(&store, batch).await?;
        let twice = store.snapshot().await;

        assert_eq!(once, twice);

        Ok(())
    }

    #[tokio::test]
    async fn later_batches_replace_the_counter() -> TestResult {
        let store = MemoryCatalogStore::new();

        merge(&store, vec![update("A", 20, 2)]).await?;
        merge(&store, vec![update("A", 21, 0)]).await?;

        let rows = store.snapshot().await;
        let row = rows.first().ok_or("missing row")?;

        assert_eq!(row.price, 21);
        assert_eq!(
            row.price_changes_counter, 0,
            "the counter reflects only the latest batch"
        );

        Ok(())
    }

    #[tokio::test]
    async fn store_errors_are_returned() {
        let mut store = MockCatalogStore::new();

        store
            .expect_bulk_upsert()
            .once()
            .return_once(|_| Err(StoreError::Sql(sqlx::Error::PoolClosed)));

        let result = merge(&store, vec![update("A", 1, 0)]).await;

        assert!(
            matches!(result, Err(StoreError::Sql(sqlx::Error::PoolClosed))),
            "expected store error, got {result:?}"
        );
    }
}
