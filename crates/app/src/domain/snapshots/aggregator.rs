//! Ingestion Aggregator
//!
//! Folds the rows of one snapshot into one update per product name. The first row for a name
//! sets its price; every later row for the same name replaces the price and counts as a price
//! change. Counts are local to the batch and overwrite whatever the catalog held before.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};
use rustc_hash::FxHashMap;

use crate::domain::{products::data::ProductUpdate, snapshots::errors::SnapshotError};

/// Parse a CSV snapshot and aggregate it, stamping every update with `batch_ts`.
///
/// # Errors
///
/// Fails on the first unreadable, malformed or mispriced row; nothing is returned for the rest
/// of the batch.
pub fn parse_snapshot<R: Read>(
    snapshot: R,
    batch_ts: i64,
) -> Result<Vec<ProductUpdate>, SnapshotError> {
    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(snapshot);

    aggregate(reader.into_records(), batch_ts)
}

/// Aggregate raw snapshot rows. Output order is unspecified.
///
/// # Errors
///
/// Fails when a row does not have exactly two fields, when a price is not a non-negative
/// decimal integer, or when a row could not be read.
pub fn aggregate<I>(rows: I, batch_ts: i64) -> Result<Vec<ProductUpdate>, SnapshotError>
where
    I: IntoIterator<Item = Result<StringRecord, csv::Error>>,
{
    let mut products: FxHashMap<String, ProductUpdate> = FxHashMap::default();

    for (index, record) in rows.into_iter().enumerate() {
        let row = index + 1;
        let record = record?;

        let (Some(name), Some(price), None) = (record.get(0), record.get(1), record.get(2)) else {
            return Err(SnapshotError::MalformedRow {
                row,
                fields: record.len(),
            });
        };

        let price = parse_price(price).ok_or_else(|| SnapshotError::InvalidPrice {
            row,
            value: price.to_owned(),
        })?;

        match products.get_mut(name) {
            Some(product) => {
                product.price = price;
                product.price_changes_counter += 1;
            }
            None => {
                products.insert(
                    name.to_owned(),
                    ProductUpdate {
                        name: name.to_owned(),
                        price,
                        price_changes_counter: 0,
                        last_update_ts: batch_ts,
                    },
                );
            }
        }
    }

    Ok(products.into_values().collect())
}

/// Unsigned decimal digits only; signs and whitespace are rejected.
fn parse_price(raw: &str) -> Option<u32> {
    if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    raw.parse().ok()
}
