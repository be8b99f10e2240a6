//! Products Data

use crate::domain::products::records::ProductRecord;

/// Product Update Data
///
/// One deduplicated entry of an ingestion batch. Merging it fully replaces the stored price,
/// counter and timestamp of the product with the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: u32,
    pub price_changes_counter: u32,
    pub last_update_ts: i64,
}

/// Acknowledgement of a merged ingestion batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    /// Number of distinct products written.
    pub products: usize,
}

/// One page of catalog rows and the token that resumes after it.
///
/// An empty `next_page_token` only ever accompanies an empty page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductsPage {
    pub products: Vec<ProductRecord>,
    pub next_page_token: String,
}
