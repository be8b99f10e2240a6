//! Keyset Query Engine
//!
//! Seek-method pagination over the catalog. Each call decodes the caller's token into a
//! [`SeekFilter`], fetches one page through the [`CatalogStore`] and encodes the last row of the
//! page into the next token. No state is kept between calls.

use thiserror::Error;
use tracing::debug;

use crate::domain::products::{
    data::ProductsPage,
    search::SearchParams,
    store::{CatalogStore, StoreError},
};

pub mod seek;
pub mod token;

use seek::{SeekFilter, SortSpec};
use token::{PageCursor, PageTokenError};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("invalid page token")]
    InvalidPageToken(#[from] PageTokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fetch the page following `page_token`.
///
/// An empty result comes back with an empty token; that is the only end-of-pagination signal.
///
/// # Errors
///
/// Rejects a zero `page_size` and malformed tokens before touching the store, and surfaces store
/// failures unchanged.
pub async fn page(
    store: &dyn CatalogStore,
    params: SearchParams,
    page_token: &str,
    page_size: u32,
) -> Result<ProductsPage, QueryError> {
    if page_size == 0 {
        return Err(QueryError::InvalidPageSize);
    }

    let cursor = PageCursor::decode(params.order_by, page_token)?;
    let filter = SeekFilter::for_cursor(params, cursor);
    let sort = SortSpec::for_params(params);

    debug!(?filter, ?sort, page_size, "fetching catalog page");

    let products = store.find_page(filter, sort, page_size).await?;

    let next_page_token = products
        .last()
        .map(|last| PageCursor::after(params.order_by, last).encode())
        .unwrap_or_default();

    Ok(ProductsPage {
        products,
        next_page_token,
    })
}
