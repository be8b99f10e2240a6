//! Catalog error responses.

use std::error::Error as _;

use salvo::http::StatusError;
use tracing::{error, warn};

use pricecrawl_app::domain::products::ProductsServiceError;

pub(crate) fn into_status_error(error: ProductsServiceError) -> StatusError {
    match error {
        ProductsServiceError::InvalidPageSize => {
            StatusError::bad_request().brief("page_size must be greater than zero")
        }
        ProductsServiceError::InvalidPageToken(source) => {
            StatusError::bad_request().brief(format!("Invalid page token: {source}"))
        }
        ProductsServiceError::InvalidSnapshot(source) => {
            StatusError::unprocessable_entity().brief(format!("Invalid snapshot: {source}"))
        }
        ProductsServiceError::Fetch(source) => {
            warn!(cause = ?source.source(), "snapshot download failed: {source}");

            StatusError::bad_gateway().brief(source.to_string())
        }
        ProductsServiceError::Store(source) => {
            error!(cause = ?source.source(), "catalog store failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
