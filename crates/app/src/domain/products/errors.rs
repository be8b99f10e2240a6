//! Products service errors.

use thiserror::Error;

use crate::domain::{
    products::{
        query::{QueryError, token::PageTokenError},
        store::StoreError,
    },
    snapshots::{FetchError, SnapshotError},
};

#[derive(Debug, Error)]
pub enum ProductsServiceError {
    #[error("invalid snapshot")]
    InvalidSnapshot(#[from] SnapshotError),

    #[error("failed to fetch snapshot")]
    Fetch(#[from] FetchError),

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("invalid page token")]
    InvalidPageToken(#[source] PageTokenError),

    #[error("storage error")]
    Store(#[from] StoreError),
}

impl From<QueryError> for ProductsServiceError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::InvalidPageSize => Self::InvalidPageSize,
            QueryError::InvalidPageToken(source) => Self::InvalidPageToken(source),
            QueryError::Store(source) => Self::Store(source),
        }
    }
}
