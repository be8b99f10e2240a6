//! Snapshot errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("row {row}: expected 2 fields, found {fields}")]
    MalformedRow { row: usize, fields: usize },

    #[error("row {row}: invalid price value {value:?}")]
    InvalidPrice { row: usize, value: String },

    #[error("failed to read snapshot")]
    Read(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("snapshot request failed")]
    Request(#[from] reqwest::Error),

    #[error("snapshot source responded with {0}")]
    Status(StatusCode),

    #[error("snapshot exceeds {limit} bytes")]
    TooLarge { limit: usize },
}
