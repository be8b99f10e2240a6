//! Snapshots
//!
//! Price-list snapshots: two-column CSV documents of product name and price.

pub mod aggregator;
pub mod errors;
pub mod fetcher;

pub use aggregator::{aggregate, parse_snapshot};
pub use errors::{FetchError, SnapshotError};
pub use fetcher::{HttpSnapshotFetcher, MAX_SNAPSHOT_BYTES, MockSnapshotFetcher, SnapshotFetcher};
pub use reqwest::Url;
