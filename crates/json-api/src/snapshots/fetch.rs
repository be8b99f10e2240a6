//! Fetch Snapshot Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use pricecrawl_app::domain::snapshots::Url;

use crate::{extensions::*, observability::record_ingested_products, snapshots::IngestResponse};

/// Fetch Snapshot Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FetchSnapshotRequest {
    /// Absolute URL of a CSV price-list snapshot
    pub url: String,
}

/// Fetch Snapshot Handler
///
/// Downloads a snapshot, stamps it with the download time and merges it into the catalog.
#[endpoint(
    tags("snapshots"),
    summary = "Fetch Snapshot",
    responses(
        (status_code = 200, description = "Snapshot merged"),
        (status_code = 400, description = "Invalid URL"),
        (status_code = 422, description = "Snapshot could not be parsed"),
        (status_code = 502, description = "Snapshot download failed"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<FetchSnapshotRequest>,
    depot: &mut Depot,
) -> Result<Json<IngestResponse>, StatusError> {
    let url = Url::parse(json.into_inner().url.trim())
        .map_err(|error| StatusError::bad_request().brief(format!("Invalid URL: {error}")))?;

    let report = depot
        .state_or_500()?
        .app
        .products
        .fetch_snapshot(url)
        .await
        .or_status()?;

    info!(products = report.products, "snapshot fetched");
    record_ingested_products(report.products);

    Ok(Json(report.into()))
}
