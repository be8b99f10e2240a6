//! Upload Snapshot Handler

use jiff::Timestamp;
use pricecrawl_app::domain::snapshots::MAX_SNAPSHOT_BYTES;
use salvo::prelude::*;

use crate::{extensions::*, observability::record_ingested_products, snapshots::IngestResponse};

/// Upload Snapshot Handler
///
/// Merges a CSV snapshot sent as the request body, stamped with the time it was received.
#[endpoint(
    tags("snapshots"),
    summary = "Upload Snapshot",
    responses(
        (status_code = 200, description = "Snapshot merged"),
        (status_code = 400, description = "Unreadable request body"),
        (status_code = 422, description = "Snapshot could not be parsed"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<IngestResponse>, StatusError> {
    let batch_ts = Timestamp::now().as_second();

    let snapshot = req
        .payload_with_max_size(MAX_SNAPSHOT_BYTES)
        .await
        .map_err(|error| StatusError::bad_request().brief(format!("Unreadable body: {error}")))?
        .to_vec();

    let report = depot
        .state_or_500()?
        .app
        .products
        .ingest_snapshot(snapshot, batch_ts)
        .await
        .or_status()?;

    record_ingested_products(report.products);

    Ok(Json(report.into()))
}
