//! Snapshots

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use pricecrawl_app::domain::products::data::IngestReport;

pub(crate) mod fetch;
pub(crate) mod upload;

/// Ingest Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IngestResponse {
    /// Distinct products merged from the snapshot
    pub products: usize,
}

impl From<IngestReport> for IngestResponse {
    fn from(report: IngestReport) -> Self {
        Self {
            products: report.products,
        }
    }
}
