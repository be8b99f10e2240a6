//! App Router

use salvo::Router;

use crate::{healthcheck, observability::metrics_handler, products, snapshots};

/// Routes documented in the OpenAPI description.
pub(crate) fn api_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("products").get(products::index::handler))
        .push(Router::with_path("snapshots").post(snapshots::upload::handler))
        .push(Router::with_path("fetch").post(snapshots::fetch::handler))
}

/// Operational routes kept out of the OpenAPI description.
pub(crate) fn ops_router() -> Router {
    Router::with_path("metrics").get(metrics_handler)
}
