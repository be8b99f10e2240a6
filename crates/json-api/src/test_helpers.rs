//! Test helpers.

use std::sync::Arc;

use salvo::{affix_state::inject, prelude::*};

use pricecrawl_app::{context::AppContext, domain::products::MockProductsService};

use crate::state::State;

/// Serve `route` with `products` standing in for the catalog service.
pub(crate) fn catalog_service(products: MockProductsService, route: Router) -> Service {
    let state = State::shared(AppContext::new(Arc::new(products)));

    Service::new(Router::new().hoop(inject(state)).push(route))
}
