//! Result helper extensions for HTTP handlers.

use salvo::prelude::StatusError;

use pricecrawl_app::domain::products::ProductsServiceError;

use crate::errors::into_status_error;

/// Map catalog failures onto HTTP errors.
pub(crate) trait ResultExt<T> {
    fn or_status(self) -> Result<T, StatusError>;
}

impl<T> ResultExt<T> for Result<T, ProductsServiceError> {
    fn or_status(self) -> Result<T, StatusError> {
        self.map_err(into_status_error)
    }
}
