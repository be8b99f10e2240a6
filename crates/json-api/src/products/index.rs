//! Product Index Handler

use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use pricecrawl_app::domain::products::{
    data::ProductsPage,
    records::ProductRecord,
    search::{OrderBy, OrderMethod, SearchParams},
};

use crate::{extensions::*, observability::record_served_page};

/// `order_by` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OrderByParam {
    #[default]
    Default,
    Price,
    PriceChangesCounter,
    LastUpdateTs,
    Name,
}

impl OrderByParam {
    fn parse(value: Option<String>) -> Result<Self, StatusError> {
        match value.as_deref() {
            None | Some("" | "default") => Ok(Self::Default),
            Some("price") => Ok(Self::Price),
            Some("price_changes_counter") => Ok(Self::PriceChangesCounter),
            Some("last_update_ts") => Ok(Self::LastUpdateTs),
            Some("name") => Ok(Self::Name),
            Some(_) => Err(StatusError::bad_request().brief(
                "order_by must be one of default, price, price_changes_counter, last_update_ts, name",
            )),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Price => "price",
            Self::PriceChangesCounter => "price_changes_counter",
            Self::LastUpdateTs => "last_update_ts",
            Self::Name => "name",
        }
    }
}

impl From<OrderByParam> for OrderBy {
    fn from(value: OrderByParam) -> Self {
        match value {
            OrderByParam::Default => Self::Default,
            OrderByParam::Price => Self::Price,
            OrderByParam::PriceChangesCounter => Self::PriceChangesCounter,
            OrderByParam::LastUpdateTs => Self::LastUpdateTs,
            OrderByParam::Name => Self::Name,
        }
    }
}

/// `order_method` query parameter; ignored for the default ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum OrderMethodParam {
    #[default]
    Asc,
    Desc,
}

impl OrderMethodParam {
    fn parse(value: Option<String>) -> Result<Self, StatusError> {
        match value.as_deref() {
            None | Some("" | "asc") => Ok(Self::Asc),
            Some("desc") => Ok(Self::Desc),
            Some(_) => Err(StatusError::bad_request().brief("order_method must be asc or desc")),
        }
    }
}

impl From<OrderMethodParam> for OrderMethod {
    fn from(value: OrderMethodParam) -> Self {
        match value {
            OrderMethodParam::Asc => Self::Ascending,
            OrderMethodParam::Desc => Self::Descending,
        }
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub id: i64,
    pub name: String,
    /// Latest price seen for this product
    pub price: u32,
    /// Price changes observed within the latest snapshot containing this product
    pub price_changes_counter: u32,
    /// Unix timestamp, in seconds, of the latest snapshot containing this product
    pub last_update_ts: i64,
}

impl From<ProductRecord> for ProductResponse {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: record.id.into_i64(),
            name: record.name,
            price: record.price,
            price_changes_counter: record.price_changes_counter,
            last_update_ts: record.last_update_ts,
        }
    }
}

/// Products Page Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductsResponse {
    pub products: Vec<ProductResponse>,
    /// Pass back as `page_token` for the next page; empty once the catalog is exhausted
    pub next_page_token: String,
}

impl From<ProductsPage> for ProductsResponse {
    fn from(page: ProductsPage) -> Self {
        Self {
            products: page.products.into_iter().map(Into::into).collect(),
            next_page_token: page.next_page_token,
        }
    }
}

/// Product Index Handler
///
/// Returns one page of the catalog. `order_by` is one of `default`, `price`,
/// `price_changes_counter`, `last_update_ts` or `name`; `order_method` is `asc` or `desc`.
#[endpoint(
    tags("products"),
    summary = "List Products",
    responses(
        (status_code = 200, description = "Page of products"),
        (status_code = 400, description = "Invalid ordering, page size or page token"),
        (status_code = 500, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    order_by: QueryParam<String, false>,
    order_method: QueryParam<String, false>,
    page_token: QueryParam<String, false>,
    page_size: QueryParam<u32, true>,
    depot: &mut Depot,
) -> Result<Json<ProductsResponse>, StatusError> {
    let order_by = OrderByParam::parse(order_by.into_inner())?;
    let order_method = OrderMethodParam::parse(order_method.into_inner())?;

    let page = depot
        .state_or_500()?
        .app
        .products
        .list_products(
            SearchParams::new(order_by.into(), order_method.into()),
            page_token.into_inner().unwrap_or_default(),
            page_size.into_inner(),
        )
        .await
        .or_status()?;

    record_served_page(order_by.as_str());

    Ok(Json(page.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use pricecrawl_app::domain::products::{
        MockProductsService, ProductsServiceError, query::token::PageTokenError, records::ProductId,
    };

    use crate::test_helpers::catalog_service;

    use super::*;

    fn make_record(id: i64, name: &str, price: u32) -> ProductRecord {
        ProductRecord {
            id: ProductId::from_i64(id),
            name: name.to_owned(),
            price,
            price_changes_counter: 0,
            last_update_ts: 1_700_000_000,
        }
    }

    fn make_service(products: MockProductsService) -> Service {
        catalog_service(products, Router::with_path("products").get(handler))
    }

    #[tokio::test]
    async fn test_index_returns_page_and_token() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|params, token, size| {
                *params == SearchParams::new(OrderBy::Price, OrderMethod::Descending)
                    && token == "3_15"
                    && *size == 2
            })
            .return_once(|_, _, _| {
                Ok(ProductsPage {
                    products: vec![make_record(2, "B", 10), make_record(4, "D", 5)],
                    next_page_token: "4_5".to_owned(),
                })
            });

        let response: ProductsResponse = TestClient::get(
            "http://example.com/products?order_by=price&order_method=desc&page_token=3_15&page_size=2",
        )
        .send(&make_service(products))
        .await
        .take_json()
        .await?;

        let names: Vec<&str> = response.products.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["B", "D"]);
        assert_eq!(response.next_page_token, "4_5");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_defaults_ordering_and_token() -> TestResult {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .withf(|params, token, size| {
                *params == SearchParams::default() && token.is_empty() && *size == 10
            })
            .return_once(|_, _, _| Ok(ProductsPage::default()));

        let response: ProductsResponse = TestClient::get("http://example.com/products?page_size=10")
            .send(&make_service(products))
            .await
            .take_json()
            .await?;

        assert!(response.products.is_empty(), "expected an empty page");
        assert_eq!(response.next_page_token, "");

        Ok(())
    }

    #[tokio::test]
    async fn test_index_requires_page_size() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_unknown_ordering_returns_400() {
        let mut products = MockProductsService::new();

        products.expect_list_products().never();

        let res = TestClient::get("http://example.com/products?order_by=colour&page_size=10")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn order_method_is_parsed() -> TestResult {
        assert_eq!(OrderMethodParam::parse(None)?, OrderMethodParam::Asc);
        assert_eq!(
            OrderMethodParam::parse(Some("desc".to_owned()))?,
            OrderMethodParam::Desc
        );
        assert!(OrderMethodParam::parse(Some("DESC".to_owned())).is_err());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_zero_page_size_returns_400() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::InvalidPageSize));

        let res = TestClient::get("http://example.com/products?page_size=0")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_index_invalid_token_returns_400() {
        let mut products = MockProductsService::new();

        products
            .expect_list_products()
            .once()
            .return_once(|_, _, _| {
                Err(ProductsServiceError::InvalidPageToken(
                    PageTokenError::MissingSeparator,
                ))
            });

        let res = TestClient::get("http://example.com/products?order_by=name&page_token=abc&page_size=5")
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
