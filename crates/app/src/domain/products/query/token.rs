//! Page tokens.
//!
//! A token is the textual form of a [`PageCursor`]: the id of the last row of a page, followed by
//! that row's sort value when the order is not [`OrderBy::Default`]:
//!
//! ```text
//! default order:  <id>
//! field order:    <id>_<value>
//! ```
//!
//! Ids never contain the separator, so decoding splits on its first occurrence and names that
//! contain `_` survive the round trip.

use std::fmt::{Display, Formatter, Result as FmtResult};

use thiserror::Error;

use crate::domain::products::{
    records::{ProductId, ProductRecord},
    search::{OrderBy, SortField},
};

/// Separator between the id and the sort value.
pub const TOKEN_SEPARATOR: char = '_';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageTokenError {
    #[error("invalid id in page token: {0:?}")]
    InvalidId(String),

    #[error("page token is missing the value separator")]
    MissingSeparator,

    #[error("invalid sort value in page token: {0:?}")]
    InvalidValue(String),
}

/// Last value of the sort field carried by a token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SortValue {
    Integer(i64),
    Text(String),
}

impl SortValue {
    /// Read `field` from a row.
    #[must_use]
    pub fn of(field: SortField, product: &ProductRecord) -> Self {
        match field {
            SortField::Price => Self::Integer(i64::from(product.price)),
            SortField::PriceChangesCounter => {
                Self::Integer(i64::from(product.price_changes_counter))
            }
            SortField::LastUpdateTs => Self::Integer(product.last_update_ts),
            SortField::Name => Self::Text(product.name.clone()),
        }
    }
}

impl Display for SortValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Integer(value) => Display::fmt(value, f),
            Self::Text(value) => f.write_str(value),
        }
    }
}

/// Decoded position of a page token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    pub id: ProductId,
    pub value: Option<SortValue>,
}

impl PageCursor {
    /// Cursor pointing just past `product` in the given order.
    #[must_use]
    pub fn after(order_by: OrderBy, product: &ProductRecord) -> Self {
        Self {
            id: product.id,
            value: order_by
                .sort_field()
                .map(|field| SortValue::of(field, product)),
        }
    }

    #[must_use]
    pub fn encode(&self) -> String {
        match &self.value {
            None => self.id.to_string(),
            Some(value) => format!("{}{TOKEN_SEPARATOR}{value}", self.id),
        }
    }

    /// Decode a token issued for `order_by`. An empty token decodes to `None` (first page).
    ///
    /// # Errors
    ///
    /// Returns an error when the token is not shaped like a token for `order_by`.
    pub fn decode(order_by: OrderBy, token: &str) -> Result<Option<Self>, PageTokenError> {
        if token.is_empty() {
            return Ok(None);
        }

        let Some(field) = order_by.sort_field() else {
            return Ok(Some(Self {
                id: parse_id(token)?,
                value: None,
            }));
        };

        let (id, raw_value) = token
            .split_once(TOKEN_SEPARATOR)
            .ok_or(PageTokenError::MissingSeparator)?;

        let value = if field.is_numeric() {
            raw_value
                .parse::<i64>()
                .map(SortValue::Integer)
                .map_err(|_parse_error| PageTokenError::InvalidValue(raw_value.to_owned()))?
        } else {
            SortValue::Text(raw_value.to_owned())
        };

        Ok(Some(Self {
            id: parse_id(id)?,
            value: Some(value),
        }))
    }
}

fn parse_id(raw: &str) -> Result<ProductId, PageTokenError> {
    raw.parse()
        .map_err(|_parse_error| PageTokenError::InvalidId(raw.to_owned()))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use testresult::TestResult;

    use super::*;

    fn product(id: i64, name: &str, price: u32) -> ProductRecord {
        ProductRecord {
            id: ProductId::from_i64(id),
            name: name.to_owned(),
            price,
            price_changes_counter: 3,
            last_update_ts: 1_700_000_000,
        }
    }

    #[test]
    fn encodes_default_order_as_bare_id() {
        let cursor = PageCursor::after(OrderBy::Default, &product(7, "Tea", 10));

        assert_eq!(cursor.encode(), "7");
    }

    #[test]
    fn encodes_field_orders_as_id_and_value() {
        let row = product(3, "Tea", 15);

        assert_eq!(PageCursor::after(OrderBy::Price, &row).encode(), "3_15");
        assert_eq!(
            PageCursor::after(OrderBy::PriceChangesCounter, &row).encode(),
            "3_3"
        );
        assert_eq!(
            PageCursor::after(OrderBy::LastUpdateTs, &row).encode(),
            "3_1700000000"
        );
        assert_eq!(PageCursor::after(OrderBy::Name, &row).encode(), "3_Tea");
    }

    #[test]
    fn empty_token_is_first_page() -> TestResult {
        assert_eq!(PageCursor::decode(OrderBy::Default, "")?, None);
        assert_eq!(PageCursor::decode(OrderBy::Name, "")?, None);

        Ok(())
    }

    #[test]
    fn rejects_token_without_separator() {
        assert_eq!(
            PageCursor::decode(OrderBy::Price, "abc"),
            Err(PageTokenError::MissingSeparator)
        );
    }

    #[test]
    fn rejects_non_numeric_value_for_numeric_fields() {
        for order_by in [
            OrderBy::Price,
            OrderBy::PriceChangesCounter,
            OrderBy::LastUpdateTs,
        ] {
            assert_eq!(
                PageCursor::decode(order_by, "3_cheap"),
                Err(PageTokenError::InvalidValue("cheap".to_owned())),
                "{order_by:?} should reject a textual value"
            );
        }
    }

    #[test]
    fn rejects_invalid_ids() {
        assert_eq!(
            PageCursor::decode(OrderBy::Default, "abc"),
            Err(PageTokenError::InvalidId("abc".to_owned()))
        );
        assert_eq!(
            PageCursor::decode(OrderBy::Price, "x_15"),
            Err(PageTokenError::InvalidId("x".to_owned()))
        );
        assert_eq!(
            PageCursor::decode(OrderBy::Default, "3_15"),
            Err(PageTokenError::InvalidId("3_15".to_owned()))
        );
    }

    #[test]
    fn name_values_keep_separators() -> TestResult {
        let decoded = PageCursor::decode(OrderBy::Name, "12_green_tea_500g")?;

        assert_eq!(
            decoded,
            Some(PageCursor {
                id: ProductId::from_i64(12),
                value: Some(SortValue::Text("green_tea_500g".to_owned())),
            })
        );

        Ok(())
    }

    fn order_by() -> impl Strategy<Value = OrderBy> {
        prop_oneof![
            Just(OrderBy::Default),
            Just(OrderBy::Price),
            Just(OrderBy::PriceChangesCounter),
            Just(OrderBy::LastUpdateTs),
            Just(OrderBy::Name),
        ]
    }

    proptest! {
        #[test]
        fn prop_token_round_trip(
            order_by in order_by(),
            id in 1i64..i64::MAX,
            name in ".*",
            price in any::<u32>(),
            counter in any::<u32>(),
            ts in any::<i64>(),
        ) {
            let row = ProductRecord {
                id: ProductId::from_i64(id),
                name,
                price,
                price_changes_counter: counter,
                last_update_ts: ts,
            };

            let cursor = PageCursor::after(order_by, &row);
            let decoded = PageCursor::decode(order_by, &cursor.encode());

            prop_assert_eq!(decoded, Ok(Some(cursor.clone())));
            prop_assert_eq!(cursor.id, row.id);
            prop_assert_eq!(
                cursor.value,
                order_by.sort_field().map(|field| SortValue::of(field, &row))
            );
        }
    }
}
