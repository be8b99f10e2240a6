//! Seek predicates and sort specifications.
//!
//! Both are plain data so store adapters translate them into their own query language and the
//! in-memory adapter can evaluate them directly.

use std::cmp::Ordering;

use crate::domain::products::{
    query::token::{PageCursor, SortValue},
    records::{ProductId, ProductRecord},
    search::{OrderMethod, SearchParams, SortField},
};

/// Rows strictly after the previous page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeekFilter {
    /// First page.
    None,

    /// `id > after`.
    IdAfter(ProductId),

    /// `(field <op> value) OR (field = value AND id > id)` where `<op>` is `>` ascending and `<`
    /// descending.
    FieldAfter {
        field: SortField,
        direction: OrderMethod,
        value: SortValue,
        id: ProductId,
    },
}

/// Result ordering. The `id` tie-break is always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortSpec {
    ById,
    ByField {
        field: SortField,
        direction: OrderMethod,
    },
}

impl SortSpec {
    #[must_use]
    pub const fn for_params(params: SearchParams) -> Self {
        match params.order_by.sort_field() {
            None => Self::ById,
            Some(field) => Self::ByField {
                field,
                direction: params.order_method,
            },
        }
    }

    /// Total order over rows.
    #[must_use]
    pub fn compare(self, left: &ProductRecord, right: &ProductRecord) -> Ordering {
        match self {
            Self::ById => left.id.cmp(&right.id),
            Self::ByField { field, direction } => {
                let primary = SortValue::of(field, left).cmp(&SortValue::of(field, right));

                let primary = match direction {
                    OrderMethod::Ascending => primary,
                    OrderMethod::Descending => primary.reverse(),
                };

                primary.then_with(|| left.id.cmp(&right.id))
            }
        }
    }
}

impl SeekFilter {
    /// Filter resuming after `cursor`. The direction is not applied to the default order.
    ///
    /// A cursor without a value under a field order resumes by id alone.
    #[must_use]
    pub fn for_cursor(params: SearchParams, cursor: Option<PageCursor>) -> Self {
        let Some(cursor) = cursor else {
            return Self::None;
        };

        match (params.order_by.sort_field(), cursor.value) {
            (Some(field), Some(value)) => Self::FieldAfter {
                field,
                direction: params.order_method,
                value,
                id: cursor.id,
            },
            _ => Self::IdAfter(cursor.id),
        }
    }

    /// Whether `product` satisfies the predicate.
    #[must_use]
    pub fn admits(&self, product: &ProductRecord) -> bool {
        match self {
            Self::None => true,
            Self::IdAfter(after) => product.id > *after,
            Self::FieldAfter {
                field,
                direction,
                value,
                id,
            } => {
                let current = SortValue::of(*field, product);

                let beyond = match direction {
                    OrderMethod::Ascending => current > *value,
                    OrderMethod::Descending => current < *value,
                };

                beyond || (current == *value && product.id > *id)
            }
        }
    }
}
