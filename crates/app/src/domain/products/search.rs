//! Search Parameters

/// Catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderBy {
    /// Insertion order (ascending id).
    #[default]
    Default,
    Price,
    PriceChangesCounter,
    LastUpdateTs,
    Name,
}

/// Sort direction of the primary field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OrderMethod {
    #[default]
    Ascending,
    Descending,
}

/// Non-default sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Price,
    PriceChangesCounter,
    LastUpdateTs,
    Name,
}

impl SortField {
    /// Whether page tokens carry this field's value as an integer.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        !matches!(self, Self::Name)
    }

    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Price => "price",
            Self::PriceChangesCounter => "price_changes_counter",
            Self::LastUpdateTs => "last_update_ts",
            Self::Name => "name",
        }
    }
}

impl OrderBy {
    /// The sort column, or `None` for insertion order.
    #[must_use]
    pub const fn sort_field(self) -> Option<SortField> {
        match self {
            Self::Default => None,
            Self::Price => Some(SortField::Price),
            Self::PriceChangesCounter => Some(SortField::PriceChangesCounter),
            Self::LastUpdateTs => Some(SortField::LastUpdateTs),
            Self::Name => Some(SortField::Name),
        }
    }
}

/// Query configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SearchParams {
    pub order_by: OrderBy,
    pub order_method: OrderMethod,
}

impl SearchParams {
    #[must_use]
    pub const fn new(order_by: OrderBy, order_method: OrderMethod) -> Self {
        Self {
            order_by,
            order_method,
        }
    }
}
