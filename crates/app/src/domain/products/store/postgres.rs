//! `PostgreSQL` catalog store.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Row, postgres::PgRow, query};

use crate::domain::products::{
    data::ProductUpdate,
    query::{
        seek::{SeekFilter, SortSpec},
        token::SortValue,
    },
    records::{ProductId, ProductRecord},
    search::{OrderMethod, SortField},
    store::{CatalogStore, StoreError},
};

const UPSERT_PRODUCTS_SQL: &str = include_str!("../sql/upsert_products.sql");
const FIND_PRODUCTS_SQL: &str = include_str!("../sql/find_products.sql");

#[derive(Debug, Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn bulk_upsert(&self, updates: Vec<ProductUpdate>) -> Result<(), StoreError> {
        let mut names = Vec::with_capacity(updates.len());
        let mut prices = Vec::with_capacity(updates.len());
        let mut counters = Vec::with_capacity(updates.len());
        let mut timestamps = Vec::with_capacity(updates.len());

        for update in updates {
            names.push(update.name);
            prices.push(i64::from(update.price));
            counters.push(i64::from(update.price_changes_counter));
            timestamps.push(update.last_update_ts);
        }

        query(UPSERT_PRODUCTS_SQL)
            .bind(names)
            .bind(prices)
            .bind(counters)
            .bind(timestamps)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_page(
        &self,
        filter: SeekFilter,
        sort: SortSpec,
        limit: u32,
    ) -> Result<Vec<ProductRecord>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(FIND_PRODUCTS_SQL.trim_end());

        push_filter(&mut builder, filter);
        push_sort(&mut builder, sort);

        builder.push(" LIMIT ").push_bind(i64::from(limit));

        Ok(builder
            .build_query_as::<ProductRecord>()
            .fetch_all(&self.pool)
            .await?)
    }
}

/// Column expression used for both comparison and ordering.
fn column_expr(field: SortField) -> &'static str {
    match field {
        SortField::Name => "name COLLATE \"C\"",
        SortField::Price | SortField::PriceChangesCounter | SortField::LastUpdateTs => {
            field.column()
        }
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: SortValue) {
    match value {
        SortValue::Integer(value) => builder.push_bind(value),
        SortValue::Text(value) => builder.push_bind(value),
    };
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: SeekFilter) {
    match filter {
        SeekFilter::None => {}
        SeekFilter::IdAfter(after) => {
            builder.push(" WHERE id > ").push_bind(after.into_i64());
        }
        SeekFilter::FieldAfter {
            field,
            direction,
            value,
            id,
        } => {
            let column = column_expr(field);
            let operator = match direction {
                OrderMethod::Ascending => " > ",
                OrderMethod::Descending => " < ",
            };

            builder.push(" WHERE (").push(column).push(operator);
            push_value(builder, value.clone());
            builder.push(") OR (").push(column).push(" = ");
            push_value(builder, value);
            builder.push(" AND id > ").push_bind(id.into_i64()).push(")");
        }
    }
}

fn push_sort(builder: &mut QueryBuilder<'_, Postgres>, sort: SortSpec) {
    match sort {
        SortSpec::ById => {
            builder.push(" ORDER BY id ASC");
        }
        SortSpec::ByField { field, direction } => {
            let direction = match direction {
                OrderMethod::Ascending => " ASC",
                OrderMethod::Descending => " DESC",
            };

            builder
                .push(" ORDER BY ")
                .push(column_expr(field))
                .push(direction)
                .push(", id ASC");
        }
    }
}

fn decode_u32(row: &PgRow, column: &'static str) -> sqlx::Result<u32> {
    let value: i64 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            name: row.try_get("name")?,
            price: decode_u32(row, "price")?,
            price_changes_counter: decode_u32(row, "price_changes_counter")?,
            last_update_ts: row.try_get("last_update_ts")?,
        })
    }
}
