//! `PostgreSQL` product store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;

use salesboard_core::ProductRecord;

use super::{ProductStore, RepositoryError};

/// Row shape of the `product` table.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    name: String,
    category: String,
    price: Decimal,
    quantity_sold: i64,
    rating: Decimal,
}

impl From<ProductRow> for ProductRecord {
    fn from(row: ProductRow) -> Self {
        Self {
            name: row.name,
            category: row.category,
            price: row.price,
            quantity_sold: row.quantity_sold,
            rating: row.rating,
        }
    }
}

/// Product store backed by the `product` table.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a new product store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn append(&self, records: &[ProductRecord]) -> Result<u64, RepositoryError> {
        // Dropping the transaction on an early return rolls the batch back.
        let mut tx = self.pool.begin().await?;

        let mut written = 0;
        for record in records {
            let result = sqlx::query(
                r"
                INSERT INTO product (name, category, price, quantity_sold, rating)
                VALUES ($1, $2, $3, $4, $5)
                ",
            )
            .bind(&record.name)
            .bind(&record.category)
            .bind(record.price)
            .bind(record.quantity_sold)
            .bind(record.rating)
            .execute(&mut *tx)
            .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(rows = written, "Appended product records");
        Ok(written)
    }

    async fn read_all(&self) -> Result<Vec<ProductRecord>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT name, category, price, quantity_sold, rating
            FROM product
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRecord::from).collect())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
