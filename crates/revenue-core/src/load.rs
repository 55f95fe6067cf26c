use polars::prelude::DataFrame;
use sqlx::{QueryBuilder, Sqlite};
use tracing::info;

use crate::db::DbPool;
use crate::error::Result;
use crate::model::{RevenueRow, DATE_ID, PRICE, REVENUE, SALES, SKU_ID};

pub const REVENUE_TABLE: &str = "revenue";

// 5 binds per row keeps each statement well under SQLite's variable limit.
const INSERT_BATCH_ROWS: usize = 1_000;

const CREATE_REVENUE_TABLE: &str = r#"
    CREATE TABLE revenue (
        sku_id TEXT NOT NULL,
        date_id DATE NOT NULL,
        price REAL NOT NULL,
        sales INTEGER NOT NULL DEFAULT 0,
        revenue REAL NOT NULL DEFAULT 0.0
    )
"#;

const CREATE_INDEXES: [&str; 3] = [
    "CREATE INDEX idx_revenue_sku ON revenue(sku_id)",
    "CREATE INDEX idx_revenue_date ON revenue(date_id)",
    "CREATE INDEX idx_revenue_sku_date ON revenue(sku_id, date_id)",
];

/// Replaces the revenue table with `revenue`.
///
/// Drop, create, insert and indexing share one transaction: readers see either
/// the previous table or the complete new one, and any failure leaves the
/// previous table in place.
pub async fn load_revenue_table(pool: &DbPool, revenue: &DataFrame) -> Result<u64> {
    info!(table = REVENUE_TABLE, rows = revenue.height(), "Loading revenue data to database");

    let sku_ids = revenue.column(SKU_ID)?.str()?;
    let date_ids = revenue.column(DATE_ID)?.str()?;
    let prices = revenue.column(PRICE)?.f64()?;
    let sales = revenue.column(SALES)?.i64()?;
    let revenues = revenue.column(REVENUE)?.f64()?;

    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS revenue")
        .execute(&mut *tx)
        .await?;
    sqlx::query(CREATE_REVENUE_TABLE).execute(&mut *tx).await?;
    info!(table = REVENUE_TABLE, "Recreated table");

    let mut written = 0u64;
    let height = revenue.height();
    let mut offset = 0;

    while offset < height {
        let end = (offset + INSERT_BATCH_ROWS).min(height);

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO revenue (sku_id, date_id, price, sales, revenue) ",
        );
        builder.push_values(offset..end, |mut row, idx| {
            row.push_bind(sku_ids.get(idx).map(str::to_owned))
                .push_bind(date_ids.get(idx).map(str::to_owned))
                .push_bind(prices.get(idx))
                .push_bind(sales.get(idx).unwrap_or(0))
                .push_bind(revenues.get(idx).unwrap_or(0.0));
        });

        written += builder.build().execute(&mut *tx).await?.rows_affected();
        offset = end;
    }
    info!(table = REVENUE_TABLE, rows = written, "Inserted rows");

    for statement in CREATE_INDEXES {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    info!(table = REVENUE_TABLE, "Created indexes");

    tx.commit().await?;
    info!("Transaction committed successfully");

    Ok(written)
}

/// Reads the persisted table back in key order.
pub async fn fetch_revenue_rows(pool: &DbPool) -> Result<Vec<RevenueRow>> {
    let rows = sqlx::query_as::<_, RevenueRow>(
        r#"
        SELECT sku_id, date_id, price, sales, revenue
        FROM revenue
        ORDER BY sku_id, date_id
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
