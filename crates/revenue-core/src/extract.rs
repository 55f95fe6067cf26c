use std::collections::HashSet;

use tracing::info;

use crate::date_range::DateRange;
use crate::db::DbPool;
use crate::error::ExtractionError;
use crate::model::{Product, SalesTransaction};

const PRODUCT_TABLE: &str = "product";
const SALES_TABLE: &str = "sales";

#[derive(Debug, sqlx::FromRow)]
struct ProductRecord {
    sku_id: Option<String>,
    sku_description: Option<String>,
    price: Option<f64>,
}

#[derive(Debug, sqlx::FromRow)]
struct SalesRecord {
    sku_id: Option<String>,
    date_id: Option<String>,
    sales: Option<i64>,
}

/// Reads every product. Identifiers are cast to text so they join with the
/// sales side regardless of how the source column is typed.
pub async fn fetch_products(pool: &DbPool) -> Result<Vec<Product>, ExtractionError> {
    let records: Vec<ProductRecord> = sqlx::query_as(
        r#"
        SELECT
            CAST(sku_id AS TEXT) AS sku_id,
            sku_description,
            CAST(price AS REAL) AS price
        FROM product
        ORDER BY sku_id
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(|source| ExtractionError::Query {
        table: PRODUCT_TABLE,
        source,
    })?;

    let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
    let mut products = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let sku_id = record
            .sku_id
            .ok_or_else(|| malformed(PRODUCT_TABLE, row, "sku_id is NULL"))?;
        let price = record
            .price
            .ok_or_else(|| malformed(PRODUCT_TABLE, row, "price is NULL"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(malformed(
                PRODUCT_TABLE,
                row,
                format!("price {} is not a non-negative amount", price),
            ));
        }
        if !seen.insert(sku_id.clone()) {
            return Err(ExtractionError::DuplicateProduct { sku_id });
        }

        products.push(Product {
            sku_id,
            sku_description: record.sku_description,
            price,
        });
    }

    info!(table = PRODUCT_TABLE, rows = products.len(), "Extracted rows");
    Ok(products)
}

/// Reads the sales lines whose order day falls inside `window`, truncating the
/// order timestamp to its calendar day. Lines whose timestamp SQLite cannot
/// read as a date are selected too, so they surface as malformed rows.
pub async fn fetch_sales(
    pool: &DbPool,
    window: &DateRange,
) -> Result<Vec<SalesTransaction>, ExtractionError> {
    let records: Vec<SalesRecord> = sqlx::query_as(
        r#"
        SELECT
            CAST(sku_id AS TEXT) AS sku_id,
            DATE(orderdate_utc) AS date_id,
            CAST(sales AS INTEGER) AS sales
        FROM sales
        WHERE DATE(orderdate_utc) IS NULL
           OR DATE(orderdate_utc) BETWEEN ?1 AND ?2
        "#,
    )
    .bind(window.start_id())
    .bind(window.end_id())
    .fetch_all(pool)
    .await
    .map_err(|source| ExtractionError::Query {
        table: SALES_TABLE,
        source,
    })?;

    let mut transactions = Vec::with_capacity(records.len());

    for (row, record) in records.into_iter().enumerate() {
        let sku_id = record
            .sku_id
            .ok_or_else(|| malformed(SALES_TABLE, row, "sku_id is NULL"))?;
        let date_id = record
            .date_id
            .ok_or_else(|| malformed(SALES_TABLE, row, "orderdate_utc is not a date"))?;
        let sales = record
            .sales
            .ok_or_else(|| malformed(SALES_TABLE, row, "sales is NULL"))?;
        if sales < 0 {
            return Err(malformed(
                SALES_TABLE,
                row,
                format!("sales quantity {} is negative", sales),
            ));
        }

        transactions.push(SalesTransaction {
            sku_id,
            date_id,
            sales,
        });
    }

    info!(table = SALES_TABLE, rows = transactions.len(), "Extracted rows");
    Ok(transactions)
}

fn malformed(table: &'static str, row: usize, reason: impl Into<String>) -> ExtractionError {
    ExtractionError::MalformedRow {
        table,
        row,
        reason: reason.into(),
    }
}
