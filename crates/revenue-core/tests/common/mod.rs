#![allow(dead_code)]

use std::str::FromStr;

use anyhow::Result;
use revenue_core::db::{self, DbPool};
use sqlx::sqlite::SqliteConnectOptions;
use tokio::runtime::{Builder, Runtime};

pub fn runtime() -> Runtime {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("build tokio runtime")
}

pub async fn memory_pool() -> Result<DbPool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
    Ok(db::connect_with(options).await?)
}

pub async fn create_source_tables(pool: &DbPool) -> Result<()> {
    sqlx::query("CREATE TABLE product (sku_id TEXT, sku_description TEXT, price REAL)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE TABLE sales (order_id INTEGER PRIMARY KEY, sku_id TEXT, orderdate_utc TEXT, sales INTEGER)",
    )
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn insert_product(pool: &DbPool, sku_id: &str, price: f64) -> Result<()> {
    sqlx::query("INSERT INTO product (sku_id, sku_description, price) VALUES (?1, ?2, ?3)")
        .bind(sku_id)
        .bind(format!("Product {}", sku_id))
        .bind(price)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn insert_sale(pool: &DbPool, sku_id: &str, orderdate_utc: &str, sales: i64) -> Result<()> {
    sqlx::query("INSERT INTO sales (sku_id, orderdate_utc, sales) VALUES (?1, ?2, ?3)")
        .bind(sku_id)
        .bind(orderdate_utc)
        .bind(sales)
        .execute(pool)
        .await?;
    Ok(())
}

/// In-memory database with the source tables filled from `products` and `sales`.
pub async fn seeded_pool(products: &[(&str, f64)], sales: &[(&str, &str, i64)]) -> Result<DbPool> {
    let pool = memory_pool().await?;
    create_source_tables(&pool).await?;
    for (sku_id, price) in products {
        insert_product(&pool, sku_id, *price).await?;
    }
    for (sku_id, orderdate_utc, quantity) in sales {
        insert_sale(&pool, sku_id, orderdate_utc, *quantity).await?;
    }
    Ok(pool)
}
