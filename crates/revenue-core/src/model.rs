use polars::prelude::*;
use serde::Serialize;

pub const SKU_ID: &str = "sku_id";
pub const SKU_DESCRIPTION: &str = "sku_description";
pub const DATE_ID: &str = "date_id";
pub const PRICE: &str = "price";
pub const SALES: &str = "sales";
pub const REVENUE: &str = "revenue";

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub sku_id: String,
    pub sku_description: Option<String>,
    pub price: f64,
}

/// One sales line, already truncated to its calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesTransaction {
    pub sku_id: String,
    pub date_id: String,
    pub sales: i64,
}

/// A persisted row of the revenue table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RevenueRow {
    pub sku_id: String,
    pub date_id: String,
    pub price: f64,
    pub sales: i64,
    pub revenue: f64,
}

pub fn products_frame(products: &[Product]) -> PolarsResult<DataFrame> {
    df!(
        SKU_ID => products.iter().map(|p| p.sku_id.as_str()).collect::<Vec<_>>(),
        SKU_DESCRIPTION => products.iter().map(|p| p.sku_description.as_deref()).collect::<Vec<_>>(),
        PRICE => products.iter().map(|p| p.price).collect::<Vec<f64>>(),
    )
}

pub fn sales_frame(sales: &[SalesTransaction]) -> PolarsResult<DataFrame> {
    df!(
        SKU_ID => sales.iter().map(|s| s.sku_id.as_str()).collect::<Vec<_>>(),
        DATE_ID => sales.iter().map(|s| s.date_id.as_str()).collect::<Vec<_>>(),
        SALES => sales.iter().map(|s| s.sales).collect::<Vec<i64>>(),
    )
}
