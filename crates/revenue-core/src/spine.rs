use polars::prelude::*;
use tracing::info;

use crate::model::{DATE_ID, PRICE, SKU_ID};

/// Cross joins every product with every day so that each product has a row for
/// each day of the window, sold or not. Output columns: `sku_id, date_id, price`.
pub fn build_spine(products: &DataFrame, day_ids: &[String]) -> PolarsResult<DataFrame> {
    info!("Creating product-date spine");

    let days = df!(DATE_ID => day_ids.iter().map(String::as_str).collect::<Vec<_>>())?;

    let spine = products
        .clone()
        .lazy()
        .select([col(SKU_ID).cast(DataType::String), col(PRICE).cast(DataType::Float64)])
        .cross_join(days.lazy(), None)
        .select([col(SKU_ID), col(DATE_ID), col(PRICE)])
        .sort([SKU_ID, DATE_ID], SortMultipleOptions::default())
        .collect()?;

    info!(rows = spine.height(), "Created product-date combinations");
    Ok(spine)
}
