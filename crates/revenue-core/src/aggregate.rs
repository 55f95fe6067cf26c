use polars::prelude::*;
use tracing::info;

use crate::date_range::{parse_day_id, DateRange, DAY_ID_FORMAT};
use crate::model::{DATE_ID, SALES, SKU_ID};

/// Sums sales quantities per `(sku_id, date_id)`, ignoring lines outside `window`.
///
/// `date_id` values are truncated to their calendar day and re-rendered as
/// `YYYY-MM-DD`, so they match the spine's day identifiers. A value with no
/// recognizable day is an error.
pub fn aggregate_sales(sales: &DataFrame, window: &DateRange) -> PolarsResult<DataFrame> {
    info!(transactions = sales.height(), "Aggregating sales");

    let sku_column = sales.column(SKU_ID)?.cast(&DataType::String)?;
    let day_column = sales.column(DATE_ID)?.cast(&DataType::String)?;
    let quantity_column = sales.column(SALES)?.cast(&DataType::Int64)?;
    let sku_ids = sku_column.str()?;
    let day_ids = day_column.str()?;
    let quantities = quantity_column.i64()?;

    let mut skus: Vec<Option<&str>> = Vec::new();
    let mut days: Vec<String> = Vec::new();
    let mut counts: Vec<Option<i64>> = Vec::new();

    for idx in 0..sales.height() {
        let raw = day_ids.get(idx).unwrap_or_default();
        let day = parse_day_id(raw).ok_or_else(|| {
            PolarsError::ComputeError(
                format!("sales row {} has no recognizable day: '{}'", idx, raw).into(),
            )
        })?;
        if !window.contains(day) {
            continue;
        }
        skus.push(sku_ids.get(idx));
        days.push(day.format(DAY_ID_FORMAT).to_string());
        counts.push(quantities.get(idx));
    }

    let in_window = df!(
        SKU_ID => skus,
        DATE_ID => days,
        SALES => counts,
    )?;

    let aggregated = in_window
        .lazy()
        .group_by([col(SKU_ID), col(DATE_ID)])
        .agg([col(SALES).sum()])
        .sort([SKU_ID, DATE_ID], SortMultipleOptions::default())
        .collect()?;

    info!(groups = aggregated.height(), "Aggregated sales");
    Ok(aggregated)
}
