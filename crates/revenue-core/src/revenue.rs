use polars::prelude::*;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::model::{DATE_ID, PRICE, REVENUE, SALES, SKU_ID};

const CURRENCY_DECIMALS: u32 = 2;

/// Left joins aggregated sales onto the spine and derives revenue.
///
/// Every spine row yields exactly one output row; pairs without sales get
/// `sales = 0` and `revenue = 0.0`.
pub fn calculate_revenue(spine: &DataFrame, aggregated: &DataFrame) -> Result<DataFrame> {
    info!("Joining sales onto spine and calculating revenue");

    let aggregated = aggregated.clone().lazy().select([
        col(SKU_ID).cast(DataType::String),
        col(DATE_ID).cast(DataType::String),
        col(SALES).cast(DataType::Int64),
    ]);

    let joined = spine
        .clone()
        .lazy()
        .join(
            aggregated,
            [col(SKU_ID), col(DATE_ID)],
            [col(SKU_ID), col(DATE_ID)],
            JoinArgs::new(JoinType::Left),
        )
        .sort([SKU_ID, DATE_ID], SortMultipleOptions::default())
        .collect()?;

    if joined.height() != spine.height() {
        return Err(PipelineError::Processing(format!(
            "revenue join produced {} rows for a spine of {}; aggregated sales keys must be unique",
            joined.height(),
            spine.height()
        )));
    }

    let len = joined.height();
    let price = joined.column(PRICE)?.f64()?;
    let quantity = joined.column(SALES)?.i64()?;

    let mut sales: Vec<i64> = Vec::with_capacity(len);
    let mut revenue: Vec<f64> = Vec::with_capacity(len);
    for idx in 0..len {
        let Some(unit_price) = price.get(idx) else {
            return Err(PipelineError::Processing(format!(
                "spine row {} has no price",
                idx
            )));
        };
        // No matching sales line means nothing was sold that day.
        let sold = quantity.get(idx).unwrap_or(0);
        sales.push(sold);
        revenue.push(line_revenue(unit_price, sold));
    }

    let mut output = joined.select([SKU_ID, DATE_ID, PRICE])?;
    output.hstack_mut(&mut [
        Series::new(SALES.into(), sales).into(),
        Series::new(REVENUE.into(), revenue).into(),
    ])?;

    info!(rows = output.height(), "Calculated revenue");
    Ok(output)
}

/// `price * quantity` rounded half away from zero to cents.
pub fn line_revenue(price: f64, quantity: i64) -> f64 {
    Decimal::from_f64(price)
        .and_then(|price| price.checked_mul(Decimal::from(quantity)))
        .and_then(|amount| {
            amount
                .round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
                .to_f64()
        })
        // Out of Decimal range: fall back to float rounding.
        .unwrap_or_else(|| (price * quantity as f64 * 100.0).round() / 100.0)
}
