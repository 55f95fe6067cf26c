use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{error, info, info_span, warn, Instrument};

use crate::aggregate::aggregate_sales;
use crate::date_range::DateRange;
use crate::db::DbPool;
use crate::error::Result;
use crate::extract::{fetch_products, fetch_sales};
use crate::load::load_revenue_table;
use crate::model::{products_frame, sales_frame, Product, SalesTransaction};
use crate::revenue::calculate_revenue;
use crate::spine::build_spine;
use crate::validation::{validate_results, ValidationReport};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Completed,
    CompletedWithWarnings,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub window: DateRange,
    pub products: usize,
    pub days: usize,
    pub rows_written: u64,
    pub validation: ValidationReport,
    pub status: RunStatus,
}

/// The TRANSFORM stage: date list, product-date spine, sales aggregation and
/// revenue, entirely in memory.
pub fn transform(
    products: &[Product],
    sales: &[SalesTransaction],
    window: &DateRange,
) -> Result<DataFrame> {
    let day_ids = window.day_ids();
    let spine = build_spine(&products_frame(products)?, &day_ids)?;
    let aggregated = aggregate_sales(&sales_frame(sales)?, window)?;
    calculate_revenue(&spine, &aggregated)
}

/// Runs extract, transform, load and validate against `pool`.
///
/// Validation failures do not fail the run; they downgrade the status to
/// [`RunStatus::CompletedWithWarnings`].
pub async fn run(pool: &DbPool, window: &DateRange) -> Result<RunSummary> {
    let span = info_span!("revenue_pipeline", start = %window.start(), end = %window.end());
    run_stages(pool, window).instrument(span).await
}

async fn run_stages(pool: &DbPool, window: &DateRange) -> Result<RunSummary> {
    info!("Starting revenue pipeline");

    info!(phase = "extract", "Starting phase");
    let products = fetch_products(pool).await?;
    let sales = fetch_sales(pool, window).await?;

    info!(phase = "transform", "Starting phase");
    let revenue = transform(&products, &sales, window).inspect_err(|err| {
        error!(phase = "transform", error = %err, "Pipeline failed");
    })?;

    info!(phase = "load", "Starting phase");
    let rows_written = load_revenue_table(pool, &revenue)
        .await
        .inspect_err(|err| {
            error!(phase = "load", error = %err, "Pipeline failed");
        })?;

    info!(phase = "validate", "Starting phase");
    let validation = validate_results(pool, products.len(), window.len()).await?;

    let status = match validation.warning() {
        None => {
            info!("Pipeline completed successfully");
            RunStatus::Completed
        }
        Some(warning) => {
            warn!(%warning, "Pipeline completed with validation warnings");
            RunStatus::CompletedWithWarnings
        }
    };

    Ok(RunSummary {
        window: *window,
        products: products.len(),
        days: window.len(),
        rows_written,
        validation,
        status,
    })
}
