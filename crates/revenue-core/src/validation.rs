use serde::Serialize;
use tracing::{info, warn};

use crate::db::DbPool;
use crate::error::{Result, ValidationWarning};

/// Largest accepted gap between stored revenue and `price * sales`.
pub const REVENUE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationCheck {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|check| check.passed)
    }

    pub fn check(&self, name: &str) -> Option<&ValidationCheck> {
        self.checks.iter().find(|check| check.name == name)
    }

    pub fn warning(&self) -> Option<ValidationWarning> {
        let failed: Vec<String> = self
            .checks
            .iter()
            .filter(|check| !check.passed)
            .map(|check| check.name.to_string())
            .collect();
        if failed.is_empty() {
            None
        } else {
            Some(ValidationWarning { failed })
        }
    }
}

/// Runs the post-load checks against the persisted revenue table. Each check is
/// independent; a failure is reported, never raised.
pub async fn validate_results(
    pool: &DbPool,
    expected_products: usize,
    expected_days: usize,
) -> Result<ValidationReport> {
    info!("Running validation checks");

    let actual: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM revenue")
        .fetch_one(pool)
        .await?;
    let expected = (expected_products * expected_days) as i64;

    let nulls: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(CASE WHEN sku_id IS NULL OR date_id IS NULL OR price IS NULL THEN 1 ELSE 0 END), 0)
        FROM revenue
        "#,
    )
    .fetch_one(pool)
    .await?;

    let mismatches: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM revenue WHERE ABS(revenue - (price * sales)) > ?1")
            .bind(REVENUE_TOLERANCE)
            .fetch_one(pool)
            .await?;

    let report = ValidationReport {
        checks: vec![
            ValidationCheck {
                name: "Row count",
                passed: actual == expected,
                detail: format!("{} rows, expected {}", actual, expected),
            },
            ValidationCheck {
                name: "NULL check",
                passed: nulls == 0,
                detail: format!("{} rows with NULL keys or price", nulls),
            },
            ValidationCheck {
                name: "Revenue calc",
                passed: mismatches == 0,
                detail: format!("{} rows outside tolerance", mismatches),
            },
        ],
    };

    for check in &report.checks {
        if check.passed {
            info!(check = check.name, detail = %check.detail, "PASS");
        } else {
            warn!(check = check.name, detail = %check.detail, "FAIL");
        }
    }

    Ok(report)
}
