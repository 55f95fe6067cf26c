// crates/revenue-core/src/error.rs

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("reporting window ends on {end} which precedes its start {start}")]
pub struct InvalidRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("failed to read source table {table}: {source}")]
    Query {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("{table} row {row} is malformed: {reason}")]
    MalformedRow {
        table: &'static str,
        row: usize,
        reason: String,
    },

    #[error("product {sku_id} appears more than once in the product table")]
    DuplicateProduct { sku_id: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var} must be a YYYY-MM-DD date, got '{value}'")]
    InvalidDate {
        var: &'static str,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// Post-load consistency failure. Never fatal: the load is already committed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation checks failed: {}", .failed.join(", "))]
pub struct ValidationWarning {
    pub failed: Vec<String>,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRangeError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Database operation failed: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Data processing error: {0}")]
    Processing(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
