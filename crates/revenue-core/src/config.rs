use std::path::PathBuf;

use chrono::NaiveDate;

use crate::date_range::{DateRange, DAY_ID_FORMAT};
use crate::error::{ConfigError, Result};

pub const DATABASE_VAR: &str = "REVENUE_DATABASE";
pub const WINDOW_START_VAR: &str = "REVENUE_WINDOW_START";
pub const WINDOW_END_VAR: &str = "REVENUE_WINDOW_END";

pub const DEFAULT_DATABASE: &str = "product_sales.db";
pub const DEFAULT_WINDOW_START: &str = "2025-01-01";
pub const DEFAULT_WINDOW_END: &str = "2025-01-31";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub database: PathBuf,
    pub window: DateRange,
}

impl PipelineConfig {
    /// Resolves the configuration from the process environment. An explicit
    /// `database` argument wins over `REVENUE_DATABASE`.
    pub fn from_env(database: Option<PathBuf>) -> Result<Self> {
        Self::from_lookup(database, |var| std::env::var(var).ok())
    }

    pub fn from_lookup<F>(database: Option<PathBuf>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = database
            .or_else(|| lookup(DATABASE_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

        let start = parse_day(
            WINDOW_START_VAR,
            lookup(WINDOW_START_VAR).as_deref().unwrap_or(DEFAULT_WINDOW_START),
        )?;
        let end = parse_day(
            WINDOW_END_VAR,
            lookup(WINDOW_END_VAR).as_deref().unwrap_or(DEFAULT_WINDOW_END),
        )?;

        Ok(Self {
            database,
            window: DateRange::new(start, end)?,
        })
    }
}

fn parse_day(var: &'static str, value: &str) -> std::result::Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DAY_ID_FORMAT).map_err(|source| {
        ConfigError::InvalidDate {
            var,
            value: value.to_string(),
            source,
        }
    })
}
