use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::InvalidRangeError;

/// Day identifiers are rendered in this form everywhere, so both sides of the
/// revenue join compare equal as plain strings.
pub const DAY_ID_FORMAT: &str = "%Y-%m-%d";

/// Calendar day of a `YYYY-MM-DD` identifier or of a timestamp that starts
/// with one (`2025-01-01 09:30:00`, `2025-01-01T09:30:00Z`).
pub fn parse_day_id(raw: &str) -> Option<NaiveDate> {
    let day = raw.trim().split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(day, DAY_ID_FORMAT).ok()
}

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidRangeError> {
        if end < start {
            return Err(InvalidRangeError { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn start_id(&self) -> String {
        self.start.format(DAY_ID_FORMAT).to_string()
    }

    pub fn end_id(&self) -> String {
        self.end.format(DAY_ID_FORMAT).to_string()
    }

    /// Number of calendar days in the window, both ends included.
    pub fn len(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// A window always holds at least its start day.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Every day of the window as a `YYYY-MM-DD` identifier, in order and without gaps.
    pub fn day_ids(&self) -> Vec<String> {
        info!(start = %self.start, end = %self.end, "Generating date list");

        let days: Vec<String> = self
            .start
            .iter_days()
            .take_while(|day| *day <= self.end)
            .map(|day| day.format(DAY_ID_FORMAT).to_string())
            .collect();

        info!(days = days.len(), "Generated dates");
        days
    }
}
