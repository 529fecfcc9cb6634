//! Validation of a requested (year, month) against the catalog coverage.

use super::month_name;
use crate::chart_catalog::DateWindow;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Year must be between {earliest} and {latest}")]
    YearOutOfRange { year: i32, earliest: i32, latest: i32 },

    #[error("Month must be between 1 and 12")]
    MonthOutOfRange { month: u32 },

    #[error("For {year}, charts are only available up to {latest_month_name}")]
    BeyondLatestMonth {
        year: i32,
        month: u32,
        latest_month_name: &'static str,
    },

    #[error("{year}-{month:02} is not a valid date")]
    InvalidDate { year: i32, month: u32 },
}

/// Checks a requested month against the coverage window and returns the
/// first day of that month, the key charts are looked up by.
///
/// Rules are checked in order and the first failing one is reported.
pub fn validate(year: i32, month: u32, window: &DateWindow) -> Result<NaiveDate, ValidationError> {
    if year < window.earliest_year || year > window.latest_year {
        return Err(ValidationError::YearOutOfRange {
            year,
            earliest: window.earliest_year,
            latest: window.latest_year,
        });
    }

    if !(1..=12).contains(&month) {
        return Err(ValidationError::MonthOutOfRange { month });
    }

    if year == window.latest_year && month > window.latest_month {
        return Err(ValidationError::BeyondLatestMonth {
            year,
            month,
            latest_month_name: month_name(window.latest_month).unwrap_or("the latest month"),
        });
    }

    NaiveDate::from_ymd_opt(year, month, 1).ok_or(ValidationError::InvalidDate { year, month })
}
