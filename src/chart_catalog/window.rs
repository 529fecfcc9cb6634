use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Inclusive span of months covered by the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub earliest_year: i32,
    pub earliest_month: u32,
    pub latest_year: i32,
    pub latest_month: u32,
}

impl DateWindow {
    pub fn from_bounds(earliest: NaiveDate, latest: NaiveDate) -> DateWindow {
        DateWindow {
            earliest_year: earliest.year(),
            earliest_month: earliest.month(),
            latest_year: latest.year(),
            latest_month: latest.month(),
        }
    }

    /// The (earliest year, latest year) pair callers use to bound their input.
    pub fn years(&self) -> (i32, i32) {
        (self.earliest_year, self.latest_year)
    }
}
