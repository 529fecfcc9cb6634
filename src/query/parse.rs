use std::str::FromStr;
use thiserror::Error;

/// A (year, month) pair typed by a user, e.g. `2021-01` or `1985/7`.
///
/// Parsing only checks the shape of the input, range checks belong to
/// [`validate`](super::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartQueryParseError {
    #[error("Expected a month as YYYY-MM, got \"{0}\"")]
    Malformed(String),
}

impl FromStr for ChartQuery {
    type Err = ChartQueryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ChartQueryParseError::Malformed(s.to_string());
        let (year, month) = s
            .trim()
            .split_once(|c: char| c == '-' || c == '/' || c.is_whitespace())
            .ok_or_else(malformed)?;

        Ok(ChartQuery {
            year: year.trim().parse().map_err(|_| malformed())?,
            month: month.trim().parse().map_err(|_| malformed())?,
        })
    }
}
