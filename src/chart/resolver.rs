//! Resolution of a canonical month into an ordered chart.

use super::ChartEntry;
use crate::chart_catalog::{ChartCatalog, ChartRow};
use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

/// A Hot 100 week never has more entries than this.
pub const MAX_CHART_ENTRIES: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Column '{column}' holds a non numeric value \"{value}\"")]
    InvalidNumber { column: &'static str, value: String },

    #[error("Column '{column}' must be non-negative, got {value}")]
    NegativeNumber { column: &'static str, value: i64 },

    #[error("Rank {0} is outside 1..=100")]
    RankOutOfRange(u32),

    #[error("Rank {0} appears more than once in the same week")]
    DuplicateRank(u32),

    #[error("Column '{column}' is empty")]
    EmptyText { column: &'static str },
}

fn is_missing(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("nan") || value.eq_ignore_ascii_case("na")
}

/// Converts a numeric cell to a count, `None` when the cell is missing.
///
/// Integral floats ("12.0") are accepted since exported tables sometimes
/// widen integer columns that contain blanks.
fn parse_count(column: &'static str, raw: &str) -> Result<Option<u32>, ConversionError> {
    let value = raw.trim();
    if is_missing(value) {
        return Ok(None);
    }

    let invalid = || ConversionError::InvalidNumber {
        column,
        value: value.to_string(),
    };
    let number = match value.parse::<i64>() {
        Ok(number) => number,
        Err(_) => {
            let float = value.parse::<f64>().map_err(|_| invalid())?;
            if !float.is_finite() || float.fract() != 0.0 {
                return Err(invalid());
            }
            float as i64
        }
    };

    if number < 0 {
        return Err(ConversionError::NegativeNumber {
            column,
            value: number,
        });
    }
    u32::try_from(number).map(Some).map_err(|_| invalid())
}

fn required_text(column: &'static str, raw: &str) -> Result<String, ConversionError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ConversionError::EmptyText { column });
    }
    Ok(value.to_string())
}

fn entry_from_row(row: &ChartRow) -> Result<ChartEntry, ConversionError> {
    let rank = parse_count("Week Position", &row.week_position)?.ok_or_else(|| {
        ConversionError::InvalidNumber {
            column: "Week Position",
            value: row.week_position.clone(),
        }
    })?;
    if rank == 0 || rank as usize > MAX_CHART_ENTRIES {
        return Err(ConversionError::RankOutOfRange(rank));
    }

    // Zero is the dataset's "not on last week's chart" marker.
    let last_week_rank =
        parse_count("Previous Week Position", &row.previous_week_position)?.filter(|r| *r > 0);
    let peak_rank = parse_count("Peak Position", &row.peak_position)?.filter(|r| *r > 0);

    Ok(ChartEntry {
        rank,
        title: required_text("Song", &row.song)?,
        artist: required_text("Performer", &row.performer)?,
        weeks_on_chart: parse_count("Weeks on Chart", &row.weeks_on_chart)?.unwrap_or(0),
        last_week_rank,
        peak_rank,
        is_new: last_week_rank.is_none(),
    })
}

/// Resolves the chart of the month containing `canonical_date`.
///
/// The earliest week of the month is the snapshot. `Ok(None)` means the
/// catalog has no rows for that month.
pub fn try_resolve(
    canonical_date: NaiveDate,
    catalog: &ChartCatalog,
) -> Result<Option<Vec<ChartEntry>>, ConversionError> {
    let month_rows = catalog.rows_in_month(canonical_date.year(), canonical_date.month());
    let snapshot_week = match month_rows.iter().map(|row| row.week_id).min() {
        Some(week) => week,
        None => return Ok(None),
    };

    let mut entries = month_rows
        .iter()
        .filter(|row| row.week_id == snapshot_week)
        .take(MAX_CHART_ENTRIES)
        .map(entry_from_row)
        .collect::<Result<Vec<ChartEntry>, ConversionError>>()?;
    // Stable sort, so the row listed first wins a repeated rank.
    entries.sort_by_key(|entry| entry.rank);
    entries.dedup_by(|duplicate, kept| {
        if duplicate.rank != kept.rank {
            return false;
        }
        warn!(
            "Dropping \"{}\" from week {}: {}",
            duplicate.title,
            snapshot_week,
            ConversionError::DuplicateRank(duplicate.rank)
        );
        true
    });

    debug!(
        "Resolved {} entries for week {} (requested {})",
        entries.len(),
        snapshot_week,
        canonical_date
    );
    Ok(if entries.is_empty() { None } else { Some(entries) })
}

/// Same as [`try_resolve`], but a malformed row is reported and turned into
/// a miss, so that callers only have to handle "no chart for this date".
pub fn resolve(canonical_date: NaiveDate, catalog: &ChartCatalog) -> Option<Vec<ChartEntry>> {
    match try_resolve(canonical_date, catalog) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Could not build chart for {}: {}", canonical_date, err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RawRow<'a> {
        week: (i32, u32, u32),
        position: &'a str,
        last_week: &'a str,
        peak: &'a str,
        weeks: &'a str,
    }

    fn chart_row(raw: RawRow) -> ChartRow {
        ChartRow {
            week_id: NaiveDate::from_ymd_opt(raw.week.0, raw.week.1, raw.week.2).unwrap(),
            week_position: raw.position.to_string(),
            song: format!("Song {}", raw.position),
            performer: format!("Performer {}", raw.position),
            song_id: None,
            weeks_on_chart: raw.weeks.to_string(),
            previous_week_position: raw.last_week.to_string(),
            peak_position: raw.peak.to_string(),
        }
    }

    fn simple_row(week: (i32, u32, u32), position: u32) -> ChartRow {
        let position = position.to_string();
        chart_row(RawRow {
            week,
            position: &position,
            last_week: &position,
            peak: "1",
            weeks: "4",
        })
    }

    fn catalog(rows: Vec<ChartRow>) -> ChartCatalog {
        ChartCatalog::from_rows(rows, vec![]).unwrap()
    }

    fn first_of(year: i32, month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    #[test]
    fn missing_month_is_none() {
        let catalog = catalog(vec![simple_row((2021, 1, 2), 1)]);
        assert_eq!(resolve(first_of(2020, 12), &catalog), None);
        assert_eq!(try_resolve(first_of(1958, 1), &catalog), Ok(None));
    }

    #[test]
    fn picks_earliest_week_and_sorts_by_rank() {
        let catalog = catalog(vec![
            simple_row((2021, 1, 16), 1),
            simple_row((2021, 1, 9), 3),
            simple_row((2021, 1, 9), 1),
            simple_row((2021, 1, 9), 2),
            simple_row((2021, 1, 2), 2),
            simple_row((2021, 1, 2), 1),
            simple_row((2020, 12, 26), 1),
        ]);

        let entries = resolve(first_of(2021, 1), &catalog).unwrap();
        let ranks: Vec<u32> = entries.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2]);
    }

    #[test]
    fn caps_a_week_at_one_hundred_rows() {
        let mut rows: Vec<ChartRow> = (1..=100).rev().map(|p| simple_row((1990, 3, 3), p)).collect();
        // Spurious extra rows past the cap are never looked at.
        rows.push(chart_row(RawRow {
            week: (1990, 3, 3),
            position: "garbage",
            last_week: "",
            peak: "",
            weeks: "",
        }));
        let catalog = catalog(rows);

        let entries = resolve(first_of(1990, 3), &catalog).unwrap();
        assert_eq!(entries.len(), MAX_CHART_ENTRIES);
        assert!(entries.windows(2).all(|w| w[0].rank < w[1].rank));
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[99].rank, 100);
    }

    #[test]
    fn maps_missing_fields_and_new_entries() {
        let catalog = catalog(vec![
            chart_row(RawRow {
                week: (1985, 7, 6),
                position: "1",
                last_week: "4",
                peak: "1",
                weeks: "12",
            }),
            chart_row(RawRow {
                week: (1985, 7, 6),
                position: "2",
                last_week: "",
                peak: "",
                weeks: "",
            }),
            chart_row(RawRow {
                week: (1985, 7, 6),
                position: "3",
                last_week: "0",
                peak: "3.0",
                weeks: "NaN",
            }),
        ]);

        let entries = resolve(first_of(1985, 7), &catalog).unwrap();

        assert_eq!(entries[0].last_week_rank, Some(4));
        assert_eq!(entries[0].peak_rank, Some(1));
        assert_eq!(entries[0].weeks_on_chart, 12);
        assert!(!entries[0].is_new);
        assert_eq!(entries[0].rank_delta(), Some(3));

        assert_eq!(entries[1].last_week_rank, None);
        assert_eq!(entries[1].peak_rank, None);
        assert_eq!(entries[1].weeks_on_chart, 0);
        assert!(entries[1].is_new);

        assert_eq!(entries[2].last_week_rank, None);
        assert_eq!(entries[2].peak_rank, Some(3));
        assert_eq!(entries[2].weeks_on_chart, 0);
        assert!(entries[2].is_new);
        assert_eq!(entries[2].rank_delta(), None);
    }

    #[test]
    fn malformed_number_degrades_to_miss() {
        let catalog = catalog(vec![
            simple_row((2000, 1, 1), 1),
            chart_row(RawRow {
                week: (2000, 1, 1),
                position: "2",
                last_week: "three",
                peak: "1",
                weeks: "1",
            }),
        ]);

        assert_eq!(
            try_resolve(first_of(2000, 1), &catalog),
            Err(ConversionError::InvalidNumber {
                column: "Previous Week Position",
                value: "three".to_string()
            })
        );
        assert_eq!(resolve(first_of(2000, 1), &catalog), None);
    }

    #[test]
    fn keeps_first_row_of_a_repeated_rank() {
        let mut rows: Vec<ChartRow> = (1..=99).map(|p| simple_row((2000, 2, 5), p)).collect();
        rows.push(chart_row(RawRow {
            week: (2000, 2, 5),
            position: "99",
            last_week: "",
            peak: "",
            weeks: "1",
        }));
        let duplicated = catalog(rows);

        let entries = resolve(first_of(2000, 2), &duplicated).unwrap();
        assert_eq!(entries.len(), 99);
        assert!(entries.windows(2).all(|w| w[0].rank < w[1].rank));
        assert_eq!(entries[98].rank, 99);
        assert_eq!(entries[98].last_week_rank, Some(99));
        assert!(!entries[98].is_new);
    }

    #[test]
    fn rejects_out_of_range_ranks() {
        let out_of_range = catalog(vec![simple_row((2000, 3, 4), 101)]);
        assert_eq!(
            try_resolve(first_of(2000, 3), &out_of_range),
            Err(ConversionError::RankOutOfRange(101))
        );
    }

    #[test]
    fn parses_counts() {
        assert_eq!(parse_count("c", "12"), Ok(Some(12)));
        assert_eq!(parse_count("c", " 12.0 "), Ok(Some(12)));
        assert_eq!(parse_count("c", ""), Ok(None));
        assert_eq!(parse_count("c", "nan"), Ok(None));
        assert_eq!(parse_count("c", "NA"), Ok(None));
        assert!(matches!(
            parse_count("c", "-1"),
            Err(ConversionError::NegativeNumber { value: -1, .. })
        ));
        assert!(matches!(
            parse_count("c", "1.5"),
            Err(ConversionError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_count("c", "inf"),
            Err(ConversionError::InvalidNumber { .. })
        ));
    }
}
