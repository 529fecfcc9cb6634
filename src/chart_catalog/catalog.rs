use super::{AudioFeatures, ChartRow, DateWindow, LoadError};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// Read-only, in-memory table of weekly chart rows.
///
/// Rows are kept ordered by week so that a month (or a single week) is always
/// a contiguous slice. Rows sharing a week keep their order from the file.
#[derive(Debug)]
pub struct ChartCatalog {
    rows: Vec<ChartRow>,
    weeks: Vec<NaiveDate>,
    audio_features: HashMap<String, AudioFeatures>,
    window: DateWindow,
}

impl ChartCatalog {
    pub fn from_rows(
        mut rows: Vec<ChartRow>,
        audio_features: Vec<AudioFeatures>,
    ) -> Result<ChartCatalog, LoadError> {
        rows.sort_by_key(|row| row.week_id);

        let (first, last) = match (rows.first(), rows.last()) {
            (Some(first), Some(last)) => (first.week_id, last.week_id),
            _ => return Err(LoadError::EmptyCatalog),
        };

        let mut weeks: Vec<NaiveDate> = rows.iter().map(|row| row.week_id).collect();
        weeks.dedup();

        let audio_features = audio_features
            .into_iter()
            .map(|features| (features.song_id.clone(), features))
            .collect();

        Ok(ChartCatalog {
            rows,
            weeks,
            audio_features,
            window: DateWindow::from_bounds(first, last),
        })
    }

    pub fn window(&self) -> DateWindow {
        self.window
    }

    /// (earliest year, latest year) present in the catalog.
    pub fn coverage(&self) -> (i32, i32) {
        self.window.years()
    }

    /// Distinct week identifiers, ascending.
    pub fn weeks(&self) -> &[NaiveDate] {
        &self.weeks
    }

    pub fn get_rows_count(&self) -> usize {
        self.rows.len()
    }

    pub fn get_weeks_count(&self) -> usize {
        self.weeks.len()
    }

    pub fn get_audio_features_count(&self) -> usize {
        self.audio_features.len()
    }

    pub fn get_audio_features(&self, song_id: &str) -> Option<&AudioFeatures> {
        self.audio_features.get(song_id)
    }

    /// All the rows whose week falls in the given calendar month, ordered by week.
    pub fn rows_in_month(&self, year: i32, month: u32) -> &[ChartRow] {
        let key = (year, month);
        let start = self
            .rows
            .partition_point(|row| (row.week_id.year(), row.week_id.month()) < key);
        let end = start
            + self.rows[start..]
                .partition_point(|row| (row.week_id.year(), row.week_id.month()) == key);
        &self.rows[start..end]
    }
}
