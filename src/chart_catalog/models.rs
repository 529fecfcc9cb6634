use chrono::NaiveDate;
use serde::Serialize;

/// One line of the weekly chart table.
///
/// Numeric columns are kept as the raw text found in the file, they are only
/// converted when a chart gets resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartRow {
    pub week_id: NaiveDate,
    pub week_position: String,
    pub song: String,
    pub performer: String,
    pub song_id: Option<String>,
    pub weeks_on_chart: String,
    pub previous_week_position: String,
    pub peak_position: String,
}

/// A record of the audio features table, keyed by song id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AudioFeatures {
    pub song_id: String,
    pub song: Option<String>,
    pub performer: Option<String>,
    pub spotify_genre: Option<String>,
    pub spotify_track_id: Option<String>,
}
