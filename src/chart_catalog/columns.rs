//! Header resolution for the dataset tables.
//!
//! Column names are part of the dataset contract, but the published files
//! have been renamed a few times (snake_case exports, "Rank" instead of
//! "Week Position"...). Headers are normalized and matched against a list of
//! accepted aliases.

use super::LoadError;
use csv::StringRecord;
use std::path::Path;

const WEEK_ID: (&str, &[&str]) = ("WeekID", &["weekid", "week", "chartdate", "date"]);
const WEEK_POSITION: (&str, &[&str]) = ("Week Position", &["weekposition", "rank", "position"]);
const SONG: (&str, &[&str]) = ("Song", &["song", "title", "songtitle"]);
const PERFORMER: (&str, &[&str]) = ("Performer", &["performer", "artist"]);
const SONG_ID: (&str, &[&str]) = ("SongID", &["songid"]);
const WEEKS_ON_CHART: (&str, &[&str]) = ("Weeks on Chart", &["weeksonchart", "weeks"]);
const PREVIOUS_WEEK_POSITION: (&str, &[&str]) = (
    "Previous Week Position",
    &["previousweekposition", "previousweek", "lastweek", "lastweekposition"],
);
const PEAK_POSITION: (&str, &[&str]) = ("Peak Position", &["peakposition", "peak", "peakrank"]);
const SPOTIFY_GENRE: (&str, &[&str]) = ("spotify_genre", &["spotifygenre", "genre"]);
const SPOTIFY_TRACK_ID: (&str, &[&str]) = ("spotify_track_id", &["spotifytrackid", "trackid"]);

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| aliases.contains(&normalize_header(header).as_str()))
}

fn require_column(
    headers: &StringRecord,
    (name, aliases): (&'static str, &[&str]),
    path: &Path,
) -> Result<usize, LoadError> {
    find_column(headers, aliases).ok_or_else(|| LoadError::MissingColumn {
        path: path.to_owned(),
        column: name,
    })
}

/// Field indices of the weekly chart table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartColumns {
    pub week_id: usize,
    pub week_position: usize,
    pub song: usize,
    pub performer: usize,
    pub song_id: Option<usize>,
    pub weeks_on_chart: usize,
    pub previous_week_position: usize,
    pub peak_position: usize,
}

impl ChartColumns {
    pub fn from_headers(headers: &StringRecord, path: &Path) -> Result<ChartColumns, LoadError> {
        Ok(ChartColumns {
            week_id: require_column(headers, WEEK_ID, path)?,
            week_position: require_column(headers, WEEK_POSITION, path)?,
            song: require_column(headers, SONG, path)?,
            performer: require_column(headers, PERFORMER, path)?,
            song_id: find_column(headers, SONG_ID.1),
            weeks_on_chart: require_column(headers, WEEKS_ON_CHART, path)?,
            previous_week_position: require_column(headers, PREVIOUS_WEEK_POSITION, path)?,
            peak_position: require_column(headers, PEAK_POSITION, path)?,
        })
    }
}

/// Field indices of the audio features table. Only the song id is mandatory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AudioFeatureColumns {
    pub song_id: usize,
    pub song: Option<usize>,
    pub performer: Option<usize>,
    pub spotify_genre: Option<usize>,
    pub spotify_track_id: Option<usize>,
}

impl AudioFeatureColumns {
    pub fn from_headers(
        headers: &StringRecord,
        path: &Path,
    ) -> Result<AudioFeatureColumns, LoadError> {
        Ok(AudioFeatureColumns {
            song_id: require_column(headers, SONG_ID, path)?,
            song: find_column(headers, SONG.1),
            performer: find_column(headers, PERFORMER.1),
            spotify_genre: find_column(headers, SPOTIFY_GENRE.1),
            spotify_track_id: find_column(headers, SPOTIFY_TRACK_ID.1),
        })
    }
}
