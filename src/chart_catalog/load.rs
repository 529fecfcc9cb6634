//! Dataset loading.
//!
//! The dataset directory holds two CSV tables: the weekly chart positions and
//! the per-song audio features. Both are read once, the first time
//! [`CatalogLoader::load`] is called.

use super::{AudioFeatureColumns, AudioFeatures, ChartCatalog, ChartColumns, ChartRow};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use once_cell::sync::OnceCell;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_CHART_FILE: &str = "Hot Stuff.csv";
pub const DEFAULT_AUDIO_FEATURES_FILE: &str = "Hot 100 Audio Features.csv";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset path does not exist: {}", .0.display())]
    MissingPath(PathBuf),

    #[error("Could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed table {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Missing required column \"{column}\" in {}", .path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("Invalid week identifier \"{value}\" at line {line} of {}", .path.display())]
    InvalidWeekId {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("The chart table has no rows")]
    EmptyCatalog,
}

/// File names of the two tables inside the dataset directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetFiles {
    pub chart_file: String,
    pub audio_features_file: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        DatasetFiles {
            chart_file: DEFAULT_CHART_FILE.to_string(),
            audio_features_file: DEFAULT_AUDIO_FEATURES_FILE.to_string(),
        }
    }
}

/// Parses a week identifier, either in the dataset's `M/D/YYYY` form or ISO.
pub fn parse_week_id(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%m/%d/%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .ok()
}

fn open_table(path: &Path) -> Result<csv::Reader<File>, LoadError> {
    if !path.exists() {
        return Err(LoadError::MissingPath(path.to_owned()));
    }
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_owned(),
        source,
    })?;
    Ok(csv::Reader::from_reader(file))
}

fn read_headers(reader: &mut csv::Reader<File>, path: &Path) -> Result<StringRecord, LoadError> {
    reader.headers().cloned().map_err(|source| LoadError::Csv {
        path: path.to_owned(),
        source,
    })
}

fn field(record: &StringRecord, index: usize) -> String {
    record.get(index).unwrap_or_default().trim().to_string()
}

fn optional_field(record: &StringRecord, index: Option<usize>) -> Option<String> {
    index
        .map(|index| field(record, index))
        .filter(|value| !value.is_empty())
}

pub(super) fn read_chart_rows(path: &Path) -> Result<Vec<ChartRow>, LoadError> {
    let mut reader = open_table(path)?;
    let headers = read_headers(&mut reader, path)?;
    let columns = ChartColumns::from_headers(&headers, path)?;

    let mut rows = vec![];
    for record_result in reader.records() {
        let record = record_result.map_err(|source| LoadError::Csv {
            path: path.to_owned(),
            source,
        })?;
        let raw_week_id = field(&record, columns.week_id);
        let week_id = parse_week_id(&raw_week_id).ok_or_else(|| LoadError::InvalidWeekId {
            path: path.to_owned(),
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            value: raw_week_id.clone(),
        })?;

        rows.push(ChartRow {
            week_id,
            week_position: field(&record, columns.week_position),
            song: field(&record, columns.song),
            performer: field(&record, columns.performer),
            song_id: optional_field(&record, columns.song_id),
            weeks_on_chart: field(&record, columns.weeks_on_chart),
            previous_week_position: field(&record, columns.previous_week_position),
            peak_position: field(&record, columns.peak_position),
        });
    }
    Ok(rows)
}

pub(super) fn read_audio_features(path: &Path) -> Result<Vec<AudioFeatures>, LoadError> {
    let mut reader = open_table(path)?;
    let headers = read_headers(&mut reader, path)?;
    let columns = AudioFeatureColumns::from_headers(&headers, path)?;

    let mut features = vec![];
    for record_result in reader.records() {
        let record = record_result.map_err(|source| LoadError::Csv {
            path: path.to_owned(),
            source,
        })?;
        let song_id = field(&record, columns.song_id);
        if song_id.is_empty() {
            debug!("Skipping audio features record without song id: {:?}", record);
            continue;
        }
        features.push(AudioFeatures {
            song_id,
            song: optional_field(&record, columns.song),
            performer: optional_field(&record, columns.performer),
            spotify_genre: optional_field(&record, columns.spotify_genre),
            spotify_track_id: optional_field(&record, columns.spotify_track_id),
        });
    }
    Ok(features)
}

/// Owner of the process-wide catalog.
///
/// The loader is the only way to obtain a [`ChartCatalog`] backed by files;
/// the first successful [`load`](CatalogLoader::load) is kept and every later
/// call hands out the same instance without touching the disk again. A failed
/// load is not cached.
#[derive(Debug)]
pub struct CatalogLoader {
    dataset_dir: PathBuf,
    files: DatasetFiles,
    catalog: OnceCell<Arc<ChartCatalog>>,
}

impl CatalogLoader {
    pub fn new<P: AsRef<Path>>(dataset_dir: P) -> CatalogLoader {
        CatalogLoader::with_files(dataset_dir, DatasetFiles::default())
    }

    pub fn with_files<P: AsRef<Path>>(dataset_dir: P, files: DatasetFiles) -> CatalogLoader {
        CatalogLoader {
            dataset_dir: dataset_dir.as_ref().to_owned(),
            files,
            catalog: OnceCell::new(),
        }
    }

    pub fn dataset_dir(&self) -> &Path {
        &self.dataset_dir
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    pub fn load(&self) -> Result<Arc<ChartCatalog>, LoadError> {
        self.catalog
            .get_or_try_init(|| self.read_catalog().map(Arc::new))
            .cloned()
    }

    fn read_catalog(&self) -> Result<ChartCatalog, LoadError> {
        if !self.dataset_dir.is_dir() {
            return Err(LoadError::MissingPath(self.dataset_dir.clone()));
        }
        let chart_path = self.dataset_dir.join(&self.files.chart_file);
        let audio_features_path = self.dataset_dir.join(&self.files.audio_features_file);

        info!("Reading chart table {}...", chart_path.display());
        let rows = read_chart_rows(&chart_path)?;
        info!("Reading audio features table {}...", audio_features_path.display());
        let audio_features = read_audio_features(&audio_features_path)?;

        let catalog = ChartCatalog::from_rows(rows, audio_features)?;
        let window = catalog.window();
        info!(
            "Catalog has:\n{} chart rows\n{} weeks\n{} audio features records\ncoverage {}-{:02} to {}-{:02}",
            catalog.get_rows_count(),
            catalog.get_weeks_count(),
            catalog.get_audio_features_count(),
            window.earliest_year,
            window.earliest_month,
            window.latest_year,
            window.latest_month,
        );
        Ok(catalog)
    }
}
