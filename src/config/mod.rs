mod file_config;

pub use file_config::{DatasetConfig, FileConfig};

use crate::chart_catalog::DatasetFiles;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub dataset_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub chart_cache_ttl_sec: u64,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub dataset_dir: PathBuf,
    pub dataset_files: DatasetFiles,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub chart_cache_ttl_sec: u64,
    pub frontend_dir_path: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let dataset_dir = file
            .dataset_dir
            .map(PathBuf::from)
            .or_else(|| cli.dataset_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("dataset_dir must be specified via argument or in config file")
            })?;

        if !dataset_dir.exists() {
            bail!("Dataset directory does not exist: {:?}", dataset_dir);
        }
        if !dataset_dir.is_dir() {
            bail!("dataset_dir is not a directory: {:?}", dataset_dir);
        }

        let dataset_file = file.dataset.unwrap_or_default();
        let defaults = DatasetFiles::default();
        let dataset_files = DatasetFiles {
            chart_file: dataset_file.chart_file.unwrap_or(defaults.chart_file),
            audio_features_file: dataset_file
                .audio_features_file
                .unwrap_or(defaults.audio_features_file),
        };

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        Ok(Self {
            dataset_dir,
            dataset_files,
            port: file.port.unwrap_or(cli.port),
            logging_level,
            content_cache_age_sec: file
                .content_cache_age_sec
                .unwrap_or(cli.content_cache_age_sec),
            chart_cache_ttl_sec: file.chart_cache_ttl_sec.unwrap_or(cli.chart_cache_ttl_sec),
            frontend_dir_path: file
                .frontend_dir_path
                .or_else(|| cli.frontend_dir_path.clone()),
        })
    }

    pub fn chart_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.chart_cache_ttl_sec)
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
        }
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
