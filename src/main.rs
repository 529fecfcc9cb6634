use anyhow::{Context, Result};
use billboard_chart_server::chart::ChartService;
use billboard_chart_server::chart_catalog::CatalogLoader;
use billboard_chart_server::config::{AppConfig, CliConfig, FileConfig};
use billboard_chart_server::server::{run_server, RequestsLoggingLevel};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding "Hot Stuff.csv" and "Hot 100 Audio Features.csv".
    #[clap(value_parser = parse_path)]
    pub dataset_dir: Option<PathBuf>,

    /// Optional TOML config file, its values override the command line.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The max-age, in seconds, advertised on chart responses.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// How long, in seconds, a resolved chart is memoized. 0 disables it.
    #[clap(long, default_value_t = 86400)]
    pub chart_cache_ttl_sec: u64,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            dataset_dir: self.dataset_dir.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            chart_cache_ttl_sec: self.chart_cache_ttl_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Loading dataset at {:?}...", config.dataset_dir);
    let loader = CatalogLoader::with_files(&config.dataset_dir, config.dataset_files.clone());
    let catalog = match loader.load() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Could not load the chart dataset: {}", err);
            return Err(err.into());
        }
    };

    let chart_service = Arc::new(ChartService::new(catalog, config.chart_cache_ttl()));

    if !config.chart_cache_ttl().is_zero() {
        let purging_service = chart_service.clone();
        let interval = config.chart_cache_ttl();
        info!("Purging memoized charts every {}s", interval.as_secs());

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick, wait for the first interval
            ticker.tick().await;

            loop {
                ticker.tick().await;
                purging_service.purge_expired_charts();
            }
        });
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(config.server_config(), chart_service).await
}
