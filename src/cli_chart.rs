use anyhow::{Context, Result};
use billboard_chart_server::chart::{ChartEntry, ChartLookup, ChartService, Movement};
use billboard_chart_server::chart_catalog::CatalogLoader;
use billboard_chart_server::query::{display_month, ChartQuery};
use billboard_chart_server::search_link::build_search_reference;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_root_dir(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s).canonicalize()?;
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Directory holding the chart dataset.
    #[clap(value_parser = parse_root_dir)]
    pub path: PathBuf,
}

fn format_movement(entry: &ChartEntry) -> String {
    match entry.movement() {
        Movement::New => "NEW".to_string(),
        Movement::Up(n) => format!("+{}", n),
        Movement::Down(n) => format!("-{}", n),
        Movement::Steady => "=".to_string(),
    }
}

fn print_entry(entry: &ChartEntry) {
    let peak = entry
        .peak_rank
        .map(|p| format!("#{}", p))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "#{:<3} {} - {} [{} weeks, peak {}, {}]\n      {}",
        entry.rank,
        entry.title,
        entry.artist,
        entry.weeks_on_chart,
        peak,
        format_movement(entry),
        build_search_reference(&entry.title, &entry.artist),
    );
}

fn print_lookup(service: &ChartService, query: ChartQuery) {
    let display_date = display_month(query.year, query.month);
    match service.lookup(query.year, query.month) {
        ChartLookup::Invalid(err) => println!("{}", err),
        ChartLookup::Missing { .. } => {
            let window = service.window();
            println!(
                "No chart available for {}. The dataset covers {} to {}.",
                display_date,
                display_month(window.earliest_year, window.earliest_month),
                display_month(window.latest_year, window.latest_month),
            );
        }
        ChartLookup::Found { entries, .. } => {
            println!("Top {} - {}\n", entries.len(), display_date);
            for entry in entries.iter() {
                print_entry(entry);
            }
        }
    }
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()?;

    println!("Cli Chart loading dataset at {}...", cli_args.path.display());
    let catalog = CatalogLoader::new(&cli_args.path)
        .load()
        .with_context(|| format!("Could not load dataset at {}", cli_args.path.display()))?;
    // Interactive session, memoize for its whole duration.
    let service = ChartService::new(catalog, Duration::from_secs(u32::MAX as u64));
    let (earliest_year, latest_year) = service.coverage();
    println!("Done! Charts available from {} to {}.", earliest_year, latest_year);

    let stdin = io::stdin();
    loop {
        print!("\nPlease enter a month (YYYY-MM), empty to quit: ");
        io::stdout().flush()?;

        let mut user_input = String::new();
        if stdin.lock().read_line(&mut user_input)? == 0 {
            break;
        }
        let user_input = user_input.trim();
        if user_input.is_empty() || user_input.eq_ignore_ascii_case("quit") {
            break;
        }

        match user_input.parse::<ChartQuery>() {
            Ok(query) => print_lookup(&service, query),
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}
