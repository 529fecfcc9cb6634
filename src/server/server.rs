use anyhow::{Context, Result};
use std::time::Duration;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::info;

use super::{log_requests, make_chart_routes, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub chart_rows: usize,
    pub chart_weeks: usize,
    pub cached_charts: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let catalog = state.chart_service.catalog();
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        chart_rows: catalog.get_rows_count(),
        chart_weeks: catalog.get_weeks_count(),
        cached_charts: state.chart_service.cached_charts_count(),
    };
    Json(stats)
}

pub fn make_app(config: ServerConfig, chart_service: GuardedChartService) -> Router {
    let state = ServerState::new(config.clone(), chart_service);

    let chart_routes = make_chart_routes(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1/charts", chart_routes)
        .layer(middleware::from_fn_with_state(state, log_requests))
}

pub async fn run_server(config: ServerConfig, chart_service: GuardedChartService) -> Result<()> {
    let port = config.port;
    let app = make_app(config, chart_service);

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Could not bind port {}", port))?;
    info!("Serving charts on http://127.0.0.1:{}", port);

    Ok(axum::serve(listener, app).await?)
}
