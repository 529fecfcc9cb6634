use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::{http_cache, state::*};
use crate::chart::{ChartEntry, ChartLookup};
use crate::chart_catalog::DateWindow;
use crate::query::display_month;
use crate::search_link::build_search_reference;

#[derive(Serialize)]
struct ChartEntryView<'a> {
    #[serde(flatten)]
    entry: &'a ChartEntry,
    rank_delta: Option<i64>,
    search_url: String,
}

impl<'a> From<&'a ChartEntry> for ChartEntryView<'a> {
    fn from(entry: &'a ChartEntry) -> Self {
        ChartEntryView {
            entry,
            rank_delta: entry.rank_delta(),
            search_url: build_search_reference(&entry.title, &entry.artist),
        }
    }
}

#[derive(Serialize)]
struct ChartResponse<'a> {
    key: String,
    display_date: String,
    total: usize,
    entries: Vec<ChartEntryView<'a>>,
}

#[derive(Serialize)]
struct ChartErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    coverage: Option<DateWindow>,
}

async fn get_coverage(State(service): State<GuardedChartService>) -> Json<DateWindow> {
    Json(service.window())
}

async fn get_weeks(State(service): State<GuardedChartService>) -> Json<Vec<String>> {
    let weeks = service
        .catalog()
        .weeks()
        .iter()
        .map(|week| week.format("%Y-%m-%d").to_string())
        .collect();
    Json(weeks)
}

async fn get_chart(
    State(service): State<GuardedChartService>,
    Path((year, month)): Path<(i32, u32)>,
) -> Response {
    match service.lookup(year, month) {
        ChartLookup::Found { key, entries } => Json(ChartResponse {
            key,
            display_date: display_month(year, month),
            total: entries.len(),
            entries: entries.iter().map(ChartEntryView::from).collect(),
        })
        .into_response(),
        ChartLookup::Invalid(err) => (
            StatusCode::BAD_REQUEST,
            Json(ChartErrorResponse {
                error: err.to_string(),
                coverage: None,
            }),
        )
            .into_response(),
        ChartLookup::Missing { .. } => {
            let window = service.window();
            (
                StatusCode::NOT_FOUND,
                Json(ChartErrorResponse {
                    error: format!(
                        "No chart available for {}, charts cover {} to {}",
                        display_month(year, month),
                        display_month(window.earliest_year, window.earliest_month),
                        display_month(window.latest_year, window.latest_month),
                    ),
                    coverage: Some(window),
                }),
            )
                .into_response()
        }
    }
}

pub fn make_chart_routes(state: ServerState) -> Router {
    Router::new()
        .route("/coverage", get(get_coverage))
        .route("/weeks", get(get_weeks))
        .route(
            "/{year}/{month}",
            get(get_chart).layer(middleware::from_fn_with_state(
                state.config.content_cache_age_sec,
                http_cache,
            )),
        )
        .with_state(state)
}
