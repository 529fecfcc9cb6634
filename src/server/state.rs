use axum::extract::FromRef;

use crate::chart::ChartService;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedChartService = Arc<ChartService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub chart_service: GuardedChartService,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, chart_service: GuardedChartService) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            chart_service,
            hash: env!("GIT_HASH").to_string(),
        }
    }
}

impl FromRef<ServerState> for GuardedChartService {
    fn from_ref(input: &ServerState) -> Self {
        input.chart_service.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
