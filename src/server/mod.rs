mod charts;
pub mod config;
mod http_layers;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use charts::make_chart_routes;
pub use server::{make_app, run_server};
