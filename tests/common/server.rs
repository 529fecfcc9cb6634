//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own dataset directory.

use super::fixtures::create_test_dataset;
use billboard_chart_server::chart::ChartService;
use billboard_chart_server::chart_catalog::CatalogLoader;
use billboard_chart_server::server::{make_app, ServerConfig};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Test server instance backed by the fixture dataset.
///
/// When dropped, the server shuts down and the dataset directory is removed.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// Shared with the server, for assertions on memoization.
    pub chart_service: Arc<ChartService>,

    _temp_dataset_dir: TempDir,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server on a random port
    pub async fn spawn() -> Self {
        let dataset_dir = create_test_dataset().expect("Failed to create test dataset");
        let catalog = CatalogLoader::new(dataset_dir.path())
            .load()
            .expect("Failed to load test dataset");
        let chart_service = Arc::new(ChartService::new(catalog, Duration::from_secs(60)));

        let app = make_app(ServerConfig::default(), chart_service.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr: SocketAddr = listener.local_addr().expect("Failed to get local address");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("Test server failed");
        });

        TestServer {
            base_url: format!("http://{}", addr),
            chart_service,
            _temp_dataset_dir: dataset_dir,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
