//! HTTP client wrapper for the chart routes

use reqwest::{Client, Response};

pub struct TestClient {
    pub client: Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("Request failed")
    }

    /// GET /
    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    /// GET /v1/charts/coverage
    pub async fn get_coverage(&self) -> Response {
        self.get("/v1/charts/coverage").await
    }

    /// GET /v1/charts/weeks
    pub async fn get_weeks(&self) -> Response {
        self.get("/v1/charts/weeks").await
    }

    /// GET /v1/charts/{year}/{month}
    pub async fn get_chart(&self, year: i32, month: u32) -> Response {
        self.get(&format!("/v1/charts/{}/{}", year, month)).await
    }
}
