use anyhow::Context;
use prodline_core::dashboard::DashboardSummary;
use prodline_core::query::StoreStatus;
use serde::de::DeserializeOwned;

/// Reads dashboard views from a running `prodline serve`.
pub struct DashboardClient {
    http: reqwest::Client,
    base: String,
}

impl DashboardClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub async fn summary(&self) -> anyhow::Result<DashboardSummary> {
        self.get_json("/api/summary").await
    }

    pub async fn status(&self) -> anyhow::Result<StoreStatus> {
        self.get_json("/api/status").await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let url = format!("{}{path}", self.base);
        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("connect dashboard server {url}"))?;

        if !resp.status().is_success() {
            anyhow::bail!("{url} responded with status {}", resp.status());
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("decode response from {url}"))
    }
}
