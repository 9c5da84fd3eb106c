use prodline_core::error::{ProdlineError, Result};
use prodline_core::model::Reading;
use reqwest::Client;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue};

/// Posts readings to a `/submitData` endpoint. One attempt per reading, no
/// timeout beyond the client defaults.
#[derive(Clone)]
pub struct SensorClient {
    http: Client,
    url: String,
}

impl SensorClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| ProdlineError::Transport(format!("failed to build http client: {e}")))?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fails on connection errors and on any non-2xx status.
    pub async fn submit(&self, reading: &Reading) -> Result<StatusCode> {
        let resp = self
            .http
            .post(&self.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(reading)
            .send()
            .await
            .map_err(|e| ProdlineError::Transport(format!("post to {} failed: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProdlineError::Transport(format!(
                "{} responded {status}: {body}",
                self.url
            )));
        }
        Ok(status)
    }
}
