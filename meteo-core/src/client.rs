use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status code {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse response JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the request failed on the wire or with a non-success status.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Status { .. })
    }
}

/// JSON GET client bound to one base endpoint.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("meteo/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url: base_url.into(), http })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        tracing::debug!(url = %self.base_url, ?query, "GET");

        let res = self
            .http
            .get(&self.base_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .query(query)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
