//! HTTP fetcher backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use super::JsonFetcher;
use crate::error::FetchError;

/// Fetches JSON over plain HTTP GET.
///
/// No query parameters or auth headers are sent. A request timeout is
/// applied only when one is configured.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    description: String,
}

impl HttpFetcher {
    /// Create a fetcher for the backend at `base_url`.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            description: format!("http: {}", base_url),
        })
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response.json().await?;
        debug!(url, "fetched JSON body");
        Ok(body)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
