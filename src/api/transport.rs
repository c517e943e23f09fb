//! HTTP transport for the quote provider.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Issues GET requests against the provider's `query` endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform a GET with the given query parameters and decode the JSON body.
    async fn get(&self, params: Vec<(&'static str, String)>) -> Result<Value>;

    /// Whether the provider host is reachable.
    async fn probe(&self) -> bool;
}

/// [`Transport`] backed by `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    query_url: String,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("finstock/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(Self {
            client,
            query_url: format!("{base_url}/query"),
            base_url,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, params: Vec<(&'static str, String)>) -> Result<Value> {
        let response = self.client.get(&self.query_url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::from_status(status.as_u16()));
        }

        let body = response.json::<Value>().await?;
        Ok(body)
    }

    async fn probe(&self) -> bool {
        self.client
            .head(&self.base_url)
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .is_ok()
    }
}
