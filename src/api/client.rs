//! Quote provider API client wrapper.

use super::cache::ResponseCache;
use super::endpoint::Endpoint;
use super::transport::{HttpTransport, Transport};
use super::DataConverter;
use crate::config::{ApiConfig, CacheConfig};
use crate::error::Result;
use crate::state::{ChartPoint, CompanyDetails, CompanyOverview, SearchMatch, TimeRange, TopMovers};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Builder for creating an API client.
pub struct QuoteClientBuilder {
    config: ApiConfig,
    cache: CacheConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl QuoteClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: ApiConfig::default(),
            cache: CacheConfig::default(),
            transport: None,
        }
    }

    /// Set the API configuration.
    pub fn config(mut self, config: ApiConfig) -> Self {
        self.config = config;
        self
    }

    /// Set per-endpoint cache lifetimes.
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Use a custom transport instead of HTTP.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the API client.
    pub fn build(self) -> Result<QuoteClient> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(&self.config)?),
        };
        Ok(QuoteClient::with_transport(self.config, self.cache, transport))
    }
}

impl Default for QuoteClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// High-level API client for the quote provider.
pub struct QuoteClient {
    /// Configuration.
    config: ApiConfig,
    /// Cache lifetimes.
    cache_config: CacheConfig,
    /// Wire access.
    transport: Arc<dyn Transport>,
    /// Cached response bodies.
    cache: RwLock<ResponseCache>,
    /// Rate limiter state.
    rate_limiter: RwLock<RateLimiter>,
}

impl QuoteClient {
    /// Create a new API client over HTTP.
    pub fn new(config: ApiConfig, cache: CacheConfig) -> Result<Self> {
        QuoteClientBuilder::new().config(config).cache(cache).build()
    }

    fn with_transport(config: ApiConfig, cache_config: CacheConfig, transport: Arc<dyn Transport>) -> Self {
        let rate_limiter = RateLimiter::new(config.requests_per_minute.max(1));
        Self {
            config,
            cache_config,
            transport,
            cache: RwLock::new(ResponseCache::new()),
            rate_limiter: RwLock::new(rate_limiter),
        }
    }

    /// Check whether the provider host is reachable.
    pub async fn probe(&self) -> bool {
        self.transport.probe().await
    }

    /// Fetch top gainers and losers.
    pub async fn fetch_top_movers(&self) -> Result<TopMovers> {
        let body = self.get(Endpoint::TopGainersLosers).await?;
        DataConverter::convert_top_movers(body)
    }

    /// Fetch a company overview.
    pub async fn fetch_company_overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let body = self.get(Endpoint::CompanyOverview(symbol.to_string())).await?;
        DataConverter::convert_overview(symbol, body)
    }

    /// Fetch closing prices for a range.
    pub async fn fetch_time_series(&self, symbol: &str, range: TimeRange) -> Result<Vec<ChartPoint>> {
        let body = self.get(Endpoint::TimeSeries(range, symbol.to_string())).await?;
        DataConverter::convert_time_series(range, body)
    }

    /// Fetch the live price and change percent.
    pub async fn fetch_global_quote(&self, symbol: &str) -> Result<(Option<String>, Option<String>)> {
        let body = self.get(Endpoint::GlobalQuote(symbol.to_string())).await?;
        DataConverter::convert_global_quote(body)
    }

    /// Fetch everything the details screen needs.
    ///
    /// Overview and series failures fail the whole call; a failed quote only
    /// leaves the price fields empty.
    pub async fn fetch_details(
        &self,
        symbol: &str,
        range: TimeRange,
    ) -> Result<(CompanyDetails, Vec<ChartPoint>)> {
        let (overview, chart, quote) = tokio::join!(
            self.fetch_company_overview(symbol),
            self.fetch_time_series(symbol, range),
            self.fetch_global_quote(symbol),
        );

        let overview = overview?;
        let chart = chart?;
        let (price, change_percent) = quote.unwrap_or_else(|e| {
            warn!(symbol, error = %e, "Global quote unavailable, showing overview only");
            (None, None)
        });

        Ok((
            CompanyDetails {
                overview,
                price,
                change_percent,
            },
            chart,
        ))
    }

    /// Search symbols by keywords.
    pub async fn search_symbols(&self, keywords: &str) -> Result<Vec<SearchMatch>> {
        let body = self.get(Endpoint::SymbolSearch(keywords.to_string())).await?;
        DataConverter::convert_search(body)
    }

    /// Drop every cached response.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// GET an endpoint, serving from cache while the entry is fresh.
    async fn get(&self, endpoint: Endpoint) -> Result<Value> {
        let key = endpoint.cache_key();

        if let Some(body) = self.cache.read().await.get(&key) {
            debug!(%key, "Cache hit");
            return Ok(body);
        }
        debug!(%key, "Cache miss");

        self.rate_limit().await?;

        let mut params = endpoint.params();
        params.push(("apikey", self.config.api_key.clone()));

        info!(function = endpoint.function(), "Fetching");
        let body = self.transport.get(params).await?;
        DataConverter::check_notice(&body)?;

        let mut cache = self.cache.write().await;
        cache.purge_expired();
        cache.insert(key, body.clone(), endpoint.ttl(&self.cache_config));
        Ok(body)
    }

    /// Apply rate limiting.
    async fn rate_limit(&self) -> Result<()> {
        let mut limiter = self.rate_limiter.write().await;
        limiter.wait().await
    }
}

/// Simple token-bucket rate limiter.
struct RateLimiter {
    requests_per_minute: u32,
    last_request: tokio::time::Instant,
    tokens: f64,
}

impl RateLimiter {
    fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            last_request: tokio::time::Instant::now(),
            tokens: requests_per_minute as f64,
        }
    }

    fn refill_per_second(&self) -> f64 {
        self.requests_per_minute as f64 / 60.0
    }

    async fn wait(&mut self) -> Result<()> {
        let now = tokio::time::Instant::now();
        let elapsed = now.duration_since(self.last_request).as_secs_f64();

        // Replenish tokens
        self.tokens = (self.tokens + elapsed * self.refill_per_second())
            .min(self.requests_per_minute as f64);

        if self.tokens < 1.0 {
            let wait_time = (1.0 - self.tokens) / self.refill_per_second();
            debug!(wait_secs = wait_time, "Throttling request");
            tokio::time::sleep(std::time::Duration::from_secs_f64(wait_time)).await;
            self.tokens = 1.0;
        }

        self.tokens -= 1.0;
        self.last_request = tokio::time::Instant::now();

        Ok(())
    }
}
