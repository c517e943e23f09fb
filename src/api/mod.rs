//! Quote provider integration.
//!
//! This module provides a high-level interface to the quote API,
//! handling the API key, response caching, rate limiting, and data conversion.

mod cache;
mod client;
mod connectivity;
mod converter;
mod endpoint;
mod search;
mod transport;

pub use cache::ResponseCache;
pub use client::{QuoteClient, QuoteClientBuilder};
pub use connectivity::ConnectivityMonitor;
pub use converter::DataConverter;
pub use endpoint::Endpoint;
pub use search::SearchScheduler;
pub use transport::{HttpTransport, Transport};
