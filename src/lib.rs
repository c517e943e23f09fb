//! # FinStock - Stock Quotes in the Terminal
//!
//! A terminal client for browsing market movers, company details and price
//! history, with locally saved watchlists. Built with ratatui over an
//! Alpha Vantage style quote API.
//!
//! ## Architecture
//!
//! - **App**: Core application lifecycle and the fetch/effect loop
//! - **UI**: Layout and rendering logic
//! - **API**: HTTP transport, response cache and payload conversion
//! - **State**: Centralized store with per-screen slices
//! - **Storage**: Watchlist persistence
//! - **Events**: Input handling and key bindings
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
