//! Configuration settings for FinStock.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable prefix, e.g. `FINSTOCK_API__API_KEY`.
const ENV_PREFIX: &str = "FINSTOCK";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// API configuration.
    pub api: ApiConfig,
    /// Response cache lifetimes.
    pub cache: CacheConfig,
    /// UI configuration.
    pub ui: UiConfig,
    /// Local storage configuration.
    pub storage: StorageConfig,
    /// Key bindings.
    pub keybindings: KeyBindings,
}

impl Config {
    /// Load configuration from the default location, falling back to defaults
    /// for anything not set.
    pub fn load_or_default() -> crate::Result<Self> {
        Self::load(None)
    }

    /// Load configuration from file, then overlay `FINSTOCK_*` environment variables.
    pub fn load(path: Option<PathBuf>) -> crate::Result<Self> {
        let config_path = path.unwrap_or_else(Self::default_path);

        let settings = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration to file.
    pub fn save(&self, path: Option<PathBuf>) -> crate::Result<()> {
        let config_path = path.unwrap_or_else(Self::default_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::config(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn default_path() -> PathBuf {
        super::config_dir()
            .map(|p| p.join("config.toml"))
            .unwrap_or_else(|_| PathBuf::from("config.toml"))
    }
}

/// API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Quote provider base URL. Requests go to `{base_url}/query`.
    pub base_url: String,
    /// API key sent as the `apikey` query parameter.
    pub api_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Client-side throttle for cache misses, in requests per minute.
    /// The free Alpha Vantage tier allows 5.
    pub requests_per_minute: u32,
    /// Seconds between connectivity probes.
    pub connectivity_check_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.alphavantage.co".to_string(),
            api_key: "demo".to_string(),
            timeout_secs: 15,
            requests_per_minute: 5,
            connectivity_check_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Time-to-live for cached responses, per endpoint, in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub top_movers_secs: u64,
    pub overview_secs: u64,
    pub daily_series_secs: u64,
    pub weekly_series_secs: u64,
    pub monthly_series_secs: u64,
    pub global_quote_secs: u64,
    pub symbol_search_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            top_movers_secs: 5 * 60,
            overview_secs: 24 * 60 * 60,
            daily_series_secs: 60 * 60,
            weekly_series_secs: 6 * 60 * 60,
            monthly_series_secs: 24 * 60 * 60,
            global_quote_secs: 60,
            symbol_search_secs: 10 * 60,
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Tick rate in milliseconds for UI updates.
    pub tick_rate_ms: u64,
    /// Enable mouse support.
    pub mouse_support: bool,
    /// Number of gainers/losers shown on the home screen.
    pub home_preview_count: usize,
    /// Number of rows added per "load more" on the view-all screen.
    pub page_size: usize,
    /// Delay before a search query is sent, in milliseconds.
    pub search_debounce_ms: u64,
    /// Minimum query length that triggers a search.
    pub min_search_len: usize,
    /// Show status bar.
    pub show_status_bar: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 250,
            mouse_support: true,
            home_preview_count: 4,
            page_size: 10,
            search_debounce_ms: 400,
            min_search_len: 2,
            show_status_bar: true,
        }
    }
}

impl UiConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Local storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Watchlist file. Defaults to `watchlists.json` in the data directory.
    pub watchlist_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the watchlist file location.
    pub fn watchlist_path(&self) -> crate::Result<PathBuf> {
        match &self.watchlist_path {
            Some(path) => Ok(path.clone()),
            None => super::data_dir().map(|dir| dir.join("watchlists.json")),
        }
    }
}

/// Key bindings configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Quit the application.
    pub quit: String,
    /// Show help.
    pub help: String,
    /// Navigate up.
    pub up: String,
    /// Navigate down.
    pub down: String,
    /// Select/confirm.
    pub select: String,
    /// Cancel/back.
    pub back: String,
    /// Refresh data / retry the last failed fetch.
    pub refresh: String,
    /// Switch to home view.
    pub home: String,
    /// Switch to watchlists view.
    pub watchlists: String,
    /// Open search.
    pub search: String,
    /// Toggle gainers/losers focus on the home screen.
    pub switch_section: String,
    /// Open the full list for the focused section.
    pub view_all: String,
    /// Load the next page on the view-all screen.
    pub load_more: String,
    /// Previous chart range.
    pub prev_range: String,
    /// Next chart range.
    pub next_range: String,
    /// Open the watchlist picker for the current stock.
    pub add_to_watchlist: String,
    /// Create a new watchlist.
    pub new_watchlist: String,
    /// Delete the selected watchlist or remove the selected stock.
    pub delete: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: "q".to_string(),
            help: "?".to_string(),
            up: "k".to_string(),
            down: "j".to_string(),
            select: "Enter".to_string(),
            back: "Esc".to_string(),
            refresh: "r".to_string(),
            home: "1".to_string(),
            watchlists: "2".to_string(),
            search: "/".to_string(),
            switch_section: "Tab".to_string(),
            view_all: "v".to_string(),
            load_more: "m".to_string(),
            prev_range: "[".to_string(),
            next_range: "]".to_string(),
            add_to_watchlist: "a".to_string(),
            new_watchlist: "n".to_string(),
            delete: "x".to_string(),
        }
    }
}
