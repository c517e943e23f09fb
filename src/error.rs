//! Error types for the FinStock application.

use thiserror::Error;

/// The main error type for FinStock.
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// HTTP 429 from the quote provider.
    #[error("Rate limited by the quote provider")]
    RateLimited,

    /// HTTP 5xx from the quote provider.
    #[error("Server error: HTTP {0}")]
    Server(u16),

    /// Any other non-success HTTP status.
    #[error("Unexpected HTTP status {0}")]
    Http(u16),

    /// Network connectivity errors (connect, DNS, broken request)
    #[error("Network error: {0}")]
    Network(String),

    /// The connectivity monitor reports the API host unreachable.
    #[error("Offline")]
    Offline,

    /// The provider answered with a usage notice instead of data.
    #[error("API limit reached: {0}")]
    ApiLimitReached(String),

    /// The provider returned no data for the requested symbol.
    #[error("No data found for {0}")]
    NotFound(String),

    /// Response body did not match the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Channel communication errors
    #[error("Channel error: {0}")]
    Channel(String),

    /// Invalid input or state
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic application error
    #[error("{0}")]
    Application(String),
}

/// Alias for Result with our Error type.
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if let Some(status) = err.status() {
            Self::from_status(status.as_u16())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl Error {
    /// Classify a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            500..=599 => Self::Server(status),
            _ => Self::Http(status),
        }
    }

    /// Create a new config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new channel error.
    pub fn channel(msg: impl Into<String>) -> Self {
        Self::Channel(msg.into())
    }

    /// Create a new decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a new invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new network error.
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    /// Create a new application error.
    pub fn application(msg: impl Into<String>) -> Self {
        Self::Application(msg.into())
    }

    /// Check if this error is recoverable (user can retry).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Timeout
                | Self::RateLimited
                | Self::Server(_)
                | Self::Network(_)
                | Self::Offline
                | Self::ApiLimitReached(_)
        )
    }

    /// The message shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Timeout => "Request timed out. Please try again.",
            Self::RateLimited => "API rate limit exceeded. Please try again later.",
            Self::Server(_) => "Server error. Please try again later.",
            Self::Network(_) => "Network error. Please check your internet connection.",
            Self::Offline => "No internet connection. Please check your network and try again.",
            Self::ApiLimitReached(_) => "API limit reached. Please try again later.",
            Self::NotFound(_) => "No data found for this symbol.",
            _ => "Something went wrong. Please try again later.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(Error::from_status(429), Error::RateLimited));
        assert!(matches!(Error::from_status(500), Error::Server(500)));
        assert!(matches!(Error::from_status(503), Error::Server(503)));
        assert!(matches!(Error::from_status(404), Error::Http(404)));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::RateLimited.user_message(),
            "API rate limit exceeded. Please try again later."
        );
        assert_eq!(
            Error::Server(502).user_message(),
            "Server error. Please try again later."
        );
        assert_eq!(
            Error::network("connection refused").user_message(),
            "Network error. Please check your internet connection."
        );
        assert_eq!(
            Error::ApiLimitReached("Thank you for using".into()).user_message(),
            "API limit reached. Please try again later."
        );
        assert_eq!(
            Error::Http(404).user_message(),
            "Something went wrong. Please try again later."
        );
        assert_eq!(
            Error::decode("missing field").user_message(),
            "Something went wrong. Please try again later."
        );
    }

    #[test]
    fn test_recoverable() {
        assert!(Error::Timeout.is_recoverable());
        assert!(Error::Offline.is_recoverable());
        assert!(!Error::NotFound("XYZ".into()).is_recoverable());
        assert!(!Error::invalid_input("blank").is_recoverable());
    }
}
