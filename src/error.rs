//! Error types for dashkit.

use thiserror::Error;

/// Failure of a remote read.
///
/// A store never propagates this: it is converted to its display string
/// and kept in the store's `error` field.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure, shown verbatim.
    #[error("{0}")]
    Transport(String),

    /// HTTP client error (connect, timeout, body read).
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Status { status: u16 },

    /// The response body is not the expected collection.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Failure while loading an [`ApiConfig`](crate::ApiConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for dashkit operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_is_verbatim() {
        let err = FetchError::Transport("Network Error".to_string());
        assert_eq!(err.to_string(), "Network Error");
    }

    #[test]
    fn status_message_names_the_code() {
        let err = FetchError::Status { status: 404 };
        assert_eq!(err.to_string(), "Request failed with status code 404");
    }
}
