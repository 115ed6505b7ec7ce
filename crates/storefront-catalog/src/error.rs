//! # Catalog Error Types
//!
//! Error types for fetching the catalog and loading configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Error Categories                           │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  FetchError                  │   │  ConfigError                 │   │
//! │  │                              │   │                              │   │
//! │  │  Transport  (unreachable)    │   │  InvalidConfig               │   │
//! │  │  Timeout                     │   │  InvalidUrl                  │   │
//! │  │  Status     (non-2xx)        │   │  LoadFailed                  │   │
//! │  │  Decode     (bad body)       │   │  SaveFailed                  │   │
//! │  └──────────────┬───────────────┘   └──────────────────────────────┘   │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │   CatalogLoader folds every FetchError into one "fetch failed"         │
//! │   signal: retry while budget remains, then LoadState::Error.           │
//! │   No FetchError ever reaches the rendering layer.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Fetch Errors
// =============================================================================

/// A single failed attempt to fetch the catalog.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connect, reset).
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The request did not complete in time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// The server answered with a non-success status code.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// The body was not a JSON array of product-shaped records.
    #[error("Failed to decode catalog: {0}")]
    Decode(String),
}

impl FetchError {
    /// Short category name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::Timeout(_) => "timeout",
            FetchError::Status { .. } => "status",
            FetchError::Decode(_) => "decode",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Configuration loading and validation failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A setting has an unusable value.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    /// The endpoint URL is not http(s).
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    SaveFailed(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FetchError::Status { status: 503 };
        assert_eq!(err.to_string(), "HTTP error! status: 503");
        assert_eq!(err.kind(), "status");
    }

    #[test]
    fn test_json_error_is_decode() {
        let err: FetchError = serde_json::from_str::<Vec<i64>>("{}").unwrap_err().into();
        assert!(matches!(err, FetchError::Decode(_)));
    }
}
