//! # Sync Error Types
//!
//! Error types for remote mirroring operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sync Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  ServerRejected         │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  InvalidResponse        │ │
//! │  │  ConfigLoad/Save│  │                 │  │  PayloadTooLarge        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every error here is advisory: the local write already happened by     │
//! │  the time a sync error surfaces, and local state stays authoritative.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Sync error type covering all remote-mirroring failures.
///
/// ## Design Principles
/// - Each variant includes enough context for debugging
/// - Errors are categorized for different handling strategies
/// - All errors are `Send + Sync` for async compatibility
#[derive(Debug, Error)]
pub enum SyncError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid gateway configuration.
    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),

    /// No remote endpoint configured; every remote operation needs one.
    #[error("No remote endpoint configured. Set the endpoint URL first.")]
    MissingEndpoint,

    /// Endpoint URL did not parse.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// HTTP transport failure (DNS, connect, TLS, mid-body).
    #[error("Transport failed: {0}")]
    Transport(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// The endpoint answered with an explicit error result.
    #[error("Server rejected the request: {message}")]
    ServerRejected { message: String },

    /// The endpoint answered 200 but the body was not the expected shape.
    #[error("Unparseable server response: {0}")]
    InvalidResponse(String),

    /// Payload exceeds the configured mirror cap, the record stays local.
    #[error("Payload of {size} bytes exceeds the {limit} byte mirror limit")]
    PayloadTooLarge { size: usize, limit: usize },

    /// Failed to serialize a record for the wire.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Local store failure surfaced during a sync flow.
    #[error("Store error during sync: {0}")]
    Store(#[from] berkas_store::StoreError),
}

impl SyncError {
    /// Returns true if the operation is worth retrying.
    ///
    /// Transport hiccups and timeouts are transient; configuration
    /// problems and explicit server rejections are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SyncError::Transport(_) | SyncError::Timeout(_) | SyncError::InvalidResponse(_)
        )
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // reqwest doesn't expose the configured timeout; report the
            // fact, the caller knows its own budget
            SyncError::Timeout(0)
        } else {
            SyncError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        SyncError::Serialization(err.to_string())
    }
}

impl From<url::ParseError> for SyncError {
    fn from(err: url::ParseError) -> Self {
        SyncError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for SyncError {
    fn from(err: toml::de::Error) -> Self {
        SyncError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for SyncError {
    fn from(err: toml::ser::Error) -> Self {
        SyncError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(SyncError::Transport("connection reset".into()).is_retryable());
        assert!(SyncError::Timeout(10).is_retryable());
        assert!(SyncError::InvalidResponse("html error page".into()).is_retryable());

        assert!(!SyncError::MissingEndpoint.is_retryable());
        assert!(!SyncError::InvalidUrl("not a url".into()).is_retryable());
        assert!(!SyncError::ServerRejected {
            message: "unknown action".into()
        }
        .is_retryable());
        assert!(!SyncError::PayloadTooLarge {
            size: 10,
            limit: 5
        }
        .is_retryable());
    }

    #[test]
    fn test_error_messages() {
        let err = SyncError::PayloadTooLarge {
            size: 10_000_000,
            limit: 9_437_184,
        };
        assert!(err.to_string().contains("9437184"));
    }
}
