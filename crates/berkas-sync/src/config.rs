//! # Gateway Configuration
//!
//! Configuration for the remote mirroring gateway.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Explicit path passed by the caller                                 │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/berkas/gateway.toml (Linux)                              │
//! │     ~/Library/Application Support/com.berkas.app/gateway.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     No endpoint; mirroring is disabled until one is configured         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gateway.toml
//! endpoint_url = "https://script.google.com/macros/s/XXXX/exec"
//! connect_timeout_secs = 10
//! max_pull_retries = 3
//! retry_delay_ms = 1500
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{SyncError, SyncResult};

/// Mirror payload cap: a record bigger than this stays local.
/// The hosted endpoint truncates larger bodies silently, which is worse
/// than an honest refusal.
pub const DEFAULT_MAX_PAYLOAD_BYTES: usize = 9 * 1024 * 1024;

/// Gateway configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// The hosted sheet endpoint URL. `None` disables mirroring.
    pub endpoint_url: Option<String>,

    /// Per-request timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Read attempts before a pull gives up.
    pub max_pull_retries: u32,

    /// Fixed delay between pull attempts, in milliseconds.
    pub retry_delay_ms: u64,

    /// Largest serialized record the gateway will mirror.
    pub max_payload_bytes: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        GatewayConfig {
            endpoint_url: None,
            connect_timeout_secs: 10,
            max_pull_retries: 3,
            retry_delay_ms: 1500,
            max_payload_bytes: DEFAULT_MAX_PAYLOAD_BYTES,
        }
    }
}

impl GatewayConfig {
    /// Creates a config pointing at the given endpoint, with defaults
    /// for everything else.
    pub fn with_endpoint(url: impl Into<String>) -> Self {
        GatewayConfig {
            endpoint_url: Some(url.into()),
            ..Default::default()
        }
    }

    /// Loads configuration from file, falling back to defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (gateway.toml)
    pub fn load(config_path: Option<PathBuf>) -> SyncResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading gateway config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load gateway config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SyncResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SyncError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Gateway config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SyncResult<()> {
        if let Some(ref endpoint) = self.endpoint_url {
            let parsed = url::Url::parse(endpoint)?;
            if parsed.scheme() != "http" && parsed.scheme() != "https" {
                return Err(SyncError::InvalidUrl(format!(
                    "Endpoint must be http(s), got: {}",
                    parsed.scheme()
                )));
            }
        }

        if self.max_payload_bytes == 0 {
            return Err(SyncError::InvalidConfig(
                "max_payload_bytes must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Returns the configured endpoint, or the error every remote
    /// operation reports without one.
    pub fn endpoint(&self) -> SyncResult<&str> {
        self.endpoint_url
            .as_deref()
            .ok_or(SyncError::MissingEndpoint)
    }

    /// Default config file location under the platform config dir.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "berkas", "app")
            .map(|dirs| dirs.config_dir().join("gateway.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert!(config.endpoint_url.is_none());
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.max_pull_retries, 3);
        assert_eq!(config.retry_delay_ms, 1500);
        assert_eq!(config.max_payload_bytes, 9 * 1024 * 1024);
    }

    #[test]
    fn test_endpoint_required_for_remote_ops() {
        let config = GatewayConfig::default();
        assert!(matches!(
            config.endpoint(),
            Err(SyncError::MissingEndpoint)
        ));

        let config = GatewayConfig::with_endpoint("https://example.com/exec");
        assert_eq!(config.endpoint().unwrap(), "https://example.com/exec");
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = GatewayConfig::with_endpoint("not a url");
        assert!(config.validate().is_err());

        let config = GatewayConfig::with_endpoint("ftp://example.com");
        assert!(config.validate().is_err());

        let config = GatewayConfig::with_endpoint("https://script.google.com/macros/s/X/exec");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GatewayConfig::with_endpoint("https://example.com/exec");
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: GatewayConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let parsed: GatewayConfig =
            toml::from_str(r#"endpoint_url = "https://example.com/exec""#).unwrap();
        assert_eq!(parsed.max_pull_retries, 3);
        assert_eq!(parsed.retry_delay_ms, 1500);
    }
}
