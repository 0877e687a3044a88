//! # Remote Gateway
//!
//! HTTP client for the hosted sheet endpoint: push, delete, pull, and
//! the calendar hand-off.
//!
//! ## Confidence Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Push Outcome Ladder                                │
//! │                                                                         │
//! │  POST record                                                           │
//! │       │                                                                 │
//! │       ├── 200 + {"result":"success"}     → Receipt: VERIFIED           │
//! │       │                                                                 │
//! │       ├── 200 + unparseable body         → Receipt: UNVERIFIED         │
//! │       │   (endpoint answered, we just can't read the confirmation)     │
//! │       │                                                                 │
//! │       ├── 200 + {"result":"error",...}   → Err(ServerRejected)         │
//! │       │                                                                 │
//! │       └── transport failure                                             │
//! │               │                                                         │
//! │               └── degraded resend, response ignored                     │
//! │                       ├── sent            → Receipt: UNVERIFIED        │
//! │                       └── failed too      → Err(Transport)             │
//! │                                                                         │
//! │  A VERIFIED receipt means the endpoint confirmed the write. An         │
//! │  UNVERIFIED receipt means the bytes left this machine and nothing      │
//! │  came back to confirm or deny. Callers surface the difference.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GatewayConfig;
use crate::error::{SyncError, SyncResult};
use crate::protocol::{
    DeleteEnvelope, PushEnvelope, RecordType, RemoteResponse, SYNC_CALENDAR_ACTION,
};

// =============================================================================
// Receipts
// =============================================================================

/// How sure we are that the remote write happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confidence {
    /// The endpoint confirmed the write.
    Verified,
    /// The request was sent but no confirmation came back.
    Unverified,
}

/// Outcome of a successful push or delete.
#[derive(Debug, Clone)]
pub struct PushReceipt {
    pub confidence: Confidence,
    /// Optional detail from the endpoint or the degraded path.
    pub message: Option<String>,
}

impl PushReceipt {
    fn verified() -> Self {
        PushReceipt {
            confidence: Confidence::Verified,
            message: None,
        }
    }

    fn unverified(message: impl Into<String>) -> Self {
        PushReceipt {
            confidence: Confidence::Unverified,
            message: Some(message.into()),
        }
    }

    /// True when the endpoint confirmed the write.
    pub fn is_verified(&self) -> bool {
        self.confidence == Confidence::Verified
    }
}

// =============================================================================
// SyncGateway
// =============================================================================

/// HTTP gateway to the hosted sheet endpoint.
///
/// ## Usage
/// ```rust,ignore
/// let gateway = SyncGateway::new(GatewayConfig::with_endpoint(url))?;
///
/// let receipt = gateway.push(RecordType::Invoice, &invoice).await?;
/// let remote: Vec<Invoice> = gateway.pull(RecordType::Invoice).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SyncGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl SyncGateway {
    /// Creates a gateway over the given configuration.
    pub fn new(config: GatewayConfig) -> SyncResult<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| SyncError::Transport(e.to_string()))?;

        Ok(SyncGateway { client, config })
    }

    /// The active configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// True when an endpoint is configured and remote calls can be made.
    pub fn is_configured(&self) -> bool {
        self.config.endpoint_url.is_some()
    }

    // =========================================================================
    // Push
    // =========================================================================

    /// Mirrors one record to the endpoint (create and update share this
    /// path; the endpoint upserts by id).
    pub async fn push<T: Serialize>(
        &self,
        record_type: RecordType,
        record: &T,
    ) -> SyncResult<PushReceipt> {
        let envelope = PushEnvelope {
            action: record_type.push_action(),
            data: record,
        };
        let body = serde_json::to_string(&envelope)?;

        self.guard_payload_size(body.len())?;

        debug!(record_type = %record_type, bytes = body.len(), "Pushing record");
        self.send_with_fallback(body).await
    }

    /// Removes one record from the endpoint.
    ///
    /// Deletes are fire-and-forget by protocol: the endpoint never
    /// confirms them, so the best possible outcome is an unverified
    /// receipt.
    pub async fn delete(&self, record_type: RecordType, id: &str) -> SyncResult<PushReceipt> {
        let envelope = DeleteEnvelope {
            action: record_type.delete_action(),
            id,
        };
        let body = serde_json::to_string(&envelope)?;

        debug!(record_type = %record_type, id, "Deleting remote record");
        self.send_fire_and_forget(body).await?;

        Ok(PushReceipt::unverified("delete sent without confirmation"))
    }

    /// Hands a purchase order to the endpoint's calendar integration.
    pub async fn push_calendar_event<T: Serialize>(&self, order: &T) -> SyncResult<PushReceipt> {
        let envelope = PushEnvelope {
            action: SYNC_CALENDAR_ACTION,
            data: order,
        };
        let body = serde_json::to_string(&envelope)?;

        self.guard_payload_size(body.len())?;

        debug!("Pushing calendar event");
        self.send_with_fallback(body).await
    }

    // =========================================================================
    // Pull
    // =========================================================================

    /// Reads a whole remote collection, retrying transient failures.
    ///
    /// ## Retry Policy
    /// Up to `max_pull_retries` attempts with a fixed delay between
    /// them. Only retryable failures re-attempt; a server rejection
    /// surfaces immediately.
    pub async fn pull<T: DeserializeOwned>(&self, record_type: RecordType) -> SyncResult<Vec<T>> {
        let mut last_error = SyncError::Transport("no attempt made".into());

        for attempt in 1..=self.config.max_pull_retries {
            match self.pull_once(record_type).await {
                Ok(records) => {
                    info!(
                        record_type = %record_type,
                        count = records.len(),
                        attempt,
                        "Pulled remote collection"
                    );
                    return Ok(records);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_pull_retries => {
                    warn!(
                        record_type = %record_type,
                        attempt,
                        error = %e,
                        "Pull attempt failed, retrying"
                    );
                    last_error = e;
                    tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error)
    }

    /// One pull attempt.
    async fn pull_once<T: DeserializeOwned>(&self, record_type: RecordType) -> SyncResult<Vec<T>> {
        let endpoint = self.config.endpoint()?;

        // _t busts any intermediate response cache
        let response = self
            .client
            .get(endpoint)
            .query(&[
                ("action", "read"),
                ("type", record_type.query_name()),
                ("_t", &Utc::now().timestamp_millis().to_string()),
            ])
            .send()
            .await?;

        let body = response.text().await?;
        let parsed: RemoteResponse = serde_json::from_str(&body)
            .map_err(|_| SyncError::InvalidResponse(truncate_for_log(&body)))?;

        if !parsed.is_success() {
            return Err(SyncError::ServerRejected {
                message: parsed.error_message(),
            });
        }

        match parsed.data {
            Some(value) => {
                serde_json::from_value(value).map_err(|e| SyncError::InvalidResponse(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // Transport Internals
    // =========================================================================

    /// Primary send with confirmation, falling back to a degraded resend
    /// whose response is ignored.
    async fn send_with_fallback(&self, body: String) -> SyncResult<PushReceipt> {
        let endpoint = self.config.endpoint()?;

        match self.post_plain(endpoint, body.clone()).await {
            Ok(response_body) => match serde_json::from_str::<RemoteResponse>(&response_body) {
                Ok(parsed) if parsed.is_success() => Ok(PushReceipt::verified()),
                Ok(parsed) => Err(SyncError::ServerRejected {
                    message: parsed.error_message(),
                }),
                Err(_) => {
                    // Endpoint answered with something we can't read,
                    // usually an HTML interstitial. The write very
                    // likely landed.
                    warn!("Push response unparseable, treating as unverified");
                    Ok(PushReceipt::unverified("response was not valid JSON"))
                }
            },
            Err(primary_err) => {
                warn!(error = %primary_err, "Primary push failed, trying degraded resend");

                self.send_fire_and_forget(body).await.map_err(|_| {
                    // Both paths failed: report the primary failure, it
                    // carries the more useful detail
                    primary_err
                })?;

                Ok(PushReceipt::unverified(
                    "sent via degraded path without confirmation",
                ))
            }
        }
    }

    /// Sends the body and ignores whatever comes back.
    async fn send_fire_and_forget(&self, body: String) -> SyncResult<()> {
        let endpoint = self.config.endpoint()?;
        self.post_plain(endpoint, body).await?;
        Ok(())
    }

    /// POST with a text/plain body. The hosted endpoint redirects the
    /// CORS preflight that an application/json content type triggers,
    /// dropping the body, so every write goes out as plain text.
    async fn post_plain(&self, endpoint: &str, body: String) -> SyncResult<String> {
        let response = self
            .client
            .post(endpoint)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        Ok(response.text().await?)
    }

    fn guard_payload_size(&self, size: usize) -> SyncResult<()> {
        if size > self.config.max_payload_bytes {
            return Err(SyncError::PayloadTooLarge {
                size,
                limit: self.config.max_payload_bytes,
            });
        }
        Ok(())
    }
}

/// Clips an unparseable body for the error message. Counts characters,
/// not bytes; endpoint error pages carry multibyte text and a byte slice
/// could land mid-character.
fn truncate_for_log(body: &str) -> String {
    const MAX_CHARS: usize = 200;
    match body.char_indices().nth(MAX_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use berkas_core::Invoice;

    fn gateway_with_limit(limit: usize) -> SyncGateway {
        let mut config = GatewayConfig::with_endpoint("https://example.com/exec");
        config.max_payload_bytes = limit;
        SyncGateway::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_payload_cap_blocks_before_send() {
        let gateway = gateway_with_limit(16);

        let invoice = Invoice {
            id: "1700000000000".to_string(),
            customer_name: "Toko Sari".to_string(),
            ..Default::default()
        };

        let err = gateway
            .push(RecordType::Invoice, &invoice)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::PayloadTooLarge { limit: 16, .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_gateway_refuses_remote_ops() {
        let gateway = SyncGateway::new(GatewayConfig::default()).unwrap();
        assert!(!gateway.is_configured());

        let err = gateway
            .push(RecordType::Invoice, &Invoice::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::MissingEndpoint));

        let err = gateway.pull::<Invoice>(RecordType::Invoice).await.unwrap_err();
        assert!(matches!(err, SyncError::MissingEndpoint));
    }

    #[test]
    fn test_receipt_confidence() {
        assert!(PushReceipt::verified().is_verified());
        assert!(!PushReceipt::unverified("sent blind").is_verified());
    }

    #[test]
    fn test_truncate_for_log() {
        let short = truncate_for_log("tiny");
        assert_eq!(short, "tiny");

        let long = truncate_for_log(&"x".repeat(500));
        assert!(long.len() < 500);
        assert!(long.ends_with("..."));
    }

    #[test]
    fn test_truncate_for_log_multibyte_text() {
        // An HTML interstitial can put a multibyte character right at the
        // clip point; the clip must land on a character boundary.
        let body = format!("{}é tail beyond the limit", "x".repeat(199));
        let clipped = truncate_for_log(&body);
        assert!(clipped.ends_with("..."));
        assert_eq!(clipped.chars().count(), 203); // 200 chars + "..."

        // All-multibyte bodies clip cleanly too
        let accented = "é".repeat(300);
        let clipped = truncate_for_log(&accented);
        assert_eq!(clipped, format!("{}...", "é".repeat(200)));

        // At or under the limit, the body passes through untouched
        let exact = format!("{}é", "x".repeat(199));
        assert_eq!(truncate_for_log(&exact), exact);
    }
}
