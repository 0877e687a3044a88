//! # Wire Protocol
//!
//! Envelope and response shapes for the hosted sheet endpoint.
//!
//! ## Message Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Endpoint Protocol                                 │
//! │                                                                         │
//! │  PUSH (POST, body text/plain)                                          │
//! │    {"action": "create_invoice", "data": { ...full record... }}         │
//! │                                                                         │
//! │  DELETE (POST, body text/plain)                                        │
//! │    {"action": "delete_invoice", "id": "1700000000000"}                 │
//! │                                                                         │
//! │  PULL (GET)                                                            │
//! │    ?action=read&type=invoice&_t=1700000000000                          │
//! │                                                                         │
//! │  RESPONSE (all of the above)                                           │
//! │    {"result": "success", "data": [...]}                                │
//! │    {"result": "error", "message": "unknown action"}                    │
//! │                                                                         │
//! │  The body is sent as text/plain: the hosted endpoint answers a         │
//! │  CORS preflight to application/json with a redirect that drops the    │
//! │  POST body.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Record Types
// =============================================================================

/// The three remotely mirrored record families.
///
/// Shipping labels are deliberately absent: they are local-only and
/// never cross the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordType {
    PurchaseOrder,
    Invoice,
    DeliveryOrder,
}

impl RecordType {
    /// The `type` query value used by pull requests.
    pub fn query_name(&self) -> &'static str {
        match self {
            RecordType::PurchaseOrder => "po",
            RecordType::Invoice => "invoice",
            RecordType::DeliveryOrder => "do",
        }
    }

    /// The action verb for a push. Create and update share one verb;
    /// the endpoint upserts by id.
    pub fn push_action(&self) -> &'static str {
        match self {
            RecordType::PurchaseOrder => "create",
            RecordType::Invoice => "create_invoice",
            RecordType::DeliveryOrder => "create_do",
        }
    }

    /// The action verb for a delete.
    pub fn delete_action(&self) -> &'static str {
        match self {
            RecordType::PurchaseOrder => "delete",
            RecordType::Invoice => "delete_invoice",
            RecordType::DeliveryOrder => "delete_do",
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Action verb for handing a purchase order to the calendar.
pub const SYNC_CALENDAR_ACTION: &str = "sync_calendar";

// =============================================================================
// Envelopes
// =============================================================================

/// Push envelope: an action verb wrapping the full record.
#[derive(Debug, Serialize)]
pub struct PushEnvelope<'a, T> {
    pub action: &'static str,
    pub data: &'a T,
}

/// Delete envelope: an action verb plus the record id.
#[derive(Debug, Serialize)]
pub struct DeleteEnvelope<'a> {
    pub action: &'static str,
    pub id: &'a str,
}

// =============================================================================
// Responses
// =============================================================================

/// Endpoint response shape, shared by every action.
#[derive(Debug, Deserialize)]
pub struct RemoteResponse {
    /// "success" or "error".
    pub result: String,

    /// Record array for reads; absent for writes.
    #[serde(default)]
    pub data: Option<Value>,

    /// Human-readable detail on errors.
    #[serde(default)]
    pub message: Option<String>,
}

impl RemoteResponse {
    /// True when the endpoint reported success.
    pub fn is_success(&self) -> bool {
        self.result == "success"
    }

    /// Error detail, or a placeholder when the endpoint sent none.
    pub fn error_message(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| "no detail from endpoint".to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_verbs() {
        assert_eq!(RecordType::PurchaseOrder.push_action(), "create");
        assert_eq!(RecordType::Invoice.push_action(), "create_invoice");
        assert_eq!(RecordType::DeliveryOrder.push_action(), "create_do");

        assert_eq!(RecordType::PurchaseOrder.delete_action(), "delete");
        assert_eq!(RecordType::Invoice.delete_action(), "delete_invoice");
        assert_eq!(RecordType::DeliveryOrder.delete_action(), "delete_do");

        assert_eq!(RecordType::PurchaseOrder.query_name(), "po");
        assert_eq!(RecordType::Invoice.query_name(), "invoice");
        assert_eq!(RecordType::DeliveryOrder.query_name(), "do");
    }

    #[test]
    fn test_push_envelope_shape() {
        let record = serde_json::json!({"id": "123", "customerName": "Toko Sari"});
        let envelope = PushEnvelope {
            action: RecordType::Invoice.push_action(),
            data: &record,
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["action"], "create_invoice");
        assert_eq!(json["data"]["id"], "123");
    }

    #[test]
    fn test_delete_envelope_shape() {
        let envelope = DeleteEnvelope {
            action: RecordType::PurchaseOrder.delete_action(),
            id: "1700000000000",
        };

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["action"], "delete");
        assert_eq!(json["id"], "1700000000000");
    }

    #[test]
    fn test_response_parsing() {
        let ok: RemoteResponse =
            serde_json::from_str(r#"{"result": "success", "data": []}"#).unwrap();
        assert!(ok.is_success());

        let err: RemoteResponse =
            serde_json::from_str(r#"{"result": "error", "message": "unknown action"}"#).unwrap();
        assert!(!err.is_success());
        assert_eq!(err.error_message(), "unknown action");

        // Writes come back without data or message
        let bare: RemoteResponse = serde_json::from_str(r#"{"result": "success"}"#).unwrap();
        assert!(bare.is_success());
        assert!(bare.data.is_none());
    }
}
