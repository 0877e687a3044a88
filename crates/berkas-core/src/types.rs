//! # Domain Types
//!
//! The record shapes shared by every layer of Berkas.
//!
//! ## Record Family
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Record Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ PurchaseOrder   │   │    Invoice      │   │ DeliveryOrder   │       │
//! │  │ ─────────────── │   │ ─────────────── │   │ ─────────────── │       │
//! │  │ poNumber        │   │ invoiceNumber   │   │ doNumber        │       │
//! │  │ type In/Out     │   │ refPONumber     │   │ refPONumber     │       │
//! │  │ items: priced   │   │ items: priced   │   │ items: unpriced │       │
//! │  │ status: manual  │   │ status: derived │   │ status: manual  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ ShippingLabel   │   │  AppSettings    │                             │
//! │  │ local-only      │   │  singleton      │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization Contract
//! Every record serializes with the camelCase field names the original
//! local-storage layout used (`poNumber`, `subTotal`, `refPONumber`, ...)
//! so stored data, backups and the remote mirror all share one shape.
//! Cross-references between records are denormalized string copies of
//! document numbers, never live relations: deleting a purchase order does
//! not touch invoices or delivery orders that name its number.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Status Enumerations
// =============================================================================

// The wire values for every status/type enum are the Indonesian strings
// the existing data carries ("Masuk", "Lunas", "Diproses", ...). The
// English variant names are accepted as read aliases so documents written
// by early builds still parse.

/// Lifecycle status of a purchase order.
///
/// Always an explicit user selection; never derived. The only automatic
/// behavior is the initial default offered for a new record (see
/// [`crate::status::default_po_status`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoStatus {
    Draft,
    Pending,
    #[serde(rename = "Disetujui", alias = "Approved")]
    Approved,
    #[serde(rename = "Selesai", alias = "Completed")]
    Completed,
    #[serde(rename = "Dibatalkan", alias = "Cancelled")]
    Cancelled,
}

impl Default for PoStatus {
    fn default() -> Self {
        PoStatus::Draft
    }
}

/// Direction of a purchase order: goods coming in from a supplier, or
/// going out to a customer. The direction scopes the sequence number
/// (`PO-IN-...` vs `PO-OUT-...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoType {
    #[serde(rename = "Masuk", alias = "Incoming")]
    Incoming,
    #[serde(rename = "Keluar", alias = "Outgoing")]
    Outgoing,
}

/// Lifecycle status of an invoice.
///
/// Paid/Partial/Unpaid are derived from the payment state at save time;
/// Draft and Overdue are explicit user choices the resolver preserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Draft,
    #[serde(rename = "Belum Lunas", alias = "Unpaid")]
    Unpaid,
    #[serde(rename = "Sebagian", alias = "Partial")]
    Partial,
    #[serde(rename = "Lunas", alias = "Paid")]
    Paid,
    #[serde(rename = "Jatuh Tempo", alias = "Overdue")]
    Overdue,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}

/// Lifecycle status of a delivery order. Explicit user selection only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[serde(rename = "Diproses", alias = "Preparing")]
    Preparing,
    #[serde(rename = "Dikirim", alias = "Shipped")]
    Shipped,
    #[serde(rename = "Diterima", alias = "Delivered")]
    Delivered,
    #[serde(rename = "Retur", alias = "Returned")]
    Returned,
}

impl Default for DeliveryStatus {
    fn default() -> Self {
        DeliveryStatus::Preparing
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// One priced row of goods within a purchase order or invoice.
///
/// `total_price` is derived (`quantity * unit_price`) and recomputed on
/// every edit rather than trusted from stored state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub specification: String,
    pub quantity: i64,
    pub unit: String,
    pub unit_price: Money,
    pub total_price: Money,
}

/// One row of goods on a delivery order. No pricing: a surat jalan lists
/// what was shipped, not what it cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoItem {
    pub id: String,
    pub name: String,
    pub specification: String,
    pub quantity: i64,
    pub unit: String,
    /// Free-text condition notes ("2 boxes dented", etc.).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One payment slot on an invoice.
///
/// An invoice carries at most [`crate::MAX_PAYMENT_SLOTS`] slots; only
/// slots with a positive amount count as used and only those persist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetail {
    pub amount: Money,
    pub date: String,
}

// =============================================================================
// Purchase Order
// =============================================================================

/// A record of goods ordered, incoming or outgoing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Client-generated identity (timestamp-based), immutable.
    pub id: String,
    /// Human-readable sequence number, e.g. `PO-IN-2026-001`.
    pub po_number: String,
    #[serde(rename = "type")]
    pub po_type: PoType,
    /// For outgoing orders: the incoming order they draw from.
    #[serde(rename = "relatedPOId", default, skip_serializing_if = "Option::is_none")]
    pub related_po_id: Option<String>,

    // Parties
    pub customer_name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    // Dates (ISO strings, as entered on the form)
    pub date_created: String,
    /// Fulfilment deadline, used for incoming orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Dispatch date, used for outgoing orders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_date: Option<String>,

    pub items: Vec<LineItem>,

    // Financials: grandTotal = subTotal - discount + tax
    pub sub_total: Money,
    pub discount: Money,
    pub tax: Money,
    pub grand_total: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_terms: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: PoStatus,
    /// Opaque encoded file attachment; this layer never decodes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    // Signatures
    pub created_by: String,
    pub approved_by: String,
    pub received_by: String,

    // Calendar-sync bookkeeping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_event_id: Option<String>,
    #[serde(default)]
    pub is_synced_to_calendar: bool,
}

impl Default for PoType {
    fn default() -> Self {
        PoType::Incoming
    }
}

impl PurchaseOrder {
    /// Returns true for orders bringing goods in from a supplier.
    #[inline]
    pub fn is_incoming(&self) -> bool {
        self.po_type == PoType::Incoming
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A billing document for an outgoing transaction, tracking payment-to-date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    /// Human-readable sequence number, e.g. `INV/2026/001`.
    pub invoice_number: String,
    /// Denormalized copy of a purchase-order number; dangles freely if
    /// that order is later deleted.
    #[serde(rename = "refPONumber", default, skip_serializing_if = "Option::is_none")]
    pub ref_po_number: Option<String>,

    // Parties
    pub customer_name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    // Dates
    pub date_created: String,
    pub due_date: String,

    pub items: Vec<LineItem>,

    // Financials
    pub sub_total: Money,
    pub discount: Money,
    pub tax: Money,
    pub grand_total: Money,
    /// Sum of the positive payment slots. Defaults to zero when reading
    /// older records that predate payment tracking.
    #[serde(default)]
    pub total_paid: Money,
    /// `grand_total - total_paid`; negative means overpaid.
    #[serde(default)]
    pub remaining_balance: Money,
    /// Up to [`crate::MAX_PAYMENT_SLOTS`] entries, positive amounts only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payment_details: Vec<PaymentDetail>,

    // Bank-transfer display fields
    pub bank_name: String,
    pub account_number: String,
    pub account_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: InvoiceStatus,

    // Signatures
    pub created_by: String,
    pub approved_by: String,
}

// =============================================================================
// Delivery Order (Surat Jalan)
// =============================================================================

/// A goods-dispatch record listing items shipped, without pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOrder {
    pub id: String,
    /// Human-readable sequence number, e.g. `SJ/2026/001`.
    pub do_number: String,
    #[serde(rename = "refPONumber", default, skip_serializing_if = "Option::is_none")]
    pub ref_po_number: Option<String>,

    // Recipient
    pub customer_name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,

    // Logistics
    pub date: String,
    pub driver_name: String,
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,

    pub items: Vec<DoItem>,

    pub status: DeliveryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    // Signatures
    pub warehouse_staff: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_sign_name: Option<String>,
}

// =============================================================================
// Shipping Label
// =============================================================================

/// A printable recipient-address sticker, unrelated to financial records.
/// Labels are local-only: no remote mirror operation exists for them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingLabel {
    pub id: String,
    pub date_created: String,
    pub customer_name: String,
    pub address: String,
    pub phone: String,
    pub sender_name: String,
    /// QR payload, a URL.
    pub qr_content: String,
}

// =============================================================================
// Application Settings
// =============================================================================

/// Singleton settings record: signature defaults, bank display fields,
/// company identity. Initialized with these defaults on first access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub default_admin_name: String,
    pub default_manager_name: String,
    pub default_bank_name: String,
    pub default_account_number: String,
    pub default_account_name: String,
    pub company_address: String,
    pub company_phone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            default_admin_name: "Admin Staff".to_string(),
            default_manager_name: "Pak Misdi".to_string(),
            default_bank_name: "BCA".to_string(),
            default_account_number: "1234567890".to_string(),
            default_account_name: "Planet Keripik".to_string(),
            company_address:
                "Jl. Tempean Utara Gang 1, RT.4/RW.6 Madyorenggo, Talok, Kec. Turen, Kabupaten Malang"
                    .to_string(),
            company_phone: "082338247777".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_po_serializes_with_original_field_names() {
        let po = PurchaseOrder {
            id: "1700000000000".into(),
            po_number: "PO-IN-2026-001".into(),
            po_type: PoType::Incoming,
            customer_name: "CV Sumber Rejeki".into(),
            sub_total: Money::from_units(100_000),
            grand_total: Money::from_units(100_000),
            ..Default::default()
        };

        let json = serde_json::to_value(&po).unwrap();
        assert_eq!(json["poNumber"], "PO-IN-2026-001");
        assert_eq!(json["type"], "Masuk");
        assert_eq!(json["subTotal"], 100_000);
        assert_eq!(json["grandTotal"], 100_000);
        assert_eq!(json["isSyncedToCalendar"], false);
        // Absent optionals stay absent, matching the original flat layout
        assert!(json.get("deadline").is_none());
        assert!(json.get("attachment").is_none());
    }

    #[test]
    fn test_invoice_ref_po_number_rename() {
        let invoice = Invoice {
            ref_po_number: Some("PO-OUT-2026-003".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["refPONumber"], "PO-OUT-2026-003");
    }

    #[test]
    fn test_invoice_reads_legacy_record_without_payment_fields() {
        // Records written before payment tracking existed carry neither
        // totalPaid nor paymentDetails.
        let json = r#"{
            "id": "1690000000000",
            "invoiceNumber": "INV/2025/004",
            "customerName": "Toko Maju",
            "address": "Malang",
            "dateCreated": "2025-06-01",
            "dueDate": "2025-07-01",
            "items": [],
            "subTotal": 250000,
            "discount": 0,
            "tax": 0,
            "grandTotal": 250000,
            "bankName": "BCA",
            "accountNumber": "1234567890",
            "accountName": "Planet Keripik",
            "status": "Unpaid",
            "createdBy": "Admin Staff",
            "approvedBy": "Pak Misdi"
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.total_paid, Money::zero());
        assert_eq!(invoice.remaining_balance, Money::zero());
        assert!(invoice.payment_details.is_empty());
    }

    #[test]
    fn test_status_round_trips() {
        for status in [
            InvoiceStatus::Draft,
            InvoiceStatus::Unpaid,
            InvoiceStatus::Partial,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            let back: InvoiceStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_statuses_use_original_wire_values() {
        // The existing data and the shared remote sheet carry these exact
        // strings; writes must keep producing them.
        let cases = [
            (serde_json::to_value(PoType::Incoming).unwrap(), "Masuk"),
            (serde_json::to_value(PoType::Outgoing).unwrap(), "Keluar"),
            (serde_json::to_value(PoStatus::Approved).unwrap(), "Disetujui"),
            (serde_json::to_value(PoStatus::Completed).unwrap(), "Selesai"),
            (serde_json::to_value(PoStatus::Cancelled).unwrap(), "Dibatalkan"),
            (serde_json::to_value(InvoiceStatus::Unpaid).unwrap(), "Belum Lunas"),
            (serde_json::to_value(InvoiceStatus::Partial).unwrap(), "Sebagian"),
            (serde_json::to_value(InvoiceStatus::Paid).unwrap(), "Lunas"),
            (serde_json::to_value(InvoiceStatus::Overdue).unwrap(), "Jatuh Tempo"),
            (serde_json::to_value(DeliveryStatus::Preparing).unwrap(), "Diproses"),
            (serde_json::to_value(DeliveryStatus::Shipped).unwrap(), "Dikirim"),
            (serde_json::to_value(DeliveryStatus::Delivered).unwrap(), "Diterima"),
            (serde_json::to_value(DeliveryStatus::Returned).unwrap(), "Retur"),
        ];
        for (value, wire) in cases {
            assert_eq!(value, *wire);
        }
    }

    #[test]
    fn test_reads_record_with_original_status_strings() {
        let json = r#"{
            "id": "1680000000000",
            "poNumber": "PO-OUT-2024-011",
            "type": "Keluar",
            "customerName": "Toko Lama",
            "address": "Malang",
            "dateCreated": "2024-03-01",
            "items": [],
            "subTotal": 0,
            "discount": 0,
            "tax": 0,
            "grandTotal": 0,
            "status": "Selesai",
            "createdBy": "Admin Staff",
            "approvedBy": "Pak Misdi",
            "receivedBy": "",
            "isSyncedToCalendar": false
        }"#;

        let po: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(po.po_type, PoType::Outgoing);
        assert_eq!(po.status, PoStatus::Completed);

        // English values from early builds still read via aliases
        let english: PoStatus = serde_json::from_str(r#""Completed""#).unwrap();
        assert_eq!(english, PoStatus::Completed);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.default_bank_name, "BCA");
        assert_eq!(settings.default_account_name, "Planet Keripik");
    }
}
